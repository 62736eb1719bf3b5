use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ClassService, class_error_response};
use crate::errors::{DominiqueError, Result};
use crate::models::ApiResponse;
use crate::storage::Storage;

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match remove_class(storage.as_ref(), &id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Class deleted successfully",
        ))),
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to delete class {}: {}", id, e);
            }
            Ok(class_error_response(&e))
        }
    }
}

/// 删除班级；仍有学生归属时拒绝
pub(crate) async fn remove_class(storage: &dyn Storage, id: &str) -> Result<()> {
    if storage.get_class_by_id(id).await?.is_none() {
        return Err(DominiqueError::not_found("Class not found"));
    }

    let students = storage.count_students_in_class(id).await?;
    if students > 0 {
        return Err(DominiqueError::conflict(format!(
            "Class has {students} student(s) and cannot be deleted"
        )));
    }

    if !storage.delete_class(id).await? {
        return Err(DominiqueError::not_found("Class not found"));
    }
    info!("Class {} deleted", id);

    Ok(())
}
