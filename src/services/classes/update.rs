use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ClassService, class_error_response, create::validate_class};
use crate::errors::{DominiqueError, Result};
use crate::models::{
    ApiResponse,
    classes::{entities::SchoolClass, requests::SaveClassRequest, responses::ClassResponse},
};
use crate::storage::Storage;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    id: String,
    body: SaveClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match modify_class(storage.as_ref(), &id, body).await {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassResponse { class },
            "Class updated successfully",
        ))),
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to update class {}: {}", id, e);
            }
            Ok(class_error_response(&e))
        }
    }
}

pub(crate) async fn modify_class(
    storage: &dyn Storage,
    id: &str,
    body: SaveClassRequest,
) -> Result<SchoolClass> {
    let new_class = validate_class(body)?;
    let class = storage
        .update_class(id, new_class)
        .await?
        .ok_or_else(|| DominiqueError::not_found("Class not found"))?;
    info!("Class {} updated", class.id);
    Ok(class)
}
