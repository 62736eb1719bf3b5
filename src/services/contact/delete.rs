use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ContactService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_message(
    service: &ContactService,
    request: &HttpRequest,
    id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_contact_message(&id).await {
        Ok(true) => {
            info!("Contact message {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Message deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContactNotFound,
            "Message not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete message: {e}"),
            )),
        ),
    }
}
