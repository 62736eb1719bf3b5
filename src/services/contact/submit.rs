use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ContactService;
use crate::errors::{DominiqueError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    contact::{
        requests::{NewContactMessage, SubmitContactRequest},
        responses::ContactSubmittedResponse,
    },
};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::validate::{optional_text, validate_email};

pub async fn submit_message(
    service: &ContactService,
    request: &HttpRequest,
    body: SubmitContactRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match submit_contact_message(storage.as_ref(), body).await {
        Ok(submitted) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submitted,
            "Message sent successfully",
        ))),
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to save contact message: {}", e);
            }
            Ok(error_response(
                &e,
                ErrorCode::ContactValidationFailed,
                ErrorCode::InternalServerError,
            ))
        }
    }
}

/// 校验并保存一条公开留言
pub(crate) async fn submit_contact_message(
    storage: &dyn Storage,
    body: SubmitContactRequest,
) -> Result<ContactSubmittedResponse> {
    let (Some(name), Some(email), Some(phone), Some(message)) = (
        optional_text(body.name.as_deref()),
        optional_text(body.email.as_deref()),
        optional_text(body.phone.as_deref()),
        optional_text(body.message.as_deref()),
    ) else {
        return Err(DominiqueError::validation("All fields are required"));
    };

    let email = email.to_lowercase();
    if validate_email(&email).is_err() {
        return Err(DominiqueError::validation("Invalid email"));
    }

    let saved = storage
        .create_contact_message(NewContactMessage {
            name,
            email,
            phone,
            message,
        })
        .await?;
    info!("Contact message {} received from {}", saved.id, saved.email);

    Ok(ContactSubmittedResponse {
        id: saved.id,
        name: saved.name,
        email: saved.email,
    })
}
