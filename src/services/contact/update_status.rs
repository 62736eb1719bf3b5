use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ContactService;
use crate::config::AppConfig;
use crate::errors::{DominiqueError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    contact::entities::{ContactMessage, ContactStatus},
};
use crate::storage::Storage;

pub async fn update_status(
    service: &ContactService,
    request: &HttpRequest,
    id: Option<String>,
    status: Option<String>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let enforce = AppConfig::get().contact.enforce_forward_transitions;

    match change_contact_status(storage.as_ref(), id, status, enforce).await {
        Ok(message) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            message,
            "Status updated successfully",
        ))),
        Err(e) => {
            let code = match &e {
                DominiqueError::InvalidStatus(_) => ErrorCode::ContactStatusInvalid,
                DominiqueError::NotFound(_) => ErrorCode::ContactNotFound,
                DominiqueError::Conflict(_) => ErrorCode::ContactTransitionDenied,
                DominiqueError::Validation(_) => ErrorCode::ContactValidationFailed,
                _ => {
                    error!("Failed to update contact status: {}", e);
                    ErrorCode::InternalServerError
                }
            };
            Ok(HttpResponse::build(e.status_code())
                .json(ApiResponse::error_empty(code, e.message())))
        }
    }
}

/// 修改留言状态
///
/// `enforce_forward` 开启时拒绝回退（如 replied -> new）。
pub(crate) async fn change_contact_status(
    storage: &dyn Storage,
    id: Option<String>,
    status: Option<String>,
    enforce_forward: bool,
) -> Result<ContactMessage> {
    let id = id.map(|v| v.trim().to_string()).unwrap_or_default();
    let status = status.map(|v| v.trim().to_string()).unwrap_or_default();
    if id.is_empty() || status.is_empty() {
        return Err(DominiqueError::validation("id and status are required"));
    }

    let next = status
        .parse::<ContactStatus>()
        .map_err(DominiqueError::invalid_status)?;

    let current = storage
        .get_contact_message_by_id(&id)
        .await?
        .ok_or_else(|| DominiqueError::not_found("Message not found"))?;

    if enforce_forward && !current.status.can_transition_to(next) {
        return Err(DominiqueError::conflict(format!(
            "Cannot change status from '{}' to '{}'",
            current.status, next
        )));
    }

    let updated = storage
        .update_contact_message_status(&id, next)
        .await?
        .ok_or_else(|| DominiqueError::not_found("Message not found"))?;
    info!(
        "Contact message {} status changed: {} -> {}",
        id, current.status, updated.status
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact::requests::NewContactMessage;
    use crate::storage::create_test_storage;

    async fn seed(storage: &dyn Storage) -> String {
        storage
            .create_contact_message(NewContactMessage {
                name: "João".to_string(),
                email: "joao@example.com".to_string(),
                phone: "11988887777".to_string(),
                message: "Horário da secretaria?".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn test_update_status() {
        let storage = create_test_storage().await;
        let id = seed(storage.as_ref()).await;

        let updated = change_contact_status(
            storage.as_ref(),
            Some(id.clone()),
            Some("read".to_string()),
            false,
        )
        .await
        .unwrap();
        assert_eq!(updated.status, ContactStatus::Read);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[actix_web::test]
    async fn test_invalid_status_and_missing_fields() {
        let storage = create_test_storage().await;
        let id = seed(storage.as_ref()).await;

        let err = change_contact_status(
            storage.as_ref(),
            Some(id.clone()),
            Some("archived".to_string()),
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DominiqueError::InvalidStatus(_)));
        assert!(err.message().contains("new, read, replied"));

        let err = change_contact_status(storage.as_ref(), Some(id), None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, DominiqueError::Validation(_)));
    }

    #[actix_web::test]
    async fn test_unknown_message_is_not_found() {
        let storage = create_test_storage().await;
        let err = change_contact_status(
            storage.as_ref(),
            Some("missing".to_string()),
            Some("read".to_string()),
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DominiqueError::NotFound(_)));
    }

    #[actix_web::test]
    async fn test_backward_transition_only_denied_when_enforced() {
        let storage = create_test_storage().await;
        let id = seed(storage.as_ref()).await;

        change_contact_status(
            storage.as_ref(),
            Some(id.clone()),
            Some("replied".to_string()),
            true,
        )
        .await
        .unwrap();

        let err = change_contact_status(
            storage.as_ref(),
            Some(id.clone()),
            Some("new".to_string()),
            true,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DominiqueError::Conflict(_)));

        let reverted = change_contact_status(
            storage.as_ref(),
            Some(id),
            Some("new".to_string()),
            false,
        )
        .await
        .unwrap();
        assert_eq!(reverted.status, ContactStatus::New);
    }
}
