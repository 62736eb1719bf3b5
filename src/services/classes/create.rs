use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ClassService, class_error_response};
use crate::errors::{DominiqueError, Result};
use crate::models::{
    ApiResponse,
    classes::{
        entities::SchoolClass,
        requests::{NewClass, SaveClassRequest},
        responses::ClassResponse,
    },
};
use crate::storage::Storage;
use crate::utils::validate::{optional_text, required_text};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    body: SaveClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match register_class(storage.as_ref(), body).await {
        Ok(class) => Ok(HttpResponse::Created().json(ApiResponse::success(
            ClassResponse { class },
            "Class created successfully",
        ))),
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to create class: {}", e);
            }
            Ok(class_error_response(&e))
        }
    }
}

/// 校验班级字段：名称、科目、教师必填，容量缺省为 30，状态缺省为 active
pub(crate) fn validate_class(body: SaveClassRequest) -> Result<NewClass> {
    let name = required_text(body.name.as_deref(), "name")?;
    let subject = required_text(body.subject.as_deref(), "subject")?;
    let teacher = required_text(body.teacher.as_deref(), "teacher")?;

    let capacity = match body.capacity {
        None => SchoolClass::DEFAULT_CAPACITY,
        Some(c) if c > 0 => c,
        Some(c) => {
            return Err(DominiqueError::validation(format!(
                "capacity must be a positive integer, got {c}"
            )));
        }
    };

    Ok(NewClass {
        name,
        description: optional_text(body.description.as_deref()),
        subject,
        teacher,
        schedule: optional_text(body.schedule.as_deref()),
        capacity,
        status: optional_text(body.status.as_deref())
            .unwrap_or_else(|| SchoolClass::STATUS_ACTIVE.to_string()),
    })
}

pub(crate) async fn register_class(
    storage: &dyn Storage,
    body: SaveClassRequest,
) -> Result<SchoolClass> {
    let class = storage.create_class(validate_class(body)?).await?;
    info!("Class {} ({}) created", class.id, class.name);
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SaveClassRequest {
        SaveClassRequest {
            name: Some(" 7º Ano A ".to_string()),
            subject: Some("Português".to_string()),
            teacher: Some("Prof. Marcos".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_are_applied() {
        let class = validate_class(request()).unwrap();
        assert_eq!(class.name, "7º Ano A");
        assert_eq!(class.capacity, 30);
        assert_eq!(class.status, "active");
        assert_eq!(class.description, None);
    }

    #[test]
    fn test_required_fields_and_capacity() {
        let err = validate_class(SaveClassRequest {
            teacher: Some("  ".to_string()),
            ..request()
        })
        .unwrap_err();
        assert!(err.message().contains("teacher"));

        let err = validate_class(SaveClassRequest {
            capacity: Some(0),
            ..request()
        })
        .unwrap_err();
        assert!(matches!(err, DominiqueError::Validation(_)));
    }
}
