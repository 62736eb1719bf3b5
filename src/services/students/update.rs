use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, create::validate_student, student_error_response};
use crate::errors::{DominiqueError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    students::{entities::Student, requests::CreateStudentRequest, responses::StudentResponse},
};
use crate::storage::Storage;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: String,
    body: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match modify_student(storage.as_ref(), &id, body).await {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResponse { student },
            "Student updated successfully",
        ))),
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to update student {}: {}", id, e);
            }
            Ok(student_error_response(&e, ErrorCode::StudentAlreadyExists))
        }
    }
}

/// 整体替换学生信息，邮箱或学号与其他学生重复时返回冲突
pub(crate) async fn modify_student(
    storage: &dyn Storage,
    id: &str,
    body: CreateStudentRequest,
) -> Result<Student> {
    if storage.get_student_by_id(id).await?.is_none() {
        return Err(DominiqueError::not_found("Student not found"));
    }

    let new_student = validate_student(storage, body, Some(id)).await?;
    let student = storage
        .update_student(id, new_student)
        .await?
        .ok_or_else(|| DominiqueError::not_found("Student not found"))?;
    info!("Student {} ({}) updated", student.id, student.enrollment);

    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::students::create::register_student;
    use crate::storage::create_test_storage;

    fn request(name: &str, email: &str, enrollment: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            enrollment: Some(enrollment.to_string()),
            phone: Some("11 4000-1234".to_string()),
            grade: Some("8ano".to_string()),
            class_id: None,
        }
    }

    #[actix_web::test]
    async fn test_keeping_own_email_and_enrollment_is_allowed() {
        let storage = create_test_storage().await;
        let ana = register_student(
            storage.as_ref(),
            request("Ana Souza", "ana@escola.com", "2024001"),
        )
        .await
        .unwrap();

        let updated = modify_student(
            storage.as_ref(),
            &ana.id,
            request("Ana Souza Lima", "ANA@escola.com", "2024001"),
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Ana Souza Lima");
        assert_eq!(updated.email, "ana@escola.com");
        assert_eq!(updated.phone, "11 4000-1234");
    }

    #[actix_web::test]
    async fn test_taking_another_students_email_conflicts() {
        let storage = create_test_storage().await;
        let ana = register_student(
            storage.as_ref(),
            request("Ana Souza", "ana@escola.com", "2024001"),
        )
        .await
        .unwrap();
        register_student(
            storage.as_ref(),
            request("Bruno Lima", "bruno@escola.com", "2024002"),
        )
        .await
        .unwrap();

        let err = modify_student(
            storage.as_ref(),
            &ana.id,
            request("Ana Souza", "bruno@escola.com", "2024001"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DominiqueError::Conflict(_)));

        let unchanged = storage.get_student_by_id(&ana.id).await.unwrap().unwrap();
        assert_eq!(unchanged.email, "ana@escola.com");
    }

    #[actix_web::test]
    async fn test_unknown_student_is_not_found() {
        let storage = create_test_storage().await;
        let err = modify_student(
            storage.as_ref(),
            "missing",
            request("Ana Souza", "ana@escola.com", "2024001"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DominiqueError::NotFound(_)));
    }
}
