use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, student_error_response};
use crate::errors::{DominiqueError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, NewStudent},
        responses::StudentResponse,
    },
};
use crate::storage::Storage;
use crate::utils::validate::{optional_text, required_text, validate_email};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    body: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match register_student(storage.as_ref(), body).await {
        Ok(student) => Ok(HttpResponse::Created().json(ApiResponse::success(
            StudentResponse { student },
            "Student created successfully",
        ))),
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to create student: {}", e);
            }
            Ok(student_error_response(&e, ErrorCode::StudentAlreadyExists))
        }
    }
}

/// 校验学生字段，检查邮箱/学号唯一性（`exclude_id` 排除自身）与所属班级
pub(crate) async fn validate_student(
    storage: &dyn Storage,
    body: CreateStudentRequest,
    exclude_id: Option<&str>,
) -> Result<NewStudent> {
    let name = required_text(body.name.as_deref(), "name")?;
    let email = required_text(body.email.as_deref(), "email")?.to_lowercase();
    let enrollment = required_text(body.enrollment.as_deref(), "enrollment")?;

    if validate_email(&email).is_err() {
        return Err(DominiqueError::validation("Invalid email"));
    }

    if storage
        .get_student_by_email_or_enrollment(&email, &enrollment, exclude_id)
        .await?
        .is_some()
    {
        return Err(DominiqueError::conflict(
            "A student with this email or enrollment already exists",
        ));
    }

    let class_id = optional_text(body.class_id.as_deref());
    if let Some(class_id) = &class_id
        && storage.get_class_by_id(class_id).await?.is_none()
    {
        return Err(DominiqueError::validation(format!(
            "Class not found: {class_id}"
        )));
    }

    Ok(NewStudent {
        name,
        email,
        enrollment,
        phone: optional_text(body.phone.as_deref()).unwrap_or_default(),
        grade: optional_text(body.grade.as_deref()),
        class_id,
    })
}

/// 校验并登记学生，邮箱或学号重复时返回冲突
pub(crate) async fn register_student(
    storage: &dyn Storage,
    body: CreateStudentRequest,
) -> Result<Student> {
    let new_student = validate_student(storage, body, None).await?;
    let student = storage.create_student(new_student).await?;
    info!("Student {} ({}) registered", student.id, student.enrollment);

    Ok(student)
}
