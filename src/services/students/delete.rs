use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, student_error_response};
use crate::errors::{DominiqueError, Result};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match remove_student(storage.as_ref(), &id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Student deleted successfully",
        ))),
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to delete student {}: {}", id, e);
            }
            Ok(student_error_response(&e, ErrorCode::StudentHasRecords))
        }
    }
}

/// 删除学生；仍有成绩或出勤记录时拒绝
pub(crate) async fn remove_student(storage: &dyn Storage, id: &str) -> Result<()> {
    if storage.get_student_by_id(id).await?.is_none() {
        return Err(DominiqueError::not_found("Student not found"));
    }

    let records = storage.count_student_records(id).await?;
    if records > 0 {
        return Err(DominiqueError::conflict(format!(
            "Student has {records} grade or attendance record(s) and cannot be deleted"
        )));
    }

    if !storage.delete_student(id).await? {
        return Err(DominiqueError::not_found("Student not found"));
    }
    info!("Student {} deleted", id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::{entities::NoteTriple, requests::NewBimesterGrade};
    use crate::models::students::requests::NewStudent;
    use crate::storage::create_test_storage;

    async fn seed_student(storage: &dyn Storage) -> String {
        storage
            .create_student(NewStudent {
                name: "Caio Mendes".to_string(),
                email: "caio@escola.com".to_string(),
                enrollment: "2024003".to_string(),
                phone: String::new(),
                grade: Some("9ano".to_string()),
                class_id: None,
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn test_student_without_records_is_deleted() {
        let storage = create_test_storage().await;
        let id = seed_student(storage.as_ref()).await;

        remove_student(storage.as_ref(), &id).await.unwrap();
        assert!(storage.get_student_by_id(&id).await.unwrap().is_none());

        let err = remove_student(storage.as_ref(), &id).await.unwrap_err();
        assert!(matches!(err, DominiqueError::NotFound(_)));
    }

    #[actix_web::test]
    async fn test_student_with_grades_is_kept() {
        let storage = create_test_storage().await;
        let id = seed_student(storage.as_ref()).await;
        storage
            .upsert_bimester_grades(vec![NewBimesterGrade {
                student_id: id.clone(),
                student_name: Some("Caio Mendes".to_string()),
                subject: "historia".to_string(),
                class_id: "9ano".to_string(),
                bimester: 1,
                notes: NoteTriple::new(Some(7.0), None, None),
            }])
            .await
            .unwrap();

        let err = remove_student(storage.as_ref(), &id).await.unwrap_err();
        assert!(matches!(err, DominiqueError::Conflict(_)));
        assert!(storage.get_student_by_id(&id).await.unwrap().is_some());
    }
}
