use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::GradeService;
use crate::errors::{DominiqueError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{requests::RecordGradesRequest, responses::RecordGradesResponse},
};
use crate::services::{error_response, keep_last_per_key};
use crate::storage::Storage;
use crate::utils::validate::validate_grade_submission;

pub async fn record_grades(
    service: &GradeService,
    request: &HttpRequest,
    body: RecordGradesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match record_grade_batch(storage.as_ref(), body).await {
        Ok(result) => {
            let message = format!("{} grade(s) saved successfully", result.saved_count);
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, message)))
        }
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to save grades: {}", e);
            }
            Ok(error_response(
                &e,
                ErrorCode::GradeValidationFailed,
                ErrorCode::GradeSaveFailed,
            ))
        }
    }
}

/// 校验整批成绩后一次性写入
///
/// 任意一条不合法时整批拒绝，不写入任何记录。
pub(crate) async fn record_grade_batch(
    storage: &dyn Storage,
    body: RecordGradesRequest,
) -> Result<RecordGradesResponse> {
    let submissions = match body.grades_data {
        Some(data) if !data.is_empty() => data,
        _ => {
            return Err(DominiqueError::validation(
                "gradesData must be a non-empty array",
            ));
        }
    };

    let validated = submissions
        .iter()
        .enumerate()
        .map(|(index, submission)| {
            validate_grade_submission(submission)
                .map_err(|e| DominiqueError::validation(format!("gradesData[{index}]: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;
    let validated = keep_last_per_key(validated, |g| {
        (
            g.student_id.clone(),
            g.subject.clone(),
            g.class_id.clone(),
            g.bimester,
        )
    });

    let grades = storage.upsert_bimester_grades(validated).await?;
    info!("Saved {} bimester grade(s)", grades.len());

    Ok(RecordGradesResponse {
        saved_count: grades.len(),
        grades,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::requests::GradeListQuery;
    use crate::storage::create_test_storage;
    use serde_json::json;

    fn request(value: serde_json::Value) -> RecordGradesRequest {
        serde_json::from_value(value).unwrap()
    }

    #[actix_web::test]
    async fn test_batch_saves_every_valid_entry() {
        let storage = create_test_storage().await;
        let result = record_grade_batch(
            storage.as_ref(),
            request(json!({
                "gradesData": [
                    {"studentId": "A", "studentName": "Ana", "subject": "ciencias",
                     "classId": "7ano", "bimester": 1, "note1": 8, "note2": 9},
                    {"studentId": "C", "studentName": "Caio", "subject": "ciencias",
                     "classId": "7ano", "bimester": 1, "note1": "6", "note2": "", "note3": 7}
                ]
            })),
        )
        .await
        .unwrap();

        assert_eq!(result.saved_count, 2);
        assert_eq!(result.grades[0].average, 8.5);
        assert_eq!(result.grades[1].average, 6.5);
        assert_eq!(result.grades[1].note2, None);
    }

    #[actix_web::test]
    async fn test_repeated_key_in_one_batch_keeps_last() {
        let storage = create_test_storage().await;
        let result = record_grade_batch(
            storage.as_ref(),
            request(json!({
                "gradesData": [
                    {"studentId": "A", "subject": "ciencias", "classId": "7ano",
                     "bimester": 1, "note1": 4},
                    {"studentId": "A", "subject": "ciencias", "classId": "7ano",
                     "bimester": 1, "note1": 9, "note2": 10}
                ]
            })),
        )
        .await
        .unwrap();

        assert_eq!(result.saved_count, 1);
        assert_eq!(result.grades.len(), 1);
        assert_eq!(result.grades[0].note1, Some(9.0));
        assert_eq!(result.grades[0].average, 9.5);

        let stored = storage
            .list_bimester_grades(GradeListQuery::default())
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].average, 9.5);
    }

    #[actix_web::test]
    async fn test_one_invalid_entry_rejects_whole_batch() {
        let storage = create_test_storage().await;
        let err = record_grade_batch(
            storage.as_ref(),
            request(json!({
                "gradesData": [
                    {"studentId": "A", "subject": "ciencias", "classId": "7ano",
                     "bimester": 1, "note1": 8},
                    {"studentId": "B", "subject": "ciencias", "classId": "7ano", "note1": 7}
                ]
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code(), "E004");
        assert!(err.message().starts_with("gradesData[1]:"));
        assert!(err.message().contains("bimester"));

        let stored = storage
            .list_bimester_grades(GradeListQuery::default())
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[actix_web::test]
    async fn test_all_notes_absent_is_rejected() {
        let storage = create_test_storage().await;
        let err = record_grade_batch(
            storage.as_ref(),
            request(json!({
                "gradesData": [
                    {"studentId": "A", "subject": "ciencias", "classId": "7ano",
                     "bimester": 2, "note1": null, "note2": 12, "note3": "x"}
                ]
            })),
        )
        .await
        .unwrap_err();
        assert!(err.message().contains("at least one of note1, note2, note3"));
    }

    #[actix_web::test]
    async fn test_missing_or_empty_batch() {
        let storage = create_test_storage().await;
        for body in [json!({}), json!({"gradesData": []})] {
            let err = record_grade_batch(storage.as_ref(), request(body))
                .await
                .unwrap_err();
            assert_eq!(err.code(), "E004");
        }
    }
}
