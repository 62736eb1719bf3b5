use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AttendanceService;
use crate::errors::{DominiqueError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::AttendanceStatus,
        requests::{MarkAllPresentRequest, NewAttendance},
        responses::RecordAttendanceResponse,
    },
};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::validate::{optional_text, parse_date, required_text};

pub async fn mark_all_present(
    service: &AttendanceService,
    request: &HttpRequest,
    body: MarkAllPresentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match mark_students_present(storage.as_ref(), body).await {
        Ok(result) => {
            let message = format!("{} student(s) marked as present", result.saved_count);
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, message)))
        }
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to mark students as present: {}", e);
            }
            Ok(error_response(
                &e,
                ErrorCode::AttendanceValidationFailed,
                ErrorCode::AttendanceSaveFailed,
            ))
        }
    }
}

/// 将名单中的每个学生在指定日期标记为出席（覆盖已有状态与备注）
pub(crate) async fn mark_students_present(
    storage: &dyn Storage,
    body: MarkAllPresentRequest,
) -> Result<RecordAttendanceResponse> {
    let class_id = required_text(body.class_id.as_deref(), "classId")?;
    let date = parse_date(&required_text(body.date.as_deref(), "date")?)?;

    if body.student_ids.is_empty() {
        return Err(DominiqueError::validation(
            "studentIds must be a non-empty array",
        ));
    }

    let total = body.student_ids.len();
    let mut student_ids: Vec<String> = body
        .student_ids
        .iter()
        .filter_map(|id| optional_text(Some(id.as_str())))
        .collect();
    student_ids.sort();
    student_ids.dedup();

    let entries = student_ids
        .into_iter()
        .map(|student_id| NewAttendance {
            student_id,
            class_id: class_id.clone(),
            date: date.clone(),
            status: AttendanceStatus::Present,
            observations: None,
        })
        .collect::<Vec<_>>();
    let skipped_count = total - entries.len();

    let attendance = if entries.is_empty() {
        Vec::new()
    } else {
        storage.upsert_attendance_batch(entries).await?
    };
    info!(
        "Marked {} student(s) present in {} on {}",
        attendance.len(),
        class_id,
        date
    );

    Ok(RecordAttendanceResponse {
        saved_count: attendance.len(),
        skipped_count,
        attendance,
    })
}
