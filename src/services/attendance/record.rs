use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::AttendanceService;
use crate::errors::{DominiqueError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{requests::RecordAttendanceRequest, responses::RecordAttendanceResponse},
};
use crate::services::{error_response, keep_last_per_key};
use crate::storage::Storage;
use crate::utils::validate::validate_attendance_submission;

pub async fn record_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    body: RecordAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match record_attendance_batch(storage.as_ref(), body).await {
        Ok(result) => {
            let message = format!(
                "{} attendance record(s) saved successfully",
                result.saved_count
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, message)))
        }
        Err(e) => {
            if !e.is_client_error() {
                error!("Failed to save attendance: {}", e);
            }
            Ok(error_response(
                &e,
                ErrorCode::AttendanceValidationFailed,
                ErrorCode::AttendanceSaveFailed,
            ))
        }
    }
}

/// 写入一批出勤
///
/// 不合法的条目记录日志后跳过，其余条目照常写入。
pub(crate) async fn record_attendance_batch(
    storage: &dyn Storage,
    body: RecordAttendanceRequest,
) -> Result<RecordAttendanceResponse> {
    let submissions = body
        .attendance_data
        .ok_or_else(|| DominiqueError::validation("attendanceData must be an array"))?;

    let total = submissions.len();
    let valid: Vec<_> = submissions
        .iter()
        .enumerate()
        .filter_map(
            |(index, submission)| match validate_attendance_submission(submission) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping attendanceData[{}]: {}", index, e);
                    None
                }
            },
        )
        .collect();
    let skipped_count = total - valid.len();
    let valid = keep_last_per_key(valid, |a| (a.student_id.clone(), a.date.clone()));

    let attendance = if valid.is_empty() {
        Vec::new()
    } else {
        storage.upsert_attendance_batch(valid).await?
    };
    info!(
        "Saved {} attendance record(s), skipped {}",
        attendance.len(),
        skipped_count
    );

    Ok(RecordAttendanceResponse {
        saved_count: attendance.len(),
        skipped_count,
        attendance,
    })
}
