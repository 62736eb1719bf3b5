use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{requests::ClearAttendanceQuery, responses::ClearAttendanceResponse},
};
use crate::utils::validate::parse_date;

pub async fn clear_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: ClearAttendanceQuery,
) -> ActixResult<HttpResponse> {
    let (Some(date), Some(class_id)) = (query.date, query.class_id) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceValidationFailed,
            "date and classId are required",
        )));
    };

    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceValidationFailed,
                e.to_string(),
            )));
        }
    };

    let storage = service.get_storage(request);
    match storage
        .delete_attendance_by_date_and_class(&date, &class_id)
        .await
    {
        Ok(deleted_count) => {
            info!(
                "Cleared {} attendance record(s) for {} on {}",
                deleted_count, class_id, date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ClearAttendanceResponse { deleted_count },
                format!("{deleted_count} attendance record(s) deleted"),
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::AttendanceSaveFailed,
                format!("Failed to clear attendance: {e}"),
            )),
        ),
    }
}
