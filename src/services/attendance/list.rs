use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, attendance::requests::AttendanceListQuery};

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mut query: AttendanceListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 学生只能查看自己的出勤
    if let Some(user) = RequireJWT::extract_auth_user(request)
        && user.is_student()
    {
        query.student_id = Some(user.id);
    }

    match storage.list_attendance(query).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            records,
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance: {e}"),
            )),
        ),
    }
}
