use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, grades::requests::GradeListQuery};

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    mut query: GradeListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 学生只能查看自己的成绩
    if let Some(user) = RequireJWT::extract_auth_user(request)
        && user.is_student()
    {
        query.student_id = Some(user.id);
    }

    match storage.list_bimester_grades(query).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grades,
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve grades: {e}"),
            )),
        ),
    }
}
