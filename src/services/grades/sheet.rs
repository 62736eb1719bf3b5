use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode, grades::requests::GradeSheetQuery};

pub async fn grade_sheet(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeSheetQuery,
) -> ActixResult<HttpResponse> {
    let (Some(class_id), Some(bimester), Some(subject)) =
        (query.class_id, query.bimester, query.subject)
    else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "classId, bimester and subject are required",
        )));
    };

    if !(1..=4).contains(&bimester) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("bimester must be an integer between 1 and 4, got {bimester}"),
        )));
    }

    let storage = service.get_storage(request);
    match storage.grade_sheet(&class_id, bimester, &subject).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            rows,
            "Grade sheet retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to build grade sheet: {e}"),
            )),
        ),
    }
}
