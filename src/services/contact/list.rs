use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContactService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, contact::requests::ContactListParams};

pub async fn list_messages(
    service: &ContactService,
    request: &HttpRequest,
    params: ContactListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let limit = effective_limit(params.limit, AppConfig::get().contact.list_limit);

    match storage.list_contact_messages(limit).await {
        Ok(messages) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            messages,
            "Messages retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve messages: {e}"),
            )),
        ),
    }
}

// 请求的条数不能超过配置上限，0 视为未指定
fn effective_limit(requested: Option<u64>, max: u64) -> u64 {
    match requested {
        Some(limit) if limit > 0 => limit.min(max),
        _ => max,
    }
}
