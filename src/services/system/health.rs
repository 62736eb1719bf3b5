use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::error;

use super::SystemService;
use crate::models::{
    ApiResponse, AppStartTime, ErrorCode,
    system::responses::{DatabaseHealth, HealthResponse},
};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or(0);

    let database_result = storage.ping().await;
    let connected = database_result.is_ok();

    let response = HealthResponse {
        status: if connected { "ok" } else { "degraded" }.to_string(),
        database: DatabaseHealth { connected },
        environment: config.app.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
    };

    match database_result {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy"))),
        Err(e) => {
            error!("Health check failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error(
                    ErrorCode::DatabaseUnavailable,
                    response,
                    format!("Database unavailable: {}", e.message()),
                )),
            )
        }
    }
}
