use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::UserRole;
use crate::models::contact::requests::{
    ContactListParams, PatchContactStatusRequest, SubmitContactRequest,
    UpdateContactStatusRequest,
};
use crate::services::ContactService;
use crate::utils::SafeId;

// 懒加载的全局 CONTACT_SERVICE 实例
static CONTACT_SERVICE: Lazy<ContactService> = Lazy::new(ContactService::new_lazy);

// HTTP处理程序
pub async fn submit_message(
    req: HttpRequest,
    body: web::Json<SubmitContactRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE
        .submit_message(&req, body.into_inner())
        .await
}

pub async fn list_messages(
    req: HttpRequest,
    query: web::Query<ContactListParams>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE
        .list_messages(&req, query.into_inner())
        .await
}

pub async fn update_status(
    req: HttpRequest,
    body: web::Json<UpdateContactStatusRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE
        .update_status(&req, body.into_inner())
        .await
}

pub async fn patch_status(
    req: HttpRequest,
    id: SafeId,
    body: web::Json<PatchContactStatusRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE
        .patch_status(&req, id.into_inner(), body.into_inner())
        .await
}

pub async fn delete_message(req: HttpRequest, id: SafeId) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.delete_message(&req, id.into_inner()).await
}

// 配置路由
pub fn configure_contact_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/contact")
            .service(
                web::resource("")
                    // 公开留言表单，按客户端限流
                    .route(
                        web::post()
                            .to(submit_message)
                            .wrap(middlewares::RateLimit::contact_form()),
                    )
                    .route(
                        web::get()
                            .to(list_messages)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::resource("/update").route(
                    web::post()
                        .to(update_status)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                        .wrap(middlewares::RequireJWT),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::patch()
                            .to(patch_status)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                            .wrap(middlewares::RequireJWT),
                    )
                    .route(
                        web::delete()
                            .to(delete_message)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                            .wrap(middlewares::RequireJWT),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::bearer;
    use crate::storage::create_test_storage;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    fn submit(ip: &str, email: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/contact")
            .insert_header(("X-Forwarded-For", ip.to_string()))
            .set_json(json!({
                "name": "Paula Reis",
                "email": email,
                "phone": "(21) 97777-1234",
                "message": "Quero agendar uma visita."
            }))
    }

    #[actix_web::test]
    async fn test_inbox_lifecycle() {
        let storage = create_test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_contact_routes),
        )
        .await;

        let req = submit("192.0.2.10", "Paula@Example.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["email"], "paula@example.com");
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/contact")
            .insert_header(bearer("admin-1", "admin"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["status"], "new");

        let req = test::TestRequest::post()
            .uri("/api/contact/update")
            .insert_header(bearer("admin-1", "admin"))
            .set_json(json!({"id": id, "status": "read"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["status"], "read");

        let req = test::TestRequest::patch()
            .uri(&format!("/api/contact/{id}"))
            .insert_header(bearer("admin-1", "admin"))
            .set_json(json!({"status": "archived"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/contact/{id}"))
            .insert_header(bearer("admin-1", "admin"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/contact/{id}"))
            .insert_header(bearer("admin-1", "admin"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn test_update_unknown_message_is_not_found() {
        let storage = create_test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_contact_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/contact/update")
            .insert_header(bearer("admin-1", "admin"))
            .set_json(json!({"id": "does-not-exist", "status": "replied"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn test_inbox_requires_admin() {
        let storage = create_test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_contact_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/contact").to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 401);

        let req = test::TestRequest::get()
            .uri("/api/contact")
            .insert_header(bearer("prof-1", "teacher"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 403);
    }

    #[actix_web::test]
    async fn test_public_form_is_rate_limited() {
        let storage = create_test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_contact_routes),
        )
        .await;

        let limit = crate::config::AppConfig::get().contact.submissions_per_minute;
        for _ in 0..limit {
            let req = submit("192.0.2.55", "x@example.com").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 200);
        }
        let req = submit("192.0.2.55", "x@example.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 429);
    }

    #[actix_web::test]
    async fn test_invalid_submission() {
        let storage = create_test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_contact_routes),
        )
        .await;

        let req = submit("192.0.2.77", "not-an-email").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid email");
    }
}
