use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::UserRole;
use crate::models::grades::requests::{GradeListQuery, GradeSheetQuery, RecordGradesRequest};
use crate::services::GradeService;

// 懒加载的全局 GRADE_SERVICE 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// HTTP处理程序
pub async fn record_grades(
    req: HttpRequest,
    body: web::Json<RecordGradesRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.record_grades(&req, body.into_inner()).await
}

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

pub async fn grade_sheet(
    req: HttpRequest,
    query: web::Query<GradeSheetQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.grade_sheet(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                // 所有登录用户可查询，学生只能看到自己的成绩
                web::resource("").route(web::get().to(list_grades)).route(
                    web::post()
                        .to(record_grades)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/sheet").route(
                    web::get()
                        .to(grade_sheet)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::NewStudent;
    use crate::routes::test_support::bearer;
    use crate::storage::create_test_storage;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_record_and_list_grades() {
        let storage = create_test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_grades_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/grades")
            .insert_header(bearer("prof-1", "teacher"))
            .set_json(json!({
                "gradesData": [
                    {"studentId": "S1", "subject": "Matemática", "classId": "7ano",
                     "bimester": 1, "note1": 8, "note2": "7", "note3": ""},
                    {"studentId": "S2", "subject": "Matemática", "classId": "7ano",
                     "bimester": "1", "note1": 4}
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["savedCount"], 2);

        let req = test::TestRequest::get()
            .uri("/api/grades?classId=7ano&bimester=1")
            .insert_header(bearer("admin-1", "admin"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_invalid_batch_writes_nothing() {
        let storage = create_test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_grades_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/grades")
            .insert_header(bearer("prof-1", "teacher"))
            .set_json(json!({
                "gradesData": [
                    {"studentId": "S1", "subject": "História", "classId": "7ano",
                     "bimester": 2, "note1": 9},
                    {"studentId": "S2", "subject": "História", "classId": "7ano",
                     "bimester": 5, "note1": 9}
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("gradesData[1]"));

        let stored = storage
            .list_bimester_grades(GradeListQuery::default())
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[actix_web::test]
    async fn test_student_sees_only_own_grades() {
        let storage = create_test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_grades_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/grades")
            .insert_header(bearer("prof-1", "teacher"))
            .set_json(json!({
                "gradesData": [
                    {"studentId": "S1", "subject": "Ciências", "classId": "7ano",
                     "bimester": 3, "note1": 10},
                    {"studentId": "S2", "subject": "Ciências", "classId": "7ano",
                     "bimester": 3, "note1": 5}
                ]
            }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get()
            .uri("/api/grades?studentId=S2")
            .insert_header(bearer("S1", "student"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let grades = body["data"].as_array().unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0]["studentId"], "S1");
    }

    #[actix_web::test]
    async fn test_access_control() {
        let storage = create_test_storage().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_grades_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/grades").to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 401);

        let req = test::TestRequest::post()
            .uri("/api/grades")
            .insert_header(bearer("S1", "student"))
            .set_json(json!({"gradesData": []}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 403);

        let req = test::TestRequest::get()
            .uri("/api/grades/sheet?classId=7ano&bimester=1&subject=Artes")
            .insert_header(bearer("S1", "student"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 403);
    }

    #[actix_web::test]
    async fn test_grade_sheet() {
        let storage = create_test_storage().await;
        for (name, email, enrollment) in [
            ("Carla", "carla@escola.com", "1001"),
            ("Bruno", "bruno@escola.com", "1002"),
        ] {
            storage
                .create_student(NewStudent {
                    name: name.to_string(),
                    email: email.to_string(),
                    enrollment: enrollment.to_string(),
                    phone: String::new(),
                    grade: Some("7ano".to_string()),
                    class_id: None,
                })
                .await
                .unwrap();
        }
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_grades_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/grades/sheet?classId=7ano&bimester=1&subject=Artes")
            .insert_header(bearer("prof-1", "teacher"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["studentName"], "Bruno");
        assert!(rows[0]["average"].is_null());

        let req = test::TestRequest::get()
            .uri("/api/grades/sheet?classId=7ano")
            .insert_header(bearer("prof-1", "teacher"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);
    }
}
