pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::DominiqueError;
use crate::models::students::requests::{CreateStudentRequest, StudentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 登记学生
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        body: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, body).await
    }

    // 花名册
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    // 更新学生
    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: String,
        body: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, id, body).await
    }

    // 删除学生
    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, id).await
    }
}

/// 学生相关错误响应，冲突类错误使用调用方给出的业务码
fn student_error_response(err: &DominiqueError, conflict_code: ErrorCode) -> HttpResponse {
    let code = match err {
        DominiqueError::Conflict(_) => conflict_code,
        DominiqueError::NotFound(_) => ErrorCode::StudentNotFound,
        e if e.is_client_error() => ErrorCode::StudentValidationFailed,
        _ => ErrorCode::InternalServerError,
    };
    HttpResponse::build(err.status_code()).json(ApiResponse::error_empty(code, err.message()))
}
