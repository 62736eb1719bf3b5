pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::DominiqueError;
use crate::models::classes::requests::SaveClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 创建班级
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        body: SaveClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, body).await
    }

    // 班级列表
    pub async fn list_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_classes(self, request).await
    }

    // 更新班级
    pub async fn update_class(
        &self,
        request: &HttpRequest,
        id: String,
        body: SaveClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, id, body).await
    }

    // 删除班级
    pub async fn delete_class(&self, request: &HttpRequest, id: String) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, id).await
    }
}

fn class_error_response(err: &DominiqueError) -> HttpResponse {
    let code = match err {
        DominiqueError::Conflict(_) => ErrorCode::ClassNotEmpty,
        DominiqueError::NotFound(_) => ErrorCode::ClassNotFound,
        e if e.is_client_error() => ErrorCode::ClassValidationFailed,
        _ => ErrorCode::InternalServerError,
    };
    HttpResponse::build(err.status_code()).json(ApiResponse::error_empty(code, err.message()))
}
