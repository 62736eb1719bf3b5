pub mod delete;
pub mod list;
pub mod submit;
pub mod update_status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::contact::requests::{
    ContactListParams, PatchContactStatusRequest, SubmitContactRequest,
    UpdateContactStatusRequest,
};
use crate::storage::Storage;

pub struct ContactService {
    storage: Option<Arc<dyn Storage>>,
}

impl ContactService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 公开提交留言
    pub async fn submit_message(
        &self,
        request: &HttpRequest,
        body: SubmitContactRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_message(self, request, body).await
    }

    // 列出留言
    pub async fn list_messages(
        &self,
        request: &HttpRequest,
        params: ContactListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_messages(self, request, params).await
    }

    // 更新留言状态（请求体携带 id）
    pub async fn update_status(
        &self,
        request: &HttpRequest,
        body: UpdateContactStatusRequest,
    ) -> ActixResult<HttpResponse> {
        update_status::update_status(self, request, body.id, body.status).await
    }

    // 更新留言状态（路径携带 id）
    pub async fn patch_status(
        &self,
        request: &HttpRequest,
        id: String,
        body: PatchContactStatusRequest,
    ) -> ActixResult<HttpResponse> {
        update_status::update_status(self, request, Some(id), body.status).await
    }

    // 删除留言
    pub async fn delete_message(
        &self,
        request: &HttpRequest,
        id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_message(self, request, id).await
    }
}
