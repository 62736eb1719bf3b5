pub mod clear;
pub mod list;
pub mod mark_all_present;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListQuery, ClearAttendanceQuery, MarkAllPresentRequest, RecordAttendanceRequest,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 批量录入出勤
    pub async fn record_attendance(
        &self,
        request: &HttpRequest,
        body: RecordAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_attendance(self, request, body).await
    }

    // 查询出勤
    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, query).await
    }

    // 全班标记出席
    pub async fn mark_all_present(
        &self,
        request: &HttpRequest,
        body: MarkAllPresentRequest,
    ) -> ActixResult<HttpResponse> {
        mark_all_present::mark_all_present(self, request, body).await
    }

    // 清空某天某班的出勤
    pub async fn clear_attendance(
        &self,
        request: &HttpRequest,
        query: ClearAttendanceQuery,
    ) -> ActixResult<HttpResponse> {
        clear::clear_attendance(self, request, query).await
    }
}
