pub mod list;
pub mod record;
pub mod sheet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::{GradeListQuery, GradeSheetQuery, RecordGradesRequest};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 批量录入学期成绩
    pub async fn record_grades(
        &self,
        request: &HttpRequest,
        body: RecordGradesRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_grades(self, request, body).await
    }

    // 查询成绩
    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        query: GradeListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }

    // 班级成绩单
    pub async fn grade_sheet(
        &self,
        request: &HttpRequest,
        query: GradeSheetQuery,
    ) -> ActixResult<HttpResponse> {
        sheet::grade_sheet(self, request, query).await
    }
}
