pub mod attendance;
pub mod classes;
pub mod contact;
pub mod grades;
pub mod students;
pub mod system;

pub use attendance::AttendanceService;
pub use classes::ClassService;
pub use contact::ContactService;
pub use grades::GradeService;
pub use students::StudentService;
pub use system::SystemService;

use actix_web::{HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::errors::DominiqueError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app data 中获取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 业务错误转换为统一错误响应
///
/// 调用方输入错误使用 `client_code`，其余使用 `server_code`，HTTP 状态码取自错误本身。
pub(crate) fn error_response(
    err: &DominiqueError,
    client_code: ErrorCode,
    server_code: ErrorCode,
) -> HttpResponse {
    let code = if err.is_client_error() {
        client_code
    } else {
        server_code
    };
    HttpResponse::build(err.status_code()).json(ApiResponse::error_empty(code, err.message()))
}

/// 同一批次内重复的自然键只保留最后一条，位置沿用首次出现的位置
pub(crate) fn keep_last_per_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::with_capacity(items.len());
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        match positions.get(&key(&item)) {
            Some(&index) => kept[index] = item,
            None => {
                positions.insert(key(&item), kept.len());
                kept.push(item);
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_last_per_key() {
        let items = vec![("a", 1), ("b", 2), ("a", 3), ("c", 4), ("b", 5)];
        let kept = keep_last_per_key(items, |(k, _)| *k);
        assert_eq!(kept, vec![("a", 3), ("b", 5), ("c", 4)]);
    }
}
