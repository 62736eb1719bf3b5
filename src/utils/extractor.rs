//! 路径参数提取器
//!
//! 对 `{id}` 做格式校验，非法 ID 直接返回 400，不会进入服务层。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

const MAX_ID_LEN: usize = 64;

/// 字符串 ID：只允许字母、数字、`-` 与 `_`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeId(pub String);

impl SafeId {
    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(raw: &str) -> bool {
        !raw.is_empty()
            && raw.len() <= MAX_ID_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl FromRequest for SafeId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();
        if Self::is_valid(raw) {
            return ready(Ok(SafeId(raw.to_string())));
        }

        let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid id: '{raw}'"),
        ));
        ready(Err(InternalError::from_response("invalid path id", response).into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(SafeId::is_valid("5f0e1c1a-2b7d-4a4e-9a6e-3f1d2c3b4a59"));
        assert!(SafeId::is_valid("msg_01"));
    }

    #[test]
    fn test_invalid_ids() {
        assert!(!SafeId::is_valid(""));
        assert!(!SafeId::is_valid("../etc/passwd"));
        assert!(!SafeId::is_valid("a b"));
        assert!(!SafeId::is_valid(&"x".repeat(65)));
    }
}
