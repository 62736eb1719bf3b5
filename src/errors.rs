//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - status_code() 方法 - 返回对应的 HTTP 状态码
/// - 便捷构造函数
macro_rules! define_dominique_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DominiqueError {
            $($variant(String),)*
        }

        impl DominiqueError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DominiqueError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DominiqueError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DominiqueError::$variant(msg) => msg,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn status_code(&self) -> StatusCode {
                match self {
                    $(DominiqueError::$variant(_) => StatusCode::$status,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl DominiqueError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DominiqueError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_dominique_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E004", "Validation Error", BAD_REQUEST),
    InvalidStatus("E005", "Invalid Status", BAD_REQUEST),
    NotFound("E006", "Resource Not Found", NOT_FOUND),
    Conflict("E007", "Resource Conflict", CONFLICT),
    Serialization("E008", "Serialization Error", INTERNAL_SERVER_ERROR),
    DateParse("E009", "Date Parse Error", BAD_REQUEST),
    Authentication("E010", "Authentication Error", UNAUTHORIZED),
    Authorization("E011", "Authorization Error", FORBIDDEN),
}

impl DominiqueError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为调用方输入导致的错误（4xx）
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl fmt::Display for DominiqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DominiqueError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for DominiqueError {
    fn from(err: sea_orm::DbErr) -> Self {
        DominiqueError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DominiqueError {
    fn from(err: serde_json::Error) -> Self {
        DominiqueError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DominiqueError {
    fn from(err: chrono::ParseError) -> Self {
        DominiqueError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DominiqueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DominiqueError::database_config("test").code(), "E001");
        assert_eq!(DominiqueError::validation("test").code(), "E004");
        assert_eq!(DominiqueError::not_found("test").code(), "E006");
        assert_eq!(DominiqueError::authentication("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DominiqueError::conflict("test").error_type(),
            "Resource Conflict"
        );
        assert_eq!(
            DominiqueError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            DominiqueError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DominiqueError::invalid_status("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DominiqueError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DominiqueError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            DominiqueError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(DominiqueError::validation("x").is_client_error());
        assert!(!DominiqueError::database_operation("x").is_client_error());
    }

    #[test]
    fn test_format_simple() {
        let err = DominiqueError::validation("gradesData[0]: missing field studentId");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("studentId"));
    }

    #[test]
    fn test_db_err_conversion() {
        let err: DominiqueError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("boom"));
    }
}
