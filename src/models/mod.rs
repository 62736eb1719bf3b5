pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod contact;
pub mod grades;
pub mod students;
pub mod system;

pub use common::{ApiResponse, ErrorCode};

/// 程序启动时间，用于计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
