use serde::Deserialize;
use ts_rs::TS;

// 班级创建/更新请求（PUT 为整体替换）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct SaveClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub teacher: Option<String>,
    pub schedule: Option<String>,
    pub capacity: Option<i32>,
    pub status: Option<String>,
}

// 校验通过的班级（用于存储层）
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub description: Option<String>,
    pub subject: String,
    pub teacher: String,
    pub schedule: Option<String>,
    pub capacity: i32,
    pub status: String,
}
