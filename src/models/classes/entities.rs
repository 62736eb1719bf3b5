use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 班级（教学班），学生通过 classId 归属
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct SchoolClass {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub subject: String,
    pub teacher: String,
    pub schedule: Option<String>,
    pub capacity: i32,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SchoolClass {
    pub const STATUS_ACTIVE: &'static str = "active";
    pub const DEFAULT_CAPACITY: i32 = 30;
}

// 列表项：班级及其学生人数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassSummary {
    pub class: SchoolClass,
    pub student_count: u64,
}
