use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生（花名册）
//
// `grade` 是年级/班级分组键（如 "7ano"），与成绩、出勤中的 classId 对应；
// `class_id` 指向 classes 表中的班级，可为空。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub enrollment: String,
    pub phone: String,
    pub grade: Option<String>,
    pub class_id: Option<String>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub const STATUS_ACTIVE: &'static str = "active";
}
