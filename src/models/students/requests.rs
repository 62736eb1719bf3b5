use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::empty_string_as_none;

// 学生创建请求；PUT /students/{id} 使用同一请求体整体替换
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub enrollment: Option<String>,
    pub phone: Option<String>,
    pub grade: Option<String>,
    pub class_id: Option<String>,
}

// 学生列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub grade: Option<String>,
}

// 校验通过的学生（用于存储层）
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub enrollment: String,
    pub phone: String,
    pub grade: Option<String>,
    pub class_id: Option<String>,
}
