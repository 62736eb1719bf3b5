use serde::Deserialize;
use ts_rs::TS;

use super::entities::NoteTriple;
use crate::models::common::empty_string_as_none;

// 单个学生的成绩提交（来自HTTP请求，字段在校验层统一检查）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSubmission {
    pub student_id: Option<String>,
    pub student_name: Option<String>,
    pub subject: Option<String>,
    pub class_id: Option<String>,
    pub bimester: Option<serde_json::Value>,
    pub note1: Option<serde_json::Value>,
    pub note2: Option<serde_json::Value>,
    pub note3: Option<serde_json::Value>,
}

// 批量成绩提交请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordGradesRequest {
    pub grades_data: Option<Vec<GradeSubmission>>,
}

// 成绩查询参数（所有条件可选，按 AND 组合）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub class_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub bimester: Option<i32>,
}

// 成绩单查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub class_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub bimester: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub subject: Option<String>,
}

// 校验通过的成绩（用于存储层）
#[derive(Debug, Clone)]
pub struct NewBimesterGrade {
    pub student_id: String,
    pub student_name: Option<String>,
    pub subject: String,
    pub class_id: String,
    pub bimester: i32,
    pub notes: NoteTriple,
}
