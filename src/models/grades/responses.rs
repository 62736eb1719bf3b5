use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::BimesterGrade;

// 批量成绩提交结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordGradesResponse {
    pub saved_count: usize,
    pub grades: Vec<BimesterGrade>,
}
