use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::AttendanceRecord;

// 批量出勤提交结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RecordAttendanceResponse {
    pub saved_count: usize,
    pub skipped_count: usize,
    pub attendance: Vec<AttendanceRecord>,
}

// 清空出勤结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct ClearAttendanceResponse {
    pub deleted_count: u64,
}
