use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::empty_string_as_none;

// 单条出勤提交（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSubmission {
    pub student_id: Option<String>,
    pub class_id: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub observations: Option<String>,
}

// 批量出勤提交请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RecordAttendanceRequest {
    pub attendance_data: Option<Vec<AttendanceSubmission>>,
}

// 全班标记出席请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAllPresentRequest {
    #[serde(default)]
    pub student_ids: Vec<String>,
    pub date: Option<String>,
    pub class_id: Option<String>,
}

// 出勤查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub class_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub student_id: Option<String>,
}

// 清空某天某班出勤的参数（两者都必填）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct ClearAttendanceQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub class_id: Option<String>,
}

// 校验通过的出勤记录（用于存储层）
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: String,
    pub class_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    pub observations: Option<String>,
}
