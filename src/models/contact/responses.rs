use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 公开提交成功后只回显部分字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactSubmittedResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}
