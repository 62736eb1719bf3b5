use serde::Deserialize;
use ts_rs::TS;

// 公开留言提交
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct SubmitContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

// 更新留言状态（POST /contact/update）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct UpdateContactStatusRequest {
    pub id: Option<String>,
    pub status: Option<String>,
}

// 更新留言状态（PATCH /contact/{id}）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct PatchContactStatusRequest {
    pub status: Option<String>,
}

// 留言列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactListParams {
    #[serde(default, deserialize_with = "crate::models::common::empty_string_as_none")]
    pub limit: Option<u64>,
}

// 校验通过的留言（用于存储层）
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}
