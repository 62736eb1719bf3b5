use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 留言状态：new -> read -> replied
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub enum ContactStatus {
    New,     // 新留言
    Read,    // 已读
    Replied, // 已回复
}

impl ContactStatus {
    pub const NEW: &'static str = "new";
    pub const READ: &'static str = "read";
    pub const REPLIED: &'static str = "replied";

    pub fn allowed() -> &'static [&'static str] {
        &[Self::NEW, Self::READ, Self::REPLIED]
    }

    /// 状态顺序，用于判断是否为前进方向的流转
    fn rank(self) -> u8 {
        match self {
            ContactStatus::New => 0,
            ContactStatus::Read => 1,
            ContactStatus::Replied => 2,
        }
    }

    /// 前进流转表：允许保持不变或向后跳转（new -> replied 合法）
    pub fn can_transition_to(self, next: ContactStatus) -> bool {
        next.rank() >= self.rank()
    }
}

impl<'de> Deserialize<'de> for ContactStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactStatus::New => write!(f, "{}", ContactStatus::NEW),
            ContactStatus::Read => write!(f, "{}", ContactStatus::READ),
            ContactStatus::Replied => write!(f, "{}", ContactStatus::REPLIED),
        }
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ContactStatus::NEW => Ok(ContactStatus::New),
            ContactStatus::READ => Ok(ContactStatus::Read),
            ContactStatus::REPLIED => Ok(ContactStatus::Replied),
            _ => Err(format!(
                "Invalid status '{s}'. Allowed statuses: {}",
                ContactStatus::allowed().join(", ")
            )),
        }
    }
}

// 联系留言
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(ContactStatus::New.can_transition_to(ContactStatus::Read));
        assert!(ContactStatus::New.can_transition_to(ContactStatus::Replied));
        assert!(ContactStatus::Read.can_transition_to(ContactStatus::Replied));
        assert!(ContactStatus::Read.can_transition_to(ContactStatus::Read));
    }

    #[test]
    fn test_backward_transitions() {
        assert!(!ContactStatus::Replied.can_transition_to(ContactStatus::New));
        assert!(!ContactStatus::Read.can_transition_to(ContactStatus::New));
    }

    #[test]
    fn test_invalid_status_message_lists_allowed() {
        let err = "archived".parse::<ContactStatus>().unwrap_err();
        assert!(err.contains("new, read, replied"));
    }
}
