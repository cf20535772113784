use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 通知类型：状态机每次前进/终止的事件种类
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationKind {
    /// 轮到收件人审批
    ApprovalRequired,
    /// 考核完成（发给被考核员工）
    Approved,
    /// 被驳回（发给被考核员工）
    Rejected,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::ApprovalRequired => "approval_required",
            NotificationKind::Approved => "approved",
            NotificationKind::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approval_required" => Ok(NotificationKind::ApprovalRequired),
            "approved" => Ok(NotificationKind::Approved),
            "rejected" => Ok(NotificationKind::Rejected),
            _ => Err(format!("Invalid notification kind: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for NotificationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<NotificationKind>()
            .map_err(serde::de::Error::custom)
    }
}

/// 通知实体。投递机制不在本服务范围内，这里只负责落库与查询。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    /// 收件员工
    pub employee_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub content: Option<String>,
    /// 关联的考核单
    pub assessment_id: i64,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
