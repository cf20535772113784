use serde::Deserialize;
use ts_rs::TS;

use super::entities::NotificationKind;
use crate::models::common::pagination::PaginationQuery;

/// 创建通知（内部使用，由状态机转移成功后触发）
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub employee_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub content: Option<String>,
    pub assessment_id: i64,
}

/// 通知列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    /// 只看未读
    pub unread_only: Option<bool>,
}
