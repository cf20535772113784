use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    // 唯一 ID
    pub id: i64,
    // 考核项内容
    pub content: String,
    // 权重（百分比，题目集内合计约 100）
    pub weight: f64,
    // 评分上限，默认 5 分制
    pub max_score: f64,
    // 适用的考核等级
    pub applicable_level: String,
    // 展示顺序，不参与计分
    pub sort_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
