use serde::Deserialize;
use ts_rs::TS;

/// 单题评分输入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct ScoreItem {
    pub question_id: i64,
    pub score: f64,
    pub comment: Option<String>,
}

/// 暂存评分请求（本人或当前审批人）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct SaveScoresRequest {
    pub items: Vec<ScoreItem>,
}

/// 作答 upsert 输入：service 层校验通过后组装，weight 取自题目快照。
/// 冲突时只覆盖对应评分人的字段，weight 保持首次写入的冻结值。
#[derive(Debug, Clone)]
pub struct ResponseUpsert {
    pub question_id: i64,
    pub weight: f64,
    pub score: f64,
    pub comment: Option<String>,
}
