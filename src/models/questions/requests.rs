use serde::Deserialize;
use ts_rs::TS;

/// 题目查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionListQuery {
    /// 按考核等级筛选
    pub level: Option<String>,
}
