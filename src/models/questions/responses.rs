use serde::Serialize;
use ts_rs::TS;

use super::entities::Question;

/// 题目列表响应（按等级过滤后的完整题目集，无分页）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionListResponse {
    pub items: Vec<Question>,
}
