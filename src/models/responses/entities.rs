use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::employees::entities::ChainSlot;

// 评分人字段：本人自评 + 五个审批槽位
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub enum GraderRole {
    SelfEval,
    Appr1,
    Appr2,
    Appr3,
    Manager,
    Gm,
}

impl GraderRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraderRole::SelfEval => "self",
            GraderRole::Appr1 => "appr1",
            GraderRole::Appr2 => "appr2",
            GraderRole::Appr3 => "appr3",
            GraderRole::Manager => "mgr",
            GraderRole::Gm => "gm",
        }
    }

    /// 对应的审批槽位（自评没有槽位）
    pub fn as_slot(&self) -> Option<ChainSlot> {
        match self {
            GraderRole::SelfEval => None,
            GraderRole::Appr1 => Some(ChainSlot::Appr1),
            GraderRole::Appr2 => Some(ChainSlot::Appr2),
            GraderRole::Appr3 => Some(ChainSlot::Appr3),
            GraderRole::Manager => Some(ChainSlot::Manager),
            GraderRole::Gm => Some(ChainSlot::Gm),
        }
    }

    /// 审批通过前是否要求评完全部题目。
    /// manager/gm 只复核不计分，放行零评分审批。
    pub fn requires_full_scores(&self) -> bool {
        !matches!(self, GraderRole::Manager | GraderRole::Gm)
    }
}

impl From<ChainSlot> for GraderRole {
    fn from(slot: ChainSlot) -> Self {
        match slot {
            ChainSlot::Appr1 => GraderRole::Appr1,
            ChainSlot::Appr2 => GraderRole::Appr2,
            ChainSlot::Appr3 => GraderRole::Appr3,
            ChainSlot::Manager => GraderRole::Manager,
            ChainSlot::Gm => GraderRole::Gm,
        }
    }
}

impl std::fmt::Display for GraderRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GraderRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(GraderRole::SelfEval),
            "appr1" => Ok(GraderRole::Appr1),
            "appr2" => Ok(GraderRole::Appr2),
            "appr3" => Ok(GraderRole::Appr3),
            "mgr" => Ok(GraderRole::Manager),
            "gm" => Ok(GraderRole::Gm),
            _ => Err(format!("Invalid grader role: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for GraderRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<GraderRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的评分角色: '{s}'. 支持的角色: self, appr1, appr2, appr3, mgr, gm"
            ))
        })
    }
}

/// 单条考核项的作答记录，按 (assessment_id, question_id) 唯一。
/// 每个评分人一组 score/comment 字段，互相独立、未评前为 None。
/// weight 在首次写入时从题目快照而来，题库后续修改不影响已记录的作答。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/response.ts")]
pub struct QuestionResponse {
    pub id: i64,
    pub assessment_id: i64,
    pub question_id: i64,
    /// 写入时冻结的题目权重
    pub weight: f64,
    pub self_score: Option<f64>,
    pub self_comment: Option<String>,
    pub appr1_score: Option<f64>,
    pub appr1_comment: Option<String>,
    pub appr2_score: Option<f64>,
    pub appr2_comment: Option<String>,
    pub appr3_score: Option<f64>,
    pub appr3_comment: Option<String>,
    pub mgr_score: Option<f64>,
    pub mgr_comment: Option<String>,
    pub gm_score: Option<f64>,
    pub gm_comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl QuestionResponse {
    /// 某个评分人在本题上的分数
    pub fn score_for(&self, grader: GraderRole) -> Option<f64> {
        match grader {
            GraderRole::SelfEval => self.self_score,
            GraderRole::Appr1 => self.appr1_score,
            GraderRole::Appr2 => self.appr2_score,
            GraderRole::Appr3 => self.appr3_score,
            GraderRole::Manager => self.mgr_score,
            GraderRole::Gm => self.gm_score,
        }
    }

    pub fn comment_for(&self, grader: GraderRole) -> Option<&str> {
        match grader {
            GraderRole::SelfEval => self.self_comment.as_deref(),
            GraderRole::Appr1 => self.appr1_comment.as_deref(),
            GraderRole::Appr2 => self.appr2_comment.as_deref(),
            GraderRole::Appr3 => self.appr3_comment.as_deref(),
            GraderRole::Manager => self.mgr_comment.as_deref(),
            GraderRole::Gm => self.gm_comment.as_deref(),
        }
    }
}
