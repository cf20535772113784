use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assessment, AssessmentStatus, StageDecision};
use crate::models::PaginationInfo;
use crate::models::employees::entities::ChainSlot;
use crate::models::responses::entities::QuestionResponse;
use crate::models::scores::entities::ScoreResult;

/// 被考核员工信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentSubject {
    pub id: i64,
    pub emp_code: String,
    pub display_name: Option<String>,
    pub level: String,
}

/// 单个槽位的审计视图
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct StageAuditView {
    pub slot: ChainSlot,
    /// 该槽位上配置的审批人工号，未配置为 None
    pub occupant: Option<String>,
    pub status: Option<StageDecision>,
    pub date: Option<String>,
    pub note: Option<String>,
}

/// 考核单详情响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentDetailResponse {
    pub assessment: Assessment,
    pub subject: Option<AssessmentSubject>,
    pub stages: Vec<StageAuditView>,
    pub responses: Vec<QuestionResponse>,
}

/// 状态转移结果：新状态 + 下一个操作人
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct TransitionResponse {
    pub id: i64,
    pub status: AssessmentStatus,
    pub current_stage: Option<String>,
    /// 完成时的合成得分快照
    pub final_score: Option<f64>,
}

/// 考核单列表项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListItem {
    pub id: i64,
    pub title: String,
    pub target_level: String,
    pub status: AssessmentStatus,
    pub current_stage: Option<String>,
    pub subject: Option<AssessmentSubject>,
    pub final_score: Option<f64>,
    pub submitted_at: Option<String>,
    pub created_at: String,
}

/// 考核单列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListResponse {
    pub items: Vec<AssessmentListItem>,
    pub pagination: PaginationInfo,
}

/// 考核结果响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentResultResponse {
    pub assessment_id: i64,
    pub status: AssessmentStatus,
    pub result: ScoreResult,
}
