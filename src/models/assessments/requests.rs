use serde::Deserialize;
use ts_rs::TS;

use crate::models::employees::entities::ChainSlot;
use crate::models::responses::requests::ScoreItem;

/// 创建考核单（hr_admin）。employee_id 为空时创建 draft 模板，
/// 指定员工时直接进入 assigned。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateAssessmentRequest {
    pub title: String,
    pub employee_id: Option<i64>,
    /// 模板的目标等级；绑定员工时默认取员工等级
    pub target_level: Option<String>,
}

/// 将 draft 模板绑定到员工
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssignAssessmentRequest {
    pub employee_id: i64,
}

/// 员工提交自评，附带（可为增量的）自评分数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct SubmitSelfAssessmentRequest {
    #[serde(default)]
    pub items: Vec<ScoreItem>,
}

/// 当前审批人通过
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ApproveAssessmentRequest {
    pub role: ChainSlot,
    pub note: Option<String>,
}

/// 当前审批人驳回
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct RejectAssessmentRequest {
    pub role: ChainSlot,
    pub reason: String,
}

/// 考核单列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// 按被考核员工筛选
    pub employee_id: Option<i64>,
    /// 按状态筛选
    pub status: Option<String>,
    /// 只看等待指定工号操作的考核单
    pub pending_for: Option<String>,
}
