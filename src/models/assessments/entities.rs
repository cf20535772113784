use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::employees::entities::{ChainSlot, Employee};

// 考核单生命周期状态
//
// draft → assigned → in_progress → submitted_* →（逐级审批）→ completed
// 任一 submitted_* 状态可被驳回到 rejected，员工修改后重新提交，
// 审批链从头开始。rejected 不是终态。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum AssessmentStatus {
    Draft,
    Assigned,
    InProgress,
    SubmittedAppr1,
    SubmittedAppr2,
    SubmittedAppr3,
    SubmittedMgr,
    SubmittedGm,
    Completed,
    Rejected,
}

impl AssessmentStatus {
    /// 某个审批槽位对应的待审状态
    pub fn pending_for(slot: ChainSlot) -> Self {
        match slot {
            ChainSlot::Appr1 => AssessmentStatus::SubmittedAppr1,
            ChainSlot::Appr2 => AssessmentStatus::SubmittedAppr2,
            ChainSlot::Appr3 => AssessmentStatus::SubmittedAppr3,
            ChainSlot::Manager => AssessmentStatus::SubmittedMgr,
            ChainSlot::Gm => AssessmentStatus::SubmittedGm,
        }
    }

    /// 当前等待哪个槽位审批；非待审状态返回 None。
    /// current_stage 里的工号必须与该槽位上的审批人一致，
    /// 这个对应关系只在这里推导，不靠手工同步。
    pub fn pending_slot(&self) -> Option<ChainSlot> {
        match self {
            AssessmentStatus::SubmittedAppr1 => Some(ChainSlot::Appr1),
            AssessmentStatus::SubmittedAppr2 => Some(ChainSlot::Appr2),
            AssessmentStatus::SubmittedAppr3 => Some(ChainSlot::Appr3),
            AssessmentStatus::SubmittedMgr => Some(ChainSlot::Manager),
            AssessmentStatus::SubmittedGm => Some(ChainSlot::Gm),
            _ => None,
        }
    }

    /// 员工是否可在该状态下提交自评
    pub fn can_submit(&self) -> bool {
        matches!(
            self,
            AssessmentStatus::Assigned | AssessmentStatus::InProgress | AssessmentStatus::Rejected
        )
    }

    /// 员工是否可在该状态下暂存自评分数
    pub fn can_self_score(&self) -> bool {
        self.can_submit()
    }

    pub fn is_terminal(&self) -> bool {
        // rejected 是回到员工手里的返回路径，不是终态
        matches!(self, AssessmentStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Draft => "draft",
            AssessmentStatus::Assigned => "assigned",
            AssessmentStatus::InProgress => "in_progress",
            AssessmentStatus::SubmittedAppr1 => "submitted_appr1",
            AssessmentStatus::SubmittedAppr2 => "submitted_appr2",
            AssessmentStatus::SubmittedAppr3 => "submitted_appr3",
            AssessmentStatus::SubmittedMgr => "submitted_mgr",
            AssessmentStatus::SubmittedGm => "submitted_gm",
            AssessmentStatus::Completed => "completed",
            AssessmentStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssessmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssessmentStatus::Draft),
            "assigned" => Ok(AssessmentStatus::Assigned),
            "in_progress" => Ok(AssessmentStatus::InProgress),
            "submitted_appr1" => Ok(AssessmentStatus::SubmittedAppr1),
            "submitted_appr2" => Ok(AssessmentStatus::SubmittedAppr2),
            "submitted_appr3" => Ok(AssessmentStatus::SubmittedAppr3),
            "submitted_mgr" => Ok(AssessmentStatus::SubmittedMgr),
            "submitted_gm" => Ok(AssessmentStatus::SubmittedGm),
            "completed" => Ok(AssessmentStatus::Completed),
            "rejected" => Ok(AssessmentStatus::Rejected),
            _ => Err(format!("Invalid assessment status: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for AssessmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AssessmentStatus>()
            .map_err(serde::de::Error::custom)
    }
}

// 单个槽位的审批结论
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum StageDecision {
    Approved,
    Rejected,
}

impl std::fmt::Display for StageDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageDecision::Approved => write!(f, "approved"),
            StageDecision::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for StageDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(StageDecision::Approved),
            "rejected" => Ok(StageDecision::Rejected),
            _ => Err(format!("Invalid stage decision: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for StageDecision {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<StageDecision>().map_err(serde::de::Error::custom)
    }
}

// 考核单实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Assessment {
    pub id: i64,
    /// 被考核员工；draft 模板阶段尚未绑定时为 None
    pub employee_id: Option<i64>,
    pub title: String,
    pub target_level: String,
    pub status: AssessmentStatus,
    /// 下一个应当操作的工号，无人待操作时为 None
    pub current_stage: Option<String>,
    pub appr1_status: Option<StageDecision>,
    pub appr1_date: Option<chrono::DateTime<chrono::Utc>>,
    pub appr1_note: Option<String>,
    pub appr2_status: Option<StageDecision>,
    pub appr2_date: Option<chrono::DateTime<chrono::Utc>>,
    pub appr2_note: Option<String>,
    pub appr3_status: Option<StageDecision>,
    pub appr3_date: Option<chrono::DateTime<chrono::Utc>>,
    pub appr3_note: Option<String>,
    pub mgr_status: Option<StageDecision>,
    pub mgr_date: Option<chrono::DateTime<chrono::Utc>>,
    pub mgr_note: Option<String>,
    pub gm_status: Option<StageDecision>,
    pub gm_date: Option<chrono::DateTime<chrono::Utc>>,
    pub gm_note: Option<String>,
    pub rejection_stage: Option<ChainSlot>,
    pub rejection_reason: Option<String>,
    /// 完成时落库的合成得分快照，查询结果时始终以重新计算为准
    pub final_score: Option<f64>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// 某槽位的审计三元组 (结论, 时间, 备注)
    pub fn stage_audit(
        &self,
        slot: ChainSlot,
    ) -> (
        Option<StageDecision>,
        Option<chrono::DateTime<chrono::Utc>>,
        Option<&str>,
    ) {
        match slot {
            ChainSlot::Appr1 => (self.appr1_status, self.appr1_date, self.appr1_note.as_deref()),
            ChainSlot::Appr2 => (self.appr2_status, self.appr2_date, self.appr2_note.as_deref()),
            ChainSlot::Appr3 => (self.appr3_status, self.appr3_date, self.appr3_note.as_deref()),
            ChainSlot::Manager => (self.mgr_status, self.mgr_date, self.mgr_note.as_deref()),
            ChainSlot::Gm => (self.gm_status, self.gm_date, self.gm_note.as_deref()),
        }
    }
}

/// 提交自评后的目标状态：审批链第一个非空槽位的待审状态，
/// 链为空则直接 completed（允许无审批人的员工，不视为错误）。
pub fn submit_target(employee: &Employee) -> (AssessmentStatus, Option<String>) {
    match employee.next_populated_slot(None) {
        Some((slot, code)) => (AssessmentStatus::pending_for(slot), Some(code.to_string())),
        None => (AssessmentStatus::Completed, None),
    }
}

/// 某槽位审批通过后的目标状态：下一个非空槽位或 completed
pub fn advance_target(employee: &Employee, current: ChainSlot) -> (AssessmentStatus, Option<String>) {
    match employee.next_populated_slot(Some(current)) {
        Some((slot, code)) => (AssessmentStatus::pending_for(slot), Some(code.to_string())),
        None => (AssessmentStatus::Completed, None),
    }
}

/// 状态机单次转移的写入集合，storage 层在一个事务里按
/// 期望状态条件更新并应用这些字段。
#[derive(Debug, Clone)]
pub struct AssessmentTransition {
    pub status: AssessmentStatus,
    pub current_stage: Option<String>,
    /// 本次转移落的槽位审计（审批/驳回时有值）
    pub stage_audit: Option<StageAuditEntry>,
    pub rejection: Option<RejectionInfo>,
    pub set_submitted_at: bool,
    pub set_completed_at: bool,
    /// 重新提交时清空五组审计字段与驳回信息
    pub clear_stage_audits: bool,
    pub final_score: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct StageAuditEntry {
    pub slot: ChainSlot,
    pub decision: StageDecision,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RejectionInfo {
    pub stage: ChainSlot,
    pub reason: String,
}

impl AssessmentTransition {
    pub fn new(status: AssessmentStatus, current_stage: Option<String>) -> Self {
        Self {
            status,
            current_stage,
            stage_audit: None,
            rejection: None,
            set_submitted_at: false,
            set_completed_at: false,
            clear_stage_audits: false,
            final_score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employees::entities::{EmployeeRole, EmployeeStatus};

    fn employee_with_chain(
        approver1: Option<&str>,
        approver2: Option<&str>,
        approver3: Option<&str>,
        manager: Option<&str>,
        gm: Option<&str>,
    ) -> Employee {
        Employee {
            id: 1,
            emp_code: "E001".to_string(),
            email: "e001@example.com".to_string(),
            password_hash: String::new(),
            display_name: None,
            role: EmployeeRole::Employee,
            status: EmployeeStatus::Active,
            level: "L2".to_string(),
            warning_count: 0,
            approver1: approver1.map(String::from),
            approver2: approver2.map(String::from),
            approver3: approver3.map(String::from),
            manager: manager.map(String::from),
            gm: gm.map(String::from),
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            AssessmentStatus::Draft,
            AssessmentStatus::Assigned,
            AssessmentStatus::InProgress,
            AssessmentStatus::SubmittedAppr1,
            AssessmentStatus::SubmittedMgr,
            AssessmentStatus::SubmittedGm,
            AssessmentStatus::Completed,
            AssessmentStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<AssessmentStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_pending_slot_matches_pending_for() {
        for slot in ChainSlot::ALL {
            assert_eq!(AssessmentStatus::pending_for(slot).pending_slot(), Some(slot));
        }
        assert_eq!(AssessmentStatus::Draft.pending_slot(), None);
        assert_eq!(AssessmentStatus::Completed.pending_slot(), None);
    }

    #[test]
    fn test_submit_target_empty_chain_completes_immediately() {
        let emp = employee_with_chain(None, None, None, None, None);
        let (status, stage) = submit_target(&emp);
        assert_eq!(status, AssessmentStatus::Completed);
        assert_eq!(stage, None);
    }

    #[test]
    fn test_sparse_chain_walk() {
        // 链 [X, -, -, Y, Z]：submitted_appr1 → submitted_mgr → submitted_gm → completed
        let emp = employee_with_chain(Some("X"), None, None, Some("Y"), Some("Z"));

        let (status, stage) = submit_target(&emp);
        assert_eq!(status, AssessmentStatus::SubmittedAppr1);
        assert_eq!(stage.as_deref(), Some("X"));

        let (status, stage) = advance_target(&emp, ChainSlot::Appr1);
        assert_eq!(status, AssessmentStatus::SubmittedMgr);
        assert_eq!(stage.as_deref(), Some("Y"));

        let (status, stage) = advance_target(&emp, ChainSlot::Manager);
        assert_eq!(status, AssessmentStatus::SubmittedGm);
        assert_eq!(stage.as_deref(), Some("Z"));

        let (status, stage) = advance_target(&emp, ChainSlot::Gm);
        assert_eq!(status, AssessmentStatus::Completed);
        assert_eq!(stage, None);
    }

    #[test]
    fn test_can_submit_states() {
        assert!(AssessmentStatus::Assigned.can_submit());
        assert!(AssessmentStatus::InProgress.can_submit());
        assert!(AssessmentStatus::Rejected.can_submit());
        assert!(!AssessmentStatus::Draft.can_submit());
        assert!(!AssessmentStatus::SubmittedAppr1.can_submit());
        assert!(!AssessmentStatus::Completed.can_submit());
    }

    #[test]
    fn test_completed_is_only_terminal_state() {
        assert!(AssessmentStatus::Completed.is_terminal());
        assert!(!AssessmentStatus::Rejected.is_terminal());
        assert!(!AssessmentStatus::SubmittedGm.is_terminal());
    }
}
