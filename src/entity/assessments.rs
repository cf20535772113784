//! 考核单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub employee_id: Option<i64>,
    pub title: String,
    pub target_level: String,
    pub status: String,
    pub current_stage: Option<String>,
    pub appr1_status: Option<String>,
    pub appr1_date: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub appr1_note: Option<String>,
    pub appr2_status: Option<String>,
    pub appr2_date: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub appr2_note: Option<String>,
    pub appr3_status: Option<String>,
    pub appr3_date: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub appr3_note: Option<String>,
    pub mgr_status: Option<String>,
    pub mgr_date: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mgr_note: Option<String>,
    pub gm_status: Option<String>,
    pub gm_date: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub gm_note: Option<String>,
    pub rejection_stage: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,
    pub final_score: Option<f64>,
    pub submitted_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id"
    )]
    Employee,
    #[sea_orm(has_many = "super::responses::Entity")]
    Responses,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responses.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use crate::models::assessments::entities::{Assessment, AssessmentStatus, StageDecision};
        use crate::models::employees::entities::ChainSlot;
        use chrono::{DateTime, Utc};

        let ts = |v: Option<i64>| v.map(|t| DateTime::<Utc>::from_timestamp(t, 0).unwrap_or_default());
        let decision = |v: Option<String>| v.and_then(|s| s.parse::<StageDecision>().ok());

        Assessment {
            id: self.id,
            employee_id: self.employee_id,
            title: self.title,
            target_level: self.target_level,
            status: self
                .status
                .parse::<AssessmentStatus>()
                .unwrap_or(AssessmentStatus::Draft),
            current_stage: self.current_stage,
            appr1_status: decision(self.appr1_status),
            appr1_date: ts(self.appr1_date),
            appr1_note: self.appr1_note,
            appr2_status: decision(self.appr2_status),
            appr2_date: ts(self.appr2_date),
            appr2_note: self.appr2_note,
            appr3_status: decision(self.appr3_status),
            appr3_date: ts(self.appr3_date),
            appr3_note: self.appr3_note,
            mgr_status: decision(self.mgr_status),
            mgr_date: ts(self.mgr_date),
            mgr_note: self.mgr_note,
            gm_status: decision(self.gm_status),
            gm_date: ts(self.gm_date),
            gm_note: self.gm_note,
            rejection_stage: self
                .rejection_stage
                .and_then(|s| s.parse::<ChainSlot>().ok()),
            rejection_reason: self.rejection_reason,
            final_score: self.final_score,
            submitted_at: ts(self.submitted_at),
            completed_at: ts(self.completed_at),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
