//! 作答记录实体
//!
//! (assessment_id, question_id) 唯一，写入走 upsert，绝不产生重复行。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    pub question_id: i64,
    pub weight: f64,
    pub self_score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub self_comment: Option<String>,
    pub appr1_score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub appr1_comment: Option<String>,
    pub appr2_score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub appr2_comment: Option<String>,
    pub appr3_score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub appr3_comment: Option<String>,
    pub mgr_score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mgr_comment: Option<String>,
    pub gm_score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub gm_comment: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question_response(self) -> crate::models::responses::entities::QuestionResponse {
        use chrono::{DateTime, Utc};

        crate::models::responses::entities::QuestionResponse {
            id: self.id,
            assessment_id: self.assessment_id,
            question_id: self.question_id,
            weight: self.weight,
            self_score: self.self_score,
            self_comment: self.self_comment,
            appr1_score: self.appr1_score,
            appr1_comment: self.appr1_comment,
            appr2_score: self.appr2_score,
            appr2_comment: self.appr2_comment,
            appr3_score: self.appr3_score,
            appr3_comment: self.appr3_comment,
            mgr_score: self.mgr_score,
            mgr_comment: self.mgr_comment,
            gm_score: self.gm_score,
            gm_comment: self.gm_comment,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
