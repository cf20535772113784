//! 作答记录存储操作
//!
//! 写入以 (assessment_id, question_id) 为冲突键做 upsert：同一评分人
//! 在推进阶段前重复保存是覆盖而不是插入新行。weight 只在首次插入时
//! 写入，冲突更新不触碰它，题库后续的权重修改不会改写历史作答。

use super::SeaOrmStorage;
use crate::entity::responses::{ActiveModel, Column, Entity as Responses};
use crate::errors::{EvalSystemError, Result};
use crate::models::responses::{
    entities::{GraderRole, QuestionResponse},
    requests::ResponseUpsert,
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

/// 某评分人对应的 (score, comment) 列
fn grader_columns(grader: GraderRole) -> (Column, Column) {
    match grader {
        GraderRole::SelfEval => (Column::SelfScore, Column::SelfComment),
        GraderRole::Appr1 => (Column::Appr1Score, Column::Appr1Comment),
        GraderRole::Appr2 => (Column::Appr2Score, Column::Appr2Comment),
        GraderRole::Appr3 => (Column::Appr3Score, Column::Appr3Comment),
        GraderRole::Manager => (Column::MgrScore, Column::MgrComment),
        GraderRole::Gm => (Column::GmScore, Column::GmComment),
    }
}

impl SeaOrmStorage {
    /// 在给定连接（普通连接或事务）上执行评分 upsert
    pub(super) async fn upsert_responses_on<C: ConnectionTrait>(
        conn: &C,
        assessment_id: i64,
        grader: GraderRole,
        items: Vec<ResponseUpsert>,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let (score_col, comment_col) = grader_columns(grader);

        for item in items {
            let mut model = ActiveModel {
                assessment_id: Set(assessment_id),
                question_id: Set(item.question_id),
                weight: Set(item.weight),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            match grader {
                GraderRole::SelfEval => {
                    model.self_score = Set(Some(item.score));
                    model.self_comment = Set(item.comment);
                }
                GraderRole::Appr1 => {
                    model.appr1_score = Set(Some(item.score));
                    model.appr1_comment = Set(item.comment);
                }
                GraderRole::Appr2 => {
                    model.appr2_score = Set(Some(item.score));
                    model.appr2_comment = Set(item.comment);
                }
                GraderRole::Appr3 => {
                    model.appr3_score = Set(Some(item.score));
                    model.appr3_comment = Set(item.comment);
                }
                GraderRole::Manager => {
                    model.mgr_score = Set(Some(item.score));
                    model.mgr_comment = Set(item.comment);
                }
                GraderRole::Gm => {
                    model.gm_score = Set(Some(item.score));
                    model.gm_comment = Set(item.comment);
                }
            }

            // 冲突时只覆盖该评分人的列，weight 保持首次写入的冻结值
            let on_conflict = OnConflict::columns([Column::AssessmentId, Column::QuestionId])
                .update_columns([score_col, comment_col, Column::UpdatedAt])
                .to_owned();

            Responses::insert(model)
                .on_conflict(on_conflict)
                .exec(conn)
                .await
                .map_err(|e| {
                    EvalSystemError::database_operation(format!("写入评分失败: {e}"))
                })?;
        }

        Ok(())
    }

    /// 暂存评分（独立事务之外的普通 upsert）
    pub async fn upsert_responses_impl(
        &self,
        assessment_id: i64,
        grader: GraderRole,
        items: Vec<ResponseUpsert>,
    ) -> Result<()> {
        Self::upsert_responses_on(&self.db, assessment_id, grader, items).await
    }

    /// 列出考核单的全部作答
    pub async fn list_responses_by_assessment_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<QuestionResponse>> {
        let results = Responses::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_asc(Column::QuestionId)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询作答记录失败: {e}")))?;

        Ok(results
            .into_iter()
            .map(|m| m.into_question_response())
            .collect())
    }

    /// 是否已有任一评分人记录过分数
    pub async fn has_any_scores_impl(&self, assessment_id: i64) -> Result<bool> {
        let count = Responses::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(
                Condition::any()
                    .add(Column::SelfScore.is_not_null())
                    .add(Column::Appr1Score.is_not_null())
                    .add(Column::Appr2Score.is_not_null())
                    .add(Column::Appr3Score.is_not_null())
                    .add(Column::MgrScore.is_not_null())
                    .add(Column::GmScore.is_not_null()),
            )
            .count(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("检查评分记录失败: {e}")))?;

        Ok(count > 0)
    }
}
