//! 考核单存储操作
//!
//! 状态机转移在单个事务里执行：先 upsert 本次附带的评分，再以期望
//! 状态为条件更新考核单。并发的第二个写入者会命中 0 行更新，整个
//! 事务回滚并返回 StaleTransition，不会出现半套用的转移。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments};
use crate::entity::employees::{Column as EmployeeColumn, Entity as Employees};
use crate::entity::notifications::{
    Column as NotificationColumn, Entity as Notifications,
};
use crate::entity::responses::{Column as ResponseColumn, Entity as Responses};
use crate::errors::{EvalSystemError, Result};
use crate::models::{
    PaginationInfo,
    assessments::{
        entities::{Assessment, AssessmentStatus, AssessmentTransition},
        requests::AssessmentListQuery,
        responses::{AssessmentListItem, AssessmentListResponse, AssessmentSubject},
    },
    employees::entities::ChainSlot,
    responses::{entities::GraderRole, requests::ResponseUpsert},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

/// 某审批槽位对应的 (status, date, note) 审计列
fn slot_audit_columns(slot: ChainSlot) -> (Column, Column, Column) {
    match slot {
        ChainSlot::Appr1 => (Column::Appr1Status, Column::Appr1Date, Column::Appr1Note),
        ChainSlot::Appr2 => (Column::Appr2Status, Column::Appr2Date, Column::Appr2Note),
        ChainSlot::Appr3 => (Column::Appr3Status, Column::Appr3Date, Column::Appr3Note),
        ChainSlot::Manager => (Column::MgrStatus, Column::MgrDate, Column::MgrNote),
        ChainSlot::Gm => (Column::GmStatus, Column::GmDate, Column::GmNote),
    }
}

impl SeaOrmStorage {
    /// 创建考核单
    pub async fn create_assessment_impl(
        &self,
        title: String,
        employee_id: Option<i64>,
        target_level: String,
        status: AssessmentStatus,
    ) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            employee_id: Set(employee_id),
            title: Set(title),
            target_level: Set(target_level),
            status: Set(status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("创建考核单失败: {e}")))?;

        Ok(result.into_assessment())
    }

    /// 通过 ID 获取考核单
    pub async fn get_assessment_by_id_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(assessment_id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询考核单失败: {e}")))?;

        Ok(result.map(|m| m.into_assessment()))
    }

    /// 将 draft 模板绑定到员工，期望状态 draft
    pub async fn assign_assessment_impl(
        &self,
        assessment_id: i64,
        employee_id: i64,
        target_level: String,
    ) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let result = Assessments::update_many()
            .col_expr(Column::EmployeeId, Expr::value(employee_id))
            .col_expr(Column::TargetLevel, Expr::value(target_level))
            .col_expr(
                Column::Status,
                Expr::value(AssessmentStatus::Assigned.to_string()),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(assessment_id))
            .filter(Column::Status.eq(AssessmentStatus::Draft.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("绑定考核单失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(EvalSystemError::stale_transition(format!(
                "考核单 {assessment_id} 不是 draft 状态，无法绑定"
            )));
        }

        let updated = Assessments::find_by_id(assessment_id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询考核单失败: {e}")))?
            .ok_or_else(|| {
                EvalSystemError::not_found(format!("考核单不存在: {assessment_id}"))
            })?;

        Ok(updated.into_assessment())
    }

    /// 删除考核单（连带作答与通知）
    pub async fn delete_assessment_impl(&self, assessment_id: i64) -> Result<bool> {
        Responses::delete_many()
            .filter(ResponseColumn::AssessmentId.eq(assessment_id))
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除作答记录失败: {e}")))?;

        Notifications::delete_many()
            .filter(NotificationColumn::AssessmentId.eq(assessment_id))
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除关联通知失败: {e}")))?;

        let result = Assessments::delete_by_id(assessment_id)
            .exec(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("删除考核单失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出考核单（分页）
    pub async fn list_assessments_with_pagination_impl(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assessments::find();

        // 被考核员工筛选
        if let Some(employee_id) = query.employee_id {
            select = select.filter(Column::EmployeeId.eq(employee_id));
        }

        // 状态筛选
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status));
        }

        // 等待指定工号操作的考核单
        if let Some(ref pending_for) = query.pending_for {
            select = select.filter(Column::CurrentStage.eq(pending_for));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询考核单总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询考核单页数失败: {e}")))?;

        let assessments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询考核单列表失败: {e}")))?;

        // 批量查询被考核员工信息
        let employee_ids: Vec<i64> = assessments
            .iter()
            .filter_map(|a| a.employee_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let employees = Employees::find()
            .filter(EmployeeColumn::Id.is_in(employee_ids))
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询员工信息失败: {e}")))?;

        let employee_map: HashMap<i64, _> = employees.into_iter().map(|e| (e.id, e)).collect();

        // 组装 AssessmentListItem
        let items = assessments
            .into_iter()
            .map(|a| {
                let subject = a.employee_id.and_then(|id| {
                    employee_map.get(&id).map(|e| AssessmentSubject {
                        id: e.id,
                        emp_code: e.emp_code.clone(),
                        display_name: e.display_name.clone(),
                        level: e.level.clone(),
                    })
                });

                AssessmentListItem {
                    id: a.id,
                    title: a.title.clone(),
                    target_level: a.target_level.clone(),
                    status: a
                        .status
                        .parse::<AssessmentStatus>()
                        .unwrap_or(AssessmentStatus::Draft),
                    current_stage: a.current_stage.clone(),
                    subject,
                    final_score: a.final_score,
                    submitted_at: a.submitted_at.and_then(|ts| {
                        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.to_rfc3339())
                    }),
                    created_at: chrono::DateTime::from_timestamp(a.created_at, 0)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_default(),
                }
            })
            .collect();

        Ok(AssessmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 应用一次状态机转移（单事务，期望状态条件更新）
    pub async fn apply_transition_impl(
        &self,
        assessment_id: i64,
        expected: &[AssessmentStatus],
        scores: Option<(GraderRole, Vec<ResponseUpsert>)>,
        transition: AssessmentTransition,
    ) -> Result<Assessment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        // 1. 本次附带的评分先写入，状态守卫失败时随事务一起回滚
        if let Some((grader, items)) = scores {
            Self::upsert_responses_on(&txn, assessment_id, grader, items).await?;
        }

        // 2. 组装状态更新
        let mut update = Assessments::update_many()
            .col_expr(Column::Status, Expr::value(transition.status.to_string()))
            .col_expr(
                Column::CurrentStage,
                Expr::value(transition.current_stage.clone()),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now));

        // 重新提交：清空五组审计字段与驳回信息
        if transition.clear_stage_audits {
            for slot in ChainSlot::ALL {
                let (status_col, date_col, note_col) = slot_audit_columns(slot);
                update = update
                    .col_expr(status_col, Expr::value(None::<String>))
                    .col_expr(date_col, Expr::value(None::<i64>))
                    .col_expr(note_col, Expr::value(None::<String>));
            }
            update = update
                .col_expr(Column::RejectionStage, Expr::value(None::<String>))
                .col_expr(Column::RejectionReason, Expr::value(None::<String>));
        }

        // 本次转移落的槽位审计
        if let Some(ref audit) = transition.stage_audit {
            let (status_col, date_col, note_col) = slot_audit_columns(audit.slot);
            update = update
                .col_expr(status_col, Expr::value(audit.decision.to_string()))
                .col_expr(date_col, Expr::value(now))
                .col_expr(note_col, Expr::value(audit.note.clone()));
        }

        // 驳回信息
        if let Some(ref rejection) = transition.rejection {
            update = update
                .col_expr(
                    Column::RejectionStage,
                    Expr::value(rejection.stage.to_string()),
                )
                .col_expr(Column::RejectionReason, Expr::value(rejection.reason.clone()));
        }

        if transition.set_submitted_at {
            update = update.col_expr(Column::SubmittedAt, Expr::value(now));
        }

        if transition.set_completed_at {
            update = update.col_expr(Column::CompletedAt, Expr::value(now));
        }

        if let Some(final_score) = transition.final_score {
            update = update.col_expr(Column::FinalScore, Expr::value(final_score));
        }

        // 3. 期望状态条件更新：0 行说明状态已被并发转移改掉
        let expected_status: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        let result = update
            .filter(Column::Id.eq(assessment_id))
            .filter(Column::Status.is_in(expected_status))
            .exec(&txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("更新考核单状态失败: {e}")))?;

        if result.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| EvalSystemError::database_operation(format!("回滚事务失败: {e}")))?;
            return Err(EvalSystemError::stale_transition(format!(
                "考核单 {assessment_id} 状态已变化，本次转移被拒绝"
            )));
        }

        let updated = Assessments::find_by_id(assessment_id)
            .one(&txn)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询考核单失败: {e}")))?
            .ok_or_else(|| {
                EvalSystemError::not_found(format!("考核单不存在: {assessment_id}"))
            })?;

        txn.commit()
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(updated.into_assessment())
    }
}
