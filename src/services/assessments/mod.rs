pub mod approve;
pub mod assign;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod reject;
pub mod result;
pub mod scores;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use crate::errors::EvalSystemError;
use crate::models::assessments::entities::{Assessment, AssessmentStatus};
use crate::models::assessments::requests::{
    ApproveAssessmentRequest, AssessmentListQuery, AssignAssessmentRequest,
    CreateAssessmentRequest, RejectAssessmentRequest, SubmitSelfAssessmentRequest,
};
use crate::models::employees::entities::Employee;
use crate::models::notifications::{entities::NotificationKind, requests::CreateNotificationRequest};
use crate::models::questions::entities::Question;
use crate::models::responses::entities::{GraderRole, QuestionResponse};
use crate::models::responses::requests::{ResponseUpsert, SaveScoresRequest, ScoreItem};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_score;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建考核单（hr_admin）
    pub async fn create_assessment(
        &self,
        request: &HttpRequest,
        actor: Employee,
        req: CreateAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assessment(self, request, actor, req).await
    }

    /// 绑定 draft 模板到员工（hr_admin）
    pub async fn assign_assessment(
        &self,
        request: &HttpRequest,
        actor: Employee,
        assessment_id: i64,
        req: AssignAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_assessment(self, request, actor, assessment_id, req).await
    }

    /// 删除未评分的考核单（hr_admin）
    pub async fn delete_assessment(
        &self,
        request: &HttpRequest,
        actor: Employee,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assessment(self, request, actor, assessment_id).await
    }

    /// 获取考核单详情
    pub async fn get_assessment(
        &self,
        request: &HttpRequest,
        actor: Employee,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assessment(self, request, actor, assessment_id).await
    }

    /// 列出考核单
    pub async fn list_assessments(
        &self,
        request: &HttpRequest,
        actor: Employee,
        query: AssessmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assessments(self, request, actor, query).await
    }

    /// 暂存评分（本人或当前审批人）
    pub async fn save_scores(
        &self,
        request: &HttpRequest,
        actor: Employee,
        assessment_id: i64,
        req: SaveScoresRequest,
    ) -> ActixResult<HttpResponse> {
        scores::save_scores(self, request, actor, assessment_id, req).await
    }

    /// 员工提交自评
    pub async fn submit_self_assessment(
        &self,
        request: &HttpRequest,
        actor: Employee,
        assessment_id: i64,
        req: SubmitSelfAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_self_assessment(self, request, actor, assessment_id, req).await
    }

    /// 当前审批人通过
    pub async fn approve_assessment(
        &self,
        request: &HttpRequest,
        actor: Employee,
        assessment_id: i64,
        req: ApproveAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        approve::approve_assessment(self, request, actor, assessment_id, req).await
    }

    /// 当前审批人驳回
    pub async fn reject_assessment(
        &self,
        request: &HttpRequest,
        actor: Employee,
        assessment_id: i64,
        req: RejectAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        reject::reject_assessment(self, request, actor, assessment_id, req).await
    }

    /// 查询合成结果
    pub async fn get_assessment_result(
        &self,
        request: &HttpRequest,
        actor: Employee,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        result::get_assessment_result(self, request, actor, assessment_id).await
    }
}

/// 存储层错误到 HTTP 响应的统一映射
pub(crate) fn storage_error_response(e: EvalSystemError) -> HttpResponse {
    match e {
        EvalSystemError::StaleTransition(_) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::StaleTransition, e.message()),
        ),
        EvalSystemError::NotFound(_) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, e.message()))
        }
        EvalSystemError::Authorization(_) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, e.message()))
        }
        _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("操作失败: {e}"),
        )),
    }
}

/// 校验评分输入并换算成 upsert 记录。
/// 题目必须在适用题目集内，分数必须落在 [0, max_score]；
/// weight 在这里从题目快照，落库后不再跟随题库变化。
pub(crate) fn build_score_upserts(
    questions: &[Question],
    items: &[ScoreItem],
) -> Result<Vec<ResponseUpsert>, String> {
    let mut upserts = Vec::with_capacity(items.len());

    for item in items {
        let question = questions
            .iter()
            .find(|q| q.id == item.question_id)
            .ok_or_else(|| format!("题目 {} 不在本次考核的适用题目集内", item.question_id))?;

        validate_score(item.score, question.max_score)
            .map_err(|e| format!("题目 {} 评分无效: {e}", item.question_id))?;

        upserts.push(ResponseUpsert {
            question_id: item.question_id,
            weight: question.weight,
            score: item.score,
            comment: item.comment.clone(),
        });
    }

    Ok(upserts)
}

/// 判断某评分人是否已评完全部适用题目。
/// incoming 是本次请求携带、尚未落库的评分，按题目覆盖已存量。
pub(crate) fn scores_complete(
    questions: &[Question],
    responses: &[QuestionResponse],
    incoming: &[ResponseUpsert],
    grader: GraderRole,
) -> bool {
    questions.iter().all(|q| {
        incoming.iter().any(|u| u.question_id == q.id)
            || responses
                .iter()
                .any(|r| r.question_id == q.id && r.score_for(grader).is_some())
    })
}

/// 状态转移成功后发送通知。尽力而为：失败只记日志，绝不回滚已提交的转移。
pub(crate) async fn emit_transition_notification(
    storage: &Arc<dyn Storage>,
    assessment: &Assessment,
) {
    let (target_employee_id, kind, title, content) = match assessment.status {
        AssessmentStatus::Completed => {
            let Some(employee_id) = assessment.employee_id else {
                return;
            };
            (
                employee_id,
                NotificationKind::Approved,
                format!("考核「{}」已完成", assessment.title),
                assessment.final_score.map(|s| format!("最终得分: {s}")),
            )
        }
        AssessmentStatus::Rejected => {
            let Some(employee_id) = assessment.employee_id else {
                return;
            };
            (
                employee_id,
                NotificationKind::Rejected,
                format!("考核「{}」被驳回", assessment.title),
                assessment.rejection_reason.clone(),
            )
        }
        _ => {
            // 前进到某个审批槽位：通知新的当前审批人
            let Some(ref stage_code) = assessment.current_stage else {
                return;
            };
            let approver = match storage.get_employee_by_code(stage_code).await {
                Ok(Some(employee)) => employee,
                Ok(None) => {
                    warn!(
                        "Notification skipped: approver {} not found for assessment {}",
                        stage_code, assessment.id
                    );
                    return;
                }
                Err(e) => {
                    warn!(
                        "Notification skipped: failed to resolve approver {}: {}",
                        stage_code, e
                    );
                    return;
                }
            };
            (
                approver.id,
                NotificationKind::ApprovalRequired,
                format!("考核「{}」等待您审批", assessment.title),
                None,
            )
        }
    };

    if let Err(e) = storage
        .create_notification(CreateNotificationRequest {
            employee_id: target_employee_id,
            kind,
            title,
            content,
            assessment_id: assessment.id,
        })
        .await
    {
        warn!(
            "Failed to create notification for assessment {}: {}",
            assessment.id, e
        );
    }
}
