use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    AssessmentService, build_score_upserts, emit_transition_notification, scores_complete,
    storage_error_response,
};
use crate::models::assessments::entities::{
    AssessmentStatus, AssessmentTransition, submit_target,
};
use crate::models::assessments::requests::SubmitSelfAssessmentRequest;
use crate::models::assessments::responses::TransitionResponse;
use crate::models::employees::entities::Employee;
use crate::models::responses::entities::GraderRole;
use crate::models::{ApiResponse, ErrorCode};

/// 员工提交自评
/// POST /assessments/{id}/submit
///
/// 校验顺序：归属 → 状态 → 评分完整性，全部通过后才进入写事务。
/// 空审批链的员工提交后直接 completed。
pub async fn submit_self_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    actor: Employee,
    assessment_id: i64,
    req: SubmitSelfAssessmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取考核单
    let assessment = match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(assessment)) => assessment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotFound,
                "考核单不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(e)),
    };

    // 提交人必须是被考核员工本人
    if assessment.employee_id != Some(actor.id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有被考核员工本人可以提交自评",
        )));
    }

    if !assessment.status.can_submit() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidStatus,
            format!("当前状态 {} 不允许提交", assessment.status),
        )));
    }

    // 审批链按当前员工记录解析，JWT 缓存里的记录可能过期，重新读库
    let employee = match storage.get_employee_by_id(actor.id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EmployeeNotFound,
                "员工记录不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(e)),
    };

    // 适用题目集
    let questions = match storage
        .list_questions_by_level(&assessment.target_level)
        .await
    {
        Ok(questions) => questions,
        Err(e) => return Ok(storage_error_response(e)),
    };

    // 校验本次携带的评分
    let upserts = match build_score_upserts(&questions, &req.items) {
        Ok(upserts) => upserts,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::InvalidScore, msg)));
        }
    };

    // 自评完整性：已落库评分 + 本次携带的评分必须覆盖全部题目
    let responses = match storage.list_responses_by_assessment(assessment_id).await {
        Ok(responses) => responses,
        Err(e) => return Ok(storage_error_response(e)),
    };

    if !scores_complete(&questions, &responses, &upserts, GraderRole::SelfEval) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::IncompleteScores,
            "自评尚未覆盖全部考核项，无法提交",
        )));
    }

    // 解析审批链第一个非空槽位
    let (target_status, current_stage) = submit_target(&employee);

    let mut transition = AssessmentTransition::new(target_status, current_stage);
    transition.set_submitted_at = true;
    // 驳回后重新提交：清掉上一轮的审计与驳回信息，链从头走
    transition.clear_stage_audits = true;
    transition.set_completed_at = target_status == AssessmentStatus::Completed;

    let expected = [
        AssessmentStatus::Assigned,
        AssessmentStatus::InProgress,
        AssessmentStatus::Rejected,
    ];

    let updated = match storage
        .apply_transition(
            assessment_id,
            &expected,
            Some((GraderRole::SelfEval, upserts)),
            transition,
        )
        .await
    {
        Ok(updated) => updated,
        Err(e) => return Ok(storage_error_response(e)),
    };

    // 通知下一个审批人（或完成时通知本人），失败不影响已提交的转移
    emit_transition_notification(&storage, &updated).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TransitionResponse {
            id: updated.id,
            status: updated.status,
            current_stage: updated.current_stage,
            final_score: updated.final_score,
        },
        "提交成功",
    )))
}
