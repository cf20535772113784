use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    AssessmentService, emit_transition_notification, scores_complete, storage_error_response,
};
use crate::models::assessments::entities::{
    AssessmentStatus, AssessmentTransition, StageAuditEntry, StageDecision, advance_target,
};
use crate::models::assessments::requests::ApproveAssessmentRequest;
use crate::models::assessments::responses::TransitionResponse;
use crate::models::employees::entities::Employee;
use crate::models::responses::entities::GraderRole;
use crate::models::scores::compute::grand_result;
use crate::models::{ApiResponse, ErrorCode};

/// 当前审批人通过
/// POST /assessments/{id}/approve
///
/// 授权：请求的 role 必须与状态推导出的待审槽位一致，且操作人工号
/// 等于 current_stage。appr1/2/3 审批前必须评完全部题目；mgr/gm 只
/// 复核不计分，放行零评分审批。
pub async fn approve_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    actor: Employee,
    assessment_id: i64,
    req: ApproveAssessmentRequest,
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

    // 状态必须是某个槽位的待审状态
    let Some(pending_slot) = assessment.status.pending_slot() else {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidStatus,
            format!("当前状态 {} 不在审批中", assessment.status),
        )));
    };

    // 请求的角色必须与待审槽位一致
    if req.role != pending_slot {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotCurrentStage,
            format!("当前待审槽位是 {pending_slot}，不是 {}", req.role),
        )));
    }

    // 操作人必须是 current_stage 记录的审批人
    if assessment.current_stage.as_deref() != Some(actor.emp_code.as_str()) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotCurrentStage,
            "您不是该考核单的当前审批人",
        )));
    }

    // 被考核员工（审批链与警告次数都取转移时刻的记录）
    let Some(subject_id) = assessment.employee_id else {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidStatus,
            "考核单尚未绑定员工",
        )));
    };
    let employee = match storage.get_employee_by_id(subject_id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EmployeeNotFound,
                "被考核员工不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(e)),
    };

    let responses = match storage.list_responses_by_assessment(assessment_id).await {
        Ok(responses) => responses,
        Err(e) => return Ok(storage_error_response(e)),
    };

    // 计分槽位的评分完整性检查
    let grader = GraderRole::from(pending_slot);
    if grader.requires_full_scores() {
        let questions = match storage
            .list_questions_by_level(&assessment.target_level)
            .await
        {
            Ok(questions) => questions,
            Err(e) => return Ok(storage_error_response(e)),
        };

        if !scores_complete(&questions, &responses, &[], grader) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::IncompleteScores,
                "请先评完全部考核项再审批",
            )));
        }
    }

    // 解析下一个非空槽位
    let (target_status, next_stage) = advance_target(&employee, pending_slot);
    let completed = target_status == AssessmentStatus::Completed;

    let mut transition = AssessmentTransition::new(target_status, next_stage);
    transition.stage_audit = Some(StageAuditEntry {
        slot: pending_slot,
        decision: StageDecision::Approved,
        note: req.note,
    });
    if completed {
        transition.set_completed_at = true;
        // 完成时落一份合成得分快照，查询接口仍以重新计算为准
        transition.final_score =
            grand_result(&responses, employee.warning_count).map(|r| r.net_score);
    }

    let expected = [assessment.status];
    let updated = match storage
        .apply_transition(assessment_id, &expected, None, transition)
        .await
    {
        Ok(updated) => updated,
        Err(e) => return Ok(storage_error_response(e)),
    };

    emit_transition_notification(&storage, &updated).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TransitionResponse {
            id: updated.id,
            status: updated.status,
            current_stage: updated.current_stage,
            final_score: updated.final_score,
        },
        "审批通过",
    )))
}
