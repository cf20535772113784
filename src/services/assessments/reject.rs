use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, emit_transition_notification, storage_error_response};
use crate::models::assessments::entities::{
    AssessmentStatus, AssessmentTransition, RejectionInfo, StageAuditEntry, StageDecision,
};
use crate::models::assessments::requests::RejectAssessmentRequest;
use crate::models::assessments::responses::TransitionResponse;
use crate::models::employees::entities::Employee;
use crate::models::{ApiResponse, ErrorCode};

/// 当前审批人驳回
/// POST /assessments/{id}/reject
///
/// 任一 submitted_* 状态都可驳回。驳回后 current_stage 回到被考核
/// 员工本人，员工修改后可重新提交，审批链从头开始。
pub async fn reject_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    actor: Employee,
    assessment_id: i64,
    req: RejectAssessmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.reason.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "驳回原因不能为空",
        )));
    }

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

    let Some(pending_slot) = assessment.status.pending_slot() else {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidStatus,
            format!("当前状态 {} 不在审批中", assessment.status),
        )));
    };

    if req.role != pending_slot {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotCurrentStage,
            format!("当前待审槽位是 {pending_slot}，不是 {}", req.role),
        )));
    }

    if assessment.current_stage.as_deref() != Some(actor.emp_code.as_str()) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotCurrentStage,
            "您不是该考核单的当前审批人",
        )));
    }

    // 驳回后流程回到被考核员工
    let Some(subject_id) = assessment.employee_id else {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidStatus,
            "考核单尚未绑定员工",
        )));
    };
    let subject = match storage.get_employee_by_id(subject_id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EmployeeNotFound,
                "被考核员工不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(e)),
    };

    let mut transition = AssessmentTransition::new(
        AssessmentStatus::Rejected,
        Some(subject.emp_code.clone()),
    );
    transition.stage_audit = Some(StageAuditEntry {
        slot: pending_slot,
        decision: StageDecision::Rejected,
        note: Some(req.reason.clone()),
    });
    transition.rejection = Some(RejectionInfo {
        stage: pending_slot,
        reason: req.reason,
    });

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
        "已驳回",
    )))
}
