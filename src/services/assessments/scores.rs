use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, build_score_upserts, storage_error_response};
use crate::models::assessments::entities::{AssessmentStatus, AssessmentTransition};
use crate::models::assessments::responses::TransitionResponse;
use crate::models::employees::entities::Employee;
use crate::models::responses::entities::GraderRole;
use crate::models::responses::requests::SaveScoresRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 暂存评分
/// PUT /assessments/{id}/scores
///
/// 本人在 assigned/in_progress/rejected 状态下写自评字段；当前审批人
/// 在自己槽位的待审状态下写自己的评分字段。同一题重复保存是覆盖，
/// 不产生重复行。首次自评保存把 assigned 推到 in_progress。
pub async fn save_scores(
    service: &AssessmentService,
    request: &HttpRequest,
    actor: Employee,
    assessment_id: i64,
    req: SaveScoresRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.items.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "评分列表不能为空",
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

    // 判定评分角色：本人自评，或当前待审槽位的审批人
    let grader = if assessment.employee_id == Some(actor.id)
        && assessment.status.can_self_score()
    {
        GraderRole::SelfEval
    } else if let Some(slot) = assessment.status.pending_slot() {
        if assessment.current_stage.as_deref() != Some(actor.emp_code.as_str()) {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotCurrentStage,
                "您不是该考核单的当前审批人",
            )));
        }
        GraderRole::from(slot)
    } else {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            format!("当前状态 {} 不允许录入评分", assessment.status),
        )));
    };

    // 校验评分输入
    let questions = match storage
        .list_questions_by_level(&assessment.target_level)
        .await
    {
        Ok(questions) => questions,
        Err(e) => return Ok(storage_error_response(e)),
    };

    let upserts = match build_score_upserts(&questions, &req.items) {
        Ok(upserts) => upserts,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::InvalidScore, msg)));
        }
    };

    // 首次自评保存：assigned → in_progress，与评分写入同一事务
    if grader == GraderRole::SelfEval && assessment.status == AssessmentStatus::Assigned {
        let transition = AssessmentTransition::new(AssessmentStatus::InProgress, None);
        let updated = match storage
            .apply_transition(
                assessment_id,
                &[AssessmentStatus::Assigned],
                Some((grader, upserts)),
                transition,
            )
            .await
        {
            Ok(updated) => updated,
            Err(e) => return Ok(storage_error_response(e)),
        };

        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            TransitionResponse {
                id: updated.id,
                status: updated.status,
                current_stage: updated.current_stage,
                final_score: updated.final_score,
            },
            "评分已保存",
        )));
    }

    if let Err(e) = storage
        .upsert_responses(assessment_id, grader, upserts)
        .await
    {
        return Ok(storage_error_response(e));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TransitionResponse {
            id: assessment.id,
            status: assessment.status,
            current_stage: assessment.current_stage,
            final_score: assessment.final_score,
        },
        "评分已保存",
    )))
}
