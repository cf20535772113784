use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{AssessmentService, storage_error_response};
use crate::models::assessments::entities::Assessment;
use crate::models::assessments::responses::{
    AssessmentDetailResponse, AssessmentSubject, StageAuditView,
};
use crate::models::employees::entities::{ChainSlot, Employee, EmployeeRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 检查操作人是否有权查看考核单：本人、审批链成员或 hr_admin
pub(super) async fn check_view_permission(
    storage: &Arc<dyn Storage>,
    actor: &Employee,
    assessment: &Assessment,
) -> Result<Option<Employee>, HttpResponse> {
    // 被考核员工记录（draft 模板未绑定时为 None）
    let subject = match assessment.employee_id {
        Some(employee_id) => match storage.get_employee_by_id(employee_id).await {
            Ok(subject) => subject,
            Err(e) => return Err(storage_error_response(e)),
        },
        None => None,
    };

    // hr_admin 直接放行
    if actor.role == EmployeeRole::HrAdmin {
        return Ok(subject);
    }

    if let Some(ref subject) = subject {
        // 本人可以查看
        if subject.id == actor.id {
            return Ok(Some(subject.clone()));
        }
        // 审批链成员可以查看
        if subject.slot_of(&actor.emp_code).is_some() {
            return Ok(Some(subject.clone()));
        }
    }

    Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::Forbidden,
        "没有查看该考核单的权限",
    )))
}

/// 获取考核单详情
/// GET /assessments/{id}
pub async fn get_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    actor: Employee,
    assessment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    // 权限验证
    let subject = match check_view_permission(&storage, &actor, &assessment).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };

    let responses = match storage.list_responses_by_assessment(assessment_id).await {
        Ok(responses) => responses,
        Err(e) => return Ok(storage_error_response(e)),
    };

    // 五个槽位的审计视图，占用人取当前员工记录里的链
    let stages = ChainSlot::ALL
        .iter()
        .map(|&slot| {
            let (status, date, note) = assessment.stage_audit(slot);
            StageAuditView {
                slot,
                occupant: subject
                    .as_ref()
                    .and_then(|s| s.chain_ref(slot))
                    .map(String::from),
                status,
                date: date.map(|d| d.to_rfc3339()),
                note: note.map(String::from),
            }
        })
        .collect();

    let subject_view = subject.map(|s| AssessmentSubject {
        id: s.id,
        emp_code: s.emp_code,
        display_name: s.display_name,
        level: s.level,
    });

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssessmentDetailResponse {
            assessment,
            subject: subject_view,
            stages,
            responses,
        },
        "查询成功",
    )))
}
