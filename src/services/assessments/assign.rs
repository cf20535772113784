use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, storage_error_response};
use crate::models::assessments::requests::AssignAssessmentRequest;
use crate::models::assessments::responses::TransitionResponse;
use crate::models::employees::entities::Employee;
use crate::models::{ApiResponse, ErrorCode};

/// 将 draft 模板绑定到员工
/// POST /assessments/{id}/assign
pub async fn assign_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    _actor: Employee,
    assessment_id: i64,
    req: AssignAssessmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 考核单必须存在
    match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotFound,
                "考核单不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(e)),
    }

    // 目标员工必须存在，目标等级取员工等级
    let employee = match storage.get_employee_by_id(req.employee_id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EmployeeNotFound,
                "指定的员工不存在",
            )));
        }
        Err(e) => return Ok(storage_error_response(e)),
    };

    // draft 状态守卫在存储层以条件更新实现
    match storage
        .assign_assessment(assessment_id, employee.id, employee.level)
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TransitionResponse {
                id: updated.id,
                status: updated.status,
                current_stage: updated.current_stage,
                final_score: updated.final_score,
            },
            "绑定成功",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
