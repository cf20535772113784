use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, storage_error_response};
use crate::models::assessments::entities::AssessmentStatus;
use crate::models::assessments::requests::CreateAssessmentRequest;
use crate::models::employees::entities::Employee;
use crate::models::{ApiResponse, ErrorCode};

/// 创建考核单
/// POST /assessments
///
/// 不指定员工时创建 draft 模板（必须给定 target_level）；
/// 指定员工时直接 assigned，目标等级默认取员工等级。
pub async fn create_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    _actor: Employee,
    req: CreateAssessmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "考核标题不能为空",
        )));
    }

    let (employee_id, target_level, status) = match req.employee_id {
        Some(employee_id) => {
            let employee = match storage.get_employee_by_id(employee_id).await {
                Ok(Some(employee)) => employee,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::EmployeeNotFound,
                        "指定的员工不存在",
                    )));
                }
                Err(e) => return Ok(storage_error_response(e)),
            };
            let level = req.target_level.unwrap_or(employee.level);
            (Some(employee_id), level, AssessmentStatus::Assigned)
        }
        None => {
            let Some(level) = req.target_level else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "draft 模板必须指定 target_level",
                )));
            };
            (None, level, AssessmentStatus::Draft)
        }
    };

    match storage
        .create_assessment(req.title, employee_id, target_level, status)
        .await
    {
        Ok(assessment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "创建成功")))
        }
        Err(e) => Ok(storage_error_response(e)),
    }
}
