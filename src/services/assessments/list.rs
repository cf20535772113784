use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, storage_error_response};
use crate::models::assessments::requests::AssessmentListQuery;
use crate::models::employees::entities::{Employee, EmployeeRole};
use crate::models::{ApiResponse, ErrorCode};

/// 列出考核单
/// GET /assessments
///
/// hr_admin 可以任意筛选；普通员工只能看自己的考核单，或者用
/// pending_for=自己的工号查看等待自己审批的考核单。
pub async fn list_assessments(
    service: &AssessmentService,
    request: &HttpRequest,
    actor: Employee,
    mut query: AssessmentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if actor.role != EmployeeRole::HrAdmin {
        match query.pending_for {
            Some(ref pending_for) => {
                if pending_for != &actor.emp_code {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::Forbidden,
                        "只能查看等待自己审批的考核单",
                    )));
                }
            }
            None => {
                // 默认收敛到本人的考核单
                query.employee_id = Some(actor.id);
            }
        }
    }

    match storage.list_assessments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
