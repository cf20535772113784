use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::detail::check_view_permission;
use super::{AssessmentService, storage_error_response};
use crate::models::assessments::responses::AssessmentResultResponse;
use crate::models::employees::entities::Employee;
use crate::models::scores::compute::grand_result;
use crate::models::{ApiResponse, ErrorCode};

/// 查询合成结果
/// GET /assessments/{id}/result
///
/// 始终基于当前作答与员工警告次数重新计算，final_score 列只是
/// 完成时刻的快照。任何审批人都未评分时返回未就绪。
pub async fn get_assessment_result(
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

    // 权限验证（复用详情页的规则）
    let subject = match check_view_permission(&storage, &actor, &assessment).await {
        Ok(Some(subject)) => subject,
        Ok(None) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::InvalidStatus,
                "考核单尚未绑定员工",
            )));
        }
        Err(resp) => return Ok(resp),
    };

    let responses = match storage.list_responses_by_assessment(assessment_id).await {
        Ok(responses) => responses,
        Err(e) => return Ok(storage_error_response(e)),
    };

    match grand_result(&responses, subject.warning_count) {
        Some(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssessmentResultResponse {
                assessment_id: assessment.id,
                status: assessment.status,
                result,
            },
            "查询成功",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResultNotReady,
            "尚无审批人评分，结果未生成",
        ))),
    }
}
