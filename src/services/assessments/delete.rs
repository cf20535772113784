use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, storage_error_response};
use crate::models::employees::entities::Employee;
use crate::models::{ApiResponse, ErrorCode};

/// 删除考核单
/// DELETE /assessments/{id}
///
/// 任一评分人记录过分数后不再允许硬删除。
pub async fn delete_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    _actor: Employee,
    assessment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取考核单
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

    // 删除保护：已有评分记录的考核单不可删除
    match storage.has_any_scores(assessment_id).await {
        Ok(true) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::InvalidStatus,
                "考核单已有评分记录，不可删除",
            )));
        }
        Ok(false) => {}
        Err(e) => return Ok(storage_error_response(e)),
    }

    match storage.delete_assessment(assessment_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "考核单不存在",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
