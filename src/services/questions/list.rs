use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::models::questions::{requests::QuestionListQuery, responses::QuestionListResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 列出适用题目
/// GET /questions?level=L2
pub async fn list_questions(
    service: &QuestionService,
    request: &HttpRequest,
    query: QuestionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(level) = query.level else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "必须指定 level 参数",
        )));
    };

    match storage.list_questions_by_level(&level).await {
        Ok(items) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(QuestionListResponse { items }, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询题目失败: {e}"),
            )),
        ),
    }
}
