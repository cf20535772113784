use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::notifications::requests::NotificationListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::NotificationService;

// 懒加载的全局 NotificationService 实例
static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

// 列出我的通知
pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListQuery>,
) -> ActixResult<HttpResponse> {
    let employee_id = match RequireJWT::extract_employee_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取员工信息",
            )));
        }
    };

    NOTIFICATION_SERVICE
        .list_notifications(&req, employee_id, query.into_inner())
        .await
}

// 未读通知数量
pub async fn get_unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    let employee_id = match RequireJWT::extract_employee_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取员工信息",
            )));
        }
    };

    NOTIFICATION_SERVICE.get_unread_count(&req, employee_id).await
}

// 标记单条已读
pub async fn mark_as_read(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let employee_id = match RequireJWT::extract_employee_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取员工信息",
            )));
        }
    };

    NOTIFICATION_SERVICE
        .mark_as_read(&req, path.into_inner(), employee_id)
        .await
}

// 标记全部已读
pub async fn mark_all_as_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    let employee_id = match RequireJWT::extract_employee_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取员工信息",
            )));
        }
    };

    NOTIFICATION_SERVICE.mark_all_as_read(&req, employee_id).await
}

// 配置路由
pub fn configure_notifications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_notifications))
            .route("/unread-count", web::get().to(get_unread_count))
            .route("/{id}/read", web::put().to(mark_as_read))
            .route("/read-all", web::put().to(mark_all_as_read)),
    );
}
