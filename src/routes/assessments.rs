use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT, RequireRole};
use crate::models::assessments::requests::{
    ApproveAssessmentRequest, AssessmentListQuery, AssignAssessmentRequest,
    CreateAssessmentRequest, RejectAssessmentRequest, SubmitSelfAssessmentRequest,
};
use crate::models::employees::entities::EmployeeRole;
use crate::models::responses::requests::SaveScoresRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssessmentService;

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

/// 从请求扩展中取出操作人，传给 service 的都是显式的 actor 参数
macro_rules! extract_actor {
    ($req:expr) => {
        match RequireJWT::extract_employee($req) {
            Some(employee) => employee,
            None => {
                return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "无法获取员工信息",
                )));
            }
        }
    };
}

// 创建考核单
pub async fn create_assessment(
    req: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .create_assessment(&req, actor, body.into_inner())
        .await
}

// 绑定 draft 模板到员工
pub async fn assign_assessment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<AssignAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .assign_assessment(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// 删除考核单
pub async fn delete_assessment(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .delete_assessment(&req, actor, path.into_inner())
        .await
}

// 列出考核单
pub async fn list_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListQuery>,
) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .list_assessments(&req, actor, query.into_inner())
        .await
}

// 获取考核单详情
pub async fn get_assessment(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .get_assessment(&req, actor, path.into_inner())
        .await
}

// 暂存评分
pub async fn save_scores(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<SaveScoresRequest>,
) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .save_scores(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// 提交自评
pub async fn submit_self_assessment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<SubmitSelfAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .submit_self_assessment(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// 审批通过
pub async fn approve_assessment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ApproveAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .approve_assessment(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// 驳回
pub async fn reject_assessment(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<RejectAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .reject_assessment(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// 查询合成结果
pub async fn get_assessment_result(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let actor = extract_actor!(&req);
    ASSESSMENT_SERVICE
        .get_assessment_result(&req, actor, path.into_inner())
        .await
}

// 配置路由
pub fn configure_assessments_routes(cfg: &mut web::ServiceConfig) {
    // 管理操作：创建/绑定/删除，仅 hr_admin
    cfg.service(
        web::scope("/api/v1/assessments/admin")
            .wrap(RequireRole::new(&EmployeeRole::HrAdmin))
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_assessment))
            .route("/{id}/assign", web::post().to(assign_assessment))
            .route("/{id}", web::delete().to(delete_assessment)),
    );

    // 工作流与查询操作
    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_assessments))
            .route("/{id}", web::get().to(get_assessment))
            .route("/{id}/scores", web::put().to(save_scores))
            .route("/{id}/submit", web::post().to(submit_self_assessment))
            .route("/{id}/approve", web::post().to(approve_assessment))
            .route("/{id}/reject", web::post().to(reject_assessment))
            .route("/{id}/result", web::get().to(get_assessment_result)),
    );
}
