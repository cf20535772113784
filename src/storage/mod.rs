use std::sync::Arc;

use crate::models::{
    assessments::{
        entities::{Assessment, AssessmentStatus, AssessmentTransition},
        requests::AssessmentListQuery,
        responses::AssessmentListResponse,
    },
    employees::{entities::Employee, requests::CreateEmployeeRequest},
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
    questions::entities::Question,
    responses::{
        entities::{GraderRole, QuestionResponse},
        requests::ResponseUpsert,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 员工目录方法
    // 创建员工记录
    async fn create_employee(&self, employee: CreateEmployeeRequest) -> Result<Employee>;
    // 通过ID获取员工
    async fn get_employee_by_id(&self, id: i64) -> Result<Option<Employee>>;
    // 通过工号获取员工
    async fn get_employee_by_code(&self, emp_code: &str) -> Result<Option<Employee>>;
    // 通过工号或邮箱获取员工（登录）
    async fn get_employee_by_code_or_email(&self, identifier: &str) -> Result<Option<Employee>>;
    // 更新员工最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计员工数量
    async fn count_employees(&self) -> Result<u64>;

    /// 题库方法
    // 按考核等级列出适用题目
    async fn list_questions_by_level(&self, level: &str) -> Result<Vec<Question>>;

    /// 考核单方法
    // 创建考核单（draft 模板或直接 assigned）
    async fn create_assessment(
        &self,
        title: String,
        employee_id: Option<i64>,
        target_level: String,
        status: AssessmentStatus,
    ) -> Result<Assessment>;
    // 通过ID获取考核单
    async fn get_assessment_by_id(&self, assessment_id: i64) -> Result<Option<Assessment>>;
    // 将 draft 模板绑定到员工（期望状态 draft，不匹配返回 StaleTransition）
    async fn assign_assessment(
        &self,
        assessment_id: i64,
        employee_id: i64,
        target_level: String,
    ) -> Result<Assessment>;
    // 删除考核单（service 层已校验可删）
    async fn delete_assessment(&self, assessment_id: i64) -> Result<bool>;
    // 列出考核单
    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse>;
    // 应用一次状态机转移：单事务内先 upsert 附带的评分，再按期望状态
    // 条件更新考核单；期望状态不匹配整体回滚并返回 StaleTransition
    async fn apply_transition(
        &self,
        assessment_id: i64,
        expected: &[AssessmentStatus],
        scores: Option<(GraderRole, Vec<ResponseUpsert>)>,
        transition: AssessmentTransition,
    ) -> Result<Assessment>;

    /// 作答记录方法
    // 暂存评分（不触发状态转移的 upsert）
    async fn upsert_responses(
        &self,
        assessment_id: i64,
        grader: GraderRole,
        items: Vec<ResponseUpsert>,
    ) -> Result<()>;
    // 列出考核单的全部作答
    async fn list_responses_by_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<QuestionResponse>>;
    // 是否已有任一评分人记录过分数（删除保护）
    async fn has_any_scores(&self, assessment_id: i64) -> Result<bool>;

    /// 通知方法
    // 创建通知
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    // 列出员工通知
    async fn list_notifications_with_pagination(
        &self,
        employee_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    // 未读通知数量
    async fn get_unread_notification_count(&self, employee_id: i64) -> Result<i64>;
    // 标记单条已读
    async fn mark_notification_as_read(&self, notification_id: i64, employee_id: i64)
    -> Result<bool>;
    // 标记全部已读
    async fn mark_all_notifications_as_read(&self, employee_id: i64) -> Result<i64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
