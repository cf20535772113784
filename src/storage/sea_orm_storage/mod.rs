//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assessments;
mod employees;
mod notifications;
mod questions;
mod responses;

use crate::config::AppConfig;
use crate::errors::{EvalSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实例
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EvalSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EvalSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EvalSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EvalSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 员工模块
    async fn create_employee(&self, employee: CreateEmployeeRequest) -> Result<Employee> {
        self.create_employee_impl(employee).await
    }

    async fn get_employee_by_id(&self, id: i64) -> Result<Option<Employee>> {
        self.get_employee_by_id_impl(id).await
    }

    async fn get_employee_by_code(&self, emp_code: &str) -> Result<Option<Employee>> {
        self.get_employee_by_code_impl(emp_code).await
    }

    async fn get_employee_by_code_or_email(&self, identifier: &str) -> Result<Option<Employee>> {
        self.get_employee_by_code_or_email_impl(identifier).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_employees(&self) -> Result<u64> {
        self.count_employees_impl().await
    }

    // 题库模块
    async fn list_questions_by_level(&self, level: &str) -> Result<Vec<Question>> {
        self.list_questions_by_level_impl(level).await
    }

    // 考核单模块
    async fn create_assessment(
        &self,
        title: String,
        employee_id: Option<i64>,
        target_level: String,
        status: AssessmentStatus,
    ) -> Result<Assessment> {
        self.create_assessment_impl(title, employee_id, target_level, status)
            .await
    }

    async fn get_assessment_by_id(&self, assessment_id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_by_id_impl(assessment_id).await
    }

    async fn assign_assessment(
        &self,
        assessment_id: i64,
        employee_id: i64,
        target_level: String,
    ) -> Result<Assessment> {
        self.assign_assessment_impl(assessment_id, employee_id, target_level)
            .await
    }

    async fn delete_assessment(&self, assessment_id: i64) -> Result<bool> {
        self.delete_assessment_impl(assessment_id).await
    }

    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        self.list_assessments_with_pagination_impl(query).await
    }

    async fn apply_transition(
        &self,
        assessment_id: i64,
        expected: &[AssessmentStatus],
        scores: Option<(GraderRole, Vec<ResponseUpsert>)>,
        transition: AssessmentTransition,
    ) -> Result<Assessment> {
        self.apply_transition_impl(assessment_id, expected, scores, transition)
            .await
    }

    // 作答模块
    async fn upsert_responses(
        &self,
        assessment_id: i64,
        grader: GraderRole,
        items: Vec<ResponseUpsert>,
    ) -> Result<()> {
        self.upsert_responses_impl(assessment_id, grader, items)
            .await
    }

    async fn list_responses_by_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<QuestionResponse>> {
        self.list_responses_by_assessment_impl(assessment_id).await
    }

    async fn has_any_scores(&self, assessment_id: i64) -> Result<bool> {
        self.has_any_scores_impl(assessment_id).await
    }

    // 通知模块
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn list_notifications_with_pagination(
        &self,
        employee_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(employee_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, employee_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(employee_id).await
    }

    async fn mark_notification_as_read(
        &self,
        notification_id: i64,
        employee_id: i64,
    ) -> Result<bool> {
        self.mark_notification_as_read_impl(notification_id, employee_id)
            .await
    }

    async fn mark_all_notifications_as_read(&self, employee_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(employee_id).await
    }
}
