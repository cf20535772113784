pub mod assessments;
pub mod auth;
pub mod common;
pub mod employees;
pub mod notifications;
pub mod questions;
pub mod responses;
pub mod scores;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::Serialize;
use ts_rs::TS;

/// 业务错误码，随 ApiResponse 下发给前端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    IncompleteScores = 40001,
    InvalidScore = 40002,

    Unauthorized = 40100,
    AuthFailed = 40101,

    Forbidden = 40300,
    NotCurrentStage = 40301,

    NotFound = 40400,
    EmployeeNotFound = 40401,
    AssessmentNotFound = 40402,
    QuestionNotFound = 40403,
    NotificationNotFound = 40404,
    ResultNotReady = 40405,

    InvalidStatus = 40900,
    StaleTransition = 40901,

    InternalServerError = 50000,
}

/// 程序启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
