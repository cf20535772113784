use serde::Deserialize;
use ts_rs::TS;

use super::entities::EmployeeRole;

/// 创建员工记录（启动种子与目录同步使用，password 字段传入的是哈希值）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/employee.ts")]
pub struct CreateEmployeeRequest {
    pub emp_code: String,
    pub email: String,
    pub password: String,
    pub role: EmployeeRole,
    pub display_name: Option<String>,
    pub level: String,
    #[serde(default)]
    pub warning_count: i32,
    #[serde(default)]
    pub approver1: Option<String>,
    #[serde(default)]
    pub approver2: Option<String>,
    #[serde(default)]
    pub approver3: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub gm: Option<String>,
}
