//! 员工实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub emp_code: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: String,
    pub status: String,
    pub level: String,
    pub warning_count: i32,
    pub approver1: Option<String>,
    pub approver2: Option<String>,
    pub approver3: Option<String>,
    pub manager: Option<String>,
    pub gm: Option<String>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assessments::Entity")]
    Assessments,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_employee(self) -> crate::models::employees::entities::Employee {
        use crate::models::employees::entities::{Employee, EmployeeRole, EmployeeStatus};
        use chrono::{DateTime, Utc};

        Employee {
            id: self.id,
            emp_code: self.emp_code,
            email: self.email,
            password_hash: self.password_hash,
            display_name: self.display_name,
            role: self
                .role
                .parse::<EmployeeRole>()
                .unwrap_or(EmployeeRole::Employee),
            status: self
                .status
                .parse::<EmployeeStatus>()
                .unwrap_or(EmployeeStatus::Active),
            level: self.level,
            warning_count: self.warning_count,
            approver1: self.approver1,
            approver2: self.approver2,
            approver3: self.approver3,
            manager: self.manager,
            gm: self.gm,
            last_login: self
                .last_login
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
