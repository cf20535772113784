//! 员工目录存储操作

use super::SeaOrmStorage;
use crate::entity::employees::{ActiveModel, Column, Entity as Employees};
use crate::errors::{EvalSystemError, Result};
use crate::models::employees::{
    entities::{Employee, EmployeeStatus},
    requests::CreateEmployeeRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 创建员工记录
    pub async fn create_employee_impl(&self, req: CreateEmployeeRequest) -> Result<Employee> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            emp_code: Set(req.emp_code),
            email: Set(req.email),
            password_hash: Set(req.password),
            display_name: Set(req.display_name),
            role: Set(req.role.to_string()),
            status: Set(EmployeeStatus::Active.to_string()),
            level: Set(req.level),
            warning_count: Set(req.warning_count),
            approver1: Set(req.approver1),
            approver2: Set(req.approver2),
            approver3: Set(req.approver3),
            manager: Set(req.manager),
            gm: Set(req.gm),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("创建员工失败: {e}")))?;

        Ok(result.into_employee())
    }

    /// 通过 ID 获取员工
    pub async fn get_employee_by_id_impl(&self, id: i64) -> Result<Option<Employee>> {
        let result = Employees::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询员工失败: {e}")))?;

        Ok(result.map(|m| m.into_employee()))
    }

    /// 通过工号获取员工
    pub async fn get_employee_by_code_impl(&self, emp_code: &str) -> Result<Option<Employee>> {
        let result = Employees::find()
            .filter(Column::EmpCode.eq(emp_code))
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询员工失败: {e}")))?;

        Ok(result.map(|m| m.into_employee()))
    }

    /// 通过工号或邮箱获取员工
    pub async fn get_employee_by_code_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<Employee>> {
        let result = Employees::find()
            .filter(
                Condition::any()
                    .add(Column::EmpCode.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询员工失败: {e}")))?;

        Ok(result.map(|m| m.into_employee()))
    }

    /// 更新员工最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Employees::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                EvalSystemError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 统计员工数量
    pub async fn count_employees_impl(&self) -> Result<u64> {
        let count = Employees::find()
            .count(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("统计员工数量失败: {e}")))?;

        Ok(count)
    }
}
