//! 题库存储操作

use super::SeaOrmStorage;
use crate::entity::questions::{Column, Entity as Questions};
use crate::errors::{EvalSystemError, Result};
use crate::models::questions::entities::Question;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 按考核等级列出适用题目（按展示顺序）
    pub async fn list_questions_by_level_impl(&self, level: &str) -> Result<Vec<Question>> {
        let results = Questions::find()
            .filter(Column::ApplicableLevel.eq(level))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvalSystemError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_question()).collect())
    }
}
