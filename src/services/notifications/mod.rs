pub mod count;
pub mod list;
pub mod mark_read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notifications::requests::NotificationListQuery;
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 列出通知
    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        employee_id: i64,
        query: NotificationListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, employee_id, query).await
    }

    /// 未读数量
    pub async fn get_unread_count(
        &self,
        request: &HttpRequest,
        employee_id: i64,
    ) -> ActixResult<HttpResponse> {
        count::get_unread_count(self, request, employee_id).await
    }

    /// 标记单条已读
    pub async fn mark_as_read(
        &self,
        request: &HttpRequest,
        notification_id: i64,
        employee_id: i64,
    ) -> ActixResult<HttpResponse> {
        mark_read::mark_as_read(self, request, notification_id, employee_id).await
    }

    /// 标记全部已读
    pub async fn mark_all_as_read(
        &self,
        request: &HttpRequest,
        employee_id: i64,
    ) -> ActixResult<HttpResponse> {
        mark_read::mark_all_as_read(self, request, employee_id).await
    }
}
