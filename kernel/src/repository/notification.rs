use crate::model::{
    id::{NotificationId, UserId},
    notification::{
        event::{CreateNotification, MarkNotificationRead},
        Notification,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert-only. Callers treat a failure here as best-effort: the state
    /// change that triggered the notification stands regardless.
    async fn create(&self, event: CreateNotification) -> AppResult<NotificationId>;

    async fn find_by_recipient_id(&self, recipient_id: UserId) -> AppResult<Vec<Notification>>;

    /// Only the recipient may mark their notification read.
    async fn mark_read(&self, event: MarkNotificationRead) -> AppResult<()>;
}
