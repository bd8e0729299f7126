use crate::database::{map_query_error, model::notification::NotificationRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{NotificationId, UserId},
    notification::{
        event::{CreateNotification, MarkNotificationRead},
        Notification,
    },
};
use kernel::repository::notification::NotificationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct NotificationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn create(&self, event: CreateNotification) -> AppResult<NotificationId> {
        let notification_id = NotificationId::new();
        let res = sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_id, recipient_id, reservation_id, message, resulting_status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(notification_id)
        .bind(event.recipient_id)
        .bind(event.reservation_id)
        .bind(event.message)
        .bind(event.resulting_status.to_string())
        .execute(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no notification record has been created".into(),
            ));
        }

        Ok(notification_id)
    }

    async fn find_by_recipient_id(&self, recipient_id: UserId) -> AppResult<Vec<Notification>> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
            SELECT
                notification_id,
                recipient_id,
                reservation_id,
                message,
                resulting_status,
                is_read,
                created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(recipient_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn mark_read(&self, event: MarkNotificationRead) -> AppResult<()> {
        // Scoped to the recipient so nobody can mark someone else's
        // notification read.
        let res = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_id = $1 AND recipient_id = $2
            "#,
        )
        .bind(event.notification_id)
        .bind(event.recipient_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "notification ({}) was not found for this recipient",
                event.notification_id
            )));
        }

        Ok(())
    }
}
