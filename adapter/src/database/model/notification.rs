use kernel::model::{
    id::{NotificationId, ReservationId, UserId},
    notification::Notification,
    reservation::ReservationStatus,
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct NotificationRow {
    pub notification_id: NotificationId,
    pub recipient_id: UserId,
    pub reservation_id: ReservationId,
    pub message: String,
    pub resulting_status: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(value: NotificationRow) -> Result<Self, Self::Error> {
        let NotificationRow {
            notification_id,
            recipient_id,
            reservation_id,
            message,
            resulting_status,
            is_read,
            created_at,
        } = value;
        let resulting_status: ReservationStatus = resulting_status.parse().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "unknown resulting status in row: {resulting_status}"
            ))
        })?;
        Ok(Notification {
            notification_id,
            recipient_id,
            reservation_id,
            message,
            resulting_status,
            is_read,
            created_at,
        })
    }
}
