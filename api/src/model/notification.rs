use crate::model::reservation::ReservationStatusLabel;
use chrono::{DateTime, Utc};
use kernel::model::{
    id::{NotificationId, ReservationId, UserId},
    notification::Notification,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification_id: NotificationId,
    pub recipient_id: UserId,
    pub reservation_id: ReservationId,
    pub message: String,
    pub resulting_status: ReservationStatusLabel,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        let Notification {
            notification_id,
            recipient_id,
            reservation_id,
            message,
            resulting_status,
            is_read,
            created_at,
        } = value;
        Self {
            notification_id,
            recipient_id,
            reservation_id,
            message,
            resulting_status: resulting_status.into(),
            is_read,
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponse {
    pub items: Vec<NotificationResponse>,
}

impl From<Vec<Notification>> for NotificationsResponse {
    fn from(value: Vec<Notification>) -> Self {
        Self {
            items: value.into_iter().map(NotificationResponse::from).collect(),
        }
    }
}
