use crate::model::id::{NotificationId, ReservationId, UserId};
use crate::model::reservation::ReservationStatus;
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug)]
pub struct Notification {
    pub notification_id: NotificationId,
    pub recipient_id: UserId,
    pub reservation_id: ReservationId,
    pub message: String,
    pub resulting_status: ReservationStatus,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
