use crate::model::id::{NotificationId, ReservationId, UserId};
use crate::model::reservation::ReservationStatus;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateNotification {
    pub recipient_id: UserId,
    pub reservation_id: ReservationId,
    pub message: String,
    pub resulting_status: ReservationStatus,
}

#[derive(Debug, new)]
pub struct MarkNotificationRead {
    pub notification_id: NotificationId,
    pub recipient_id: UserId,
}
