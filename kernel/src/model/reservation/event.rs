use crate::model::id::{ReservationId, UserId, VenueId};
use crate::model::reservation::ReservationStatus;
use chrono::{NaiveDate, NaiveTime};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateReservation {
    pub venue_id: VenueId,
    pub reserved_by: UserId,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Compare-and-swap status update. The write only succeeds while the row
/// still holds `expected`; anything else lost a race.
#[derive(Debug, new)]
pub struct UpdateStatus {
    pub reservation_id: ReservationId,
    pub expected: ReservationStatus,
    pub target: ReservationStatus,
}
