use crate::model::{
    id::{ReservationId, UserId, VenueId},
    reservation::{
        event::{CreateReservation, UpdateStatus},
        Availability, Reservation,
    },
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts a new pending reservation. The availability check runs in the
    /// same transaction as the insert so two concurrent requests for the
    /// same slot cannot both observe "no conflict".
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;

    /// Read-only probe of the same conflict rule used by `create`.
    async fn check_availability(
        &self,
        venue_id: VenueId,
        event_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> AppResult<Availability>;

    /// Compare-and-swap status write; `StaleStateError` if the row's status
    /// no longer matches the expected value.
    async fn update_status(&self, event: UpdateStatus) -> AppResult<()>;

    /// Physical delete plus the reservation's notifications, in one
    /// transaction. Cascade and admin use only; user-facing cancellation is
    /// a status transition.
    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()>;

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    async fn find_by_venue_id(&self, venue_id: VenueId) -> AppResult<Vec<Reservation>>;
}
