use crate::model::{
    id::VenueId,
    venue::{event::CreateVenue, Venue},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn create(&self, event: CreateVenue) -> AppResult<VenueId>;
    async fn find_all(&self) -> AppResult<Vec<Venue>>;
    async fn find_by_id(&self, venue_id: VenueId) -> AppResult<Option<Venue>>;

    /// Removes the venue and every reservation referencing it (and their
    /// notifications) in a single transaction. Returns the stored image
    /// reference, if any, for best-effort cleanup after commit.
    async fn delete_cascade(&self, venue_id: VenueId) -> AppResult<Option<String>>;
}
