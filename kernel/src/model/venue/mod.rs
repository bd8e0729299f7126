use crate::model::id::{UserId, VenueId};
use chrono::{DateTime, Utc};
use strum::{Display, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum VenueStatus {
    Open,
    Closed,
}

#[derive(Debug)]
pub struct Venue {
    pub venue_id: VenueId,
    pub owner_id: UserId,
    pub title: String,
    pub price_per_hour: i64,
    pub status: VenueStatus,
    pub image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
