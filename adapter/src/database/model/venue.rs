use kernel::model::{
    id::{UserId, VenueId},
    venue::{Venue, VenueStatus},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct VenueRow {
    pub venue_id: VenueId,
    pub owner_id: UserId,
    pub title: String,
    pub price_per_hour: i64,
    pub status: String,
    pub image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<VenueRow> for Venue {
    type Error = AppError;

    fn try_from(value: VenueRow) -> Result<Self, Self::Error> {
        let VenueRow {
            venue_id,
            owner_id,
            title,
            price_per_hour,
            status,
            image_ref,
            created_at,
            updated_at,
        } = value;
        let status: VenueStatus = status.parse().map_err(|_| {
            AppError::ConversionEntityError(format!("unknown venue status in row: {status}"))
        })?;
        Ok(Venue {
            venue_id,
            owner_id,
            title,
            price_per_hour,
            status,
            image_ref,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_row_status_is_checked() {
        let row = VenueRow {
            venue_id: VenueId::new(),
            owner_id: UserId::new(),
            title: "Riverside Hall".into(),
            price_per_hour: 750,
            status: "closed".into(),
            image_ref: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let venue = Venue::try_from(row).unwrap();
        assert_eq!(venue.status, VenueStatus::Closed);
    }
}
