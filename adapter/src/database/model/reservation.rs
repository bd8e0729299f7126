use kernel::model::{
    id::{ReservationId, UserId, VenueId},
    reservation::{Reservation, ReservationStatus, ReservationVenue},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Reservation joined with the owning venue; the venue columns feed the
/// authorization check without a second fetch.
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub venue_id: VenueId,
    pub owner_id: UserId,
    pub title: String,
    pub price_per_hour: i64,
    pub user_id: UserId,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub total_cost: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            venue_id,
            owner_id,
            title,
            price_per_hour,
            user_id,
            event_date,
            start_time,
            end_time,
            total_cost,
            status,
            created_at,
            updated_at,
        } = value;
        let status: ReservationStatus = status.parse().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "unknown reservation status in row: {status}"
            ))
        })?;
        Ok(Reservation {
            reservation_id,
            reserved_by: user_id,
            event_date,
            start_time,
            end_time,
            total_cost,
            status,
            created_at,
            updated_at,
            venue: ReservationVenue {
                venue_id,
                owner_id,
                title,
                price_per_hour,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> ReservationRow {
        ReservationRow {
            reservation_id: ReservationId::new(),
            venue_id: VenueId::new(),
            owner_id: UserId::new(),
            title: "Loft 21".into(),
            price_per_hour: 500,
            user_id: UserId::new(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            total_cost: 1000,
            status: status.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_with_known_status() {
        let reservation = Reservation::try_from(row("cancellation_requested")).unwrap();
        assert_eq!(reservation.status, ReservationStatus::CancellationRequested);
        assert_eq!(reservation.venue.price_per_hour, 500);
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let err = Reservation::try_from(row("on_hold")).unwrap_err();
        assert!(matches!(err, AppError::ConversionEntityError(_)));
    }
}
