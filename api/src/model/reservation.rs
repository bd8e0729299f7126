use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{ReservationId, UserId, VenueId},
    reservation::{Availability, Reservation, ReservationStatus, ReservationVenue},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatusLabel {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    CancellationRequested,
    Completed,
}

impl From<ReservationStatus> for ReservationStatusLabel {
    fn from(value: ReservationStatus) -> Self {
        match value {
            ReservationStatus::Pending => Self::Pending,
            ReservationStatus::Confirmed => Self::Confirmed,
            ReservationStatus::Rejected => Self::Rejected,
            ReservationStatus::Cancelled => Self::Cancelled,
            ReservationStatus::CancellationRequested => Self::CancellationRequested,
            ReservationStatus::Completed => Self::Completed,
        }
    }
}

impl From<ReservationStatusLabel> for ReservationStatus {
    fn from(value: ReservationStatusLabel) -> Self {
        match value {
            ReservationStatusLabel::Pending => Self::Pending,
            ReservationStatusLabel::Confirmed => Self::Confirmed,
            ReservationStatusLabel::Rejected => Self::Rejected,
            ReservationStatusLabel::Cancelled => Self::Cancelled,
            ReservationStatusLabel::CancellationRequested => Self::CancellationRequested,
            ReservationStatusLabel::Completed => Self::Completed,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub event_date: NaiveDate,
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub end_time: NaiveTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatusLabel,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available: bool,
    pub conflicting_id: Option<ReservationId>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(value: Availability) -> Self {
        let Availability {
            available,
            conflicting,
        } = value;
        Self {
            available,
            conflicting_id: conflicting,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub total_cost: i64,
    pub status: ReservationStatusLabel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub venue: ReservationVenueResponse,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            reserved_by,
            event_date,
            start_time,
            end_time,
            total_cost,
            status,
            created_at,
            updated_at,
            venue,
        } = value;
        Self {
            reservation_id,
            reserved_by,
            event_date,
            start_time,
            end_time,
            total_cost,
            status: status.into(),
            created_at,
            updated_at,
            venue: venue.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationVenueResponse {
    pub venue_id: VenueId,
    pub owner_id: UserId,
    pub title: String,
    pub price_per_hour: i64,
}

impl From<ReservationVenue> for ReservationVenueResponse {
    fn from(value: ReservationVenue) -> Self {
        let ReservationVenue {
            venue_id,
            owner_id,
            title,
            price_per_hour,
        } = value;
        Self {
            venue_id,
            owner_id,
            title,
            price_per_hour,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_label_maps_both_ways() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Rejected,
            ReservationStatus::Cancelled,
            ReservationStatus::CancellationRequested,
            ReservationStatus::Completed,
        ] {
            let label = ReservationStatusLabel::from(status);
            assert_eq!(ReservationStatus::from(label), status);
        }
    }

    #[test]
    fn status_label_uses_snake_case_on_the_wire() {
        let req: UpdateReservationStatusRequest =
            serde_json::from_str(r#"{"status":"cancellation_requested"}"#).unwrap();
        assert_eq!(req.status, ReservationStatusLabel::CancellationRequested);
    }

    #[test]
    fn create_request_parses_date_and_times() {
        let req: CreateReservationRequest = serde_json::from_str(
            r#"{"eventDate":"2025-06-01","startTime":"10:00:00","endTime":"12:00:00"}"#,
        )
        .unwrap();
        assert_eq!(req.event_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(req.start_time < req.end_time);
    }
}
