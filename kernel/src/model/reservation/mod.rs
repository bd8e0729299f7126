use crate::model::id::{ReservationId, UserId, VenueId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use strum::{Display, EnumString};

pub mod event;

/// Closed set of reservation states. Every status check in the system goes
/// through this enum; the raw strings only exist at the database boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
    CancellationRequested,
    Completed,
}

impl ReservationStatus {
    /// Statuses that still occupy the time slot. A requested cancellation
    /// keeps the slot reserved until the owner resolves it.
    pub const ACTIVE: [ReservationStatus; 3] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::CancellationRequested,
    ];

    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Rejected
                | ReservationStatus::Cancelled
                | ReservationStatus::Completed
        )
    }
}

#[derive(Debug)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub total_cost: i64,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub venue: ReservationVenue,
}

#[derive(Debug)]
pub struct ReservationVenue {
    pub venue_id: VenueId,
    pub owner_id: UserId,
    pub title: String,
    pub price_per_hour: i64,
}

/// Result of an availability probe for a candidate time range.
#[derive(Debug)]
pub struct Availability {
    pub available: bool,
    pub conflicting: Option<ReservationId>,
}

/// Half-open interval overlap. A reservation ending at 10:00 does not
/// conflict with one starting at 10:00.
pub fn ranges_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Minute-accurate total: `price_per_hour * minutes / 60`.
pub fn total_cost(price_per_hour: i64, start: NaiveTime, end: NaiveTime) -> i64 {
    let minutes = (end - start).num_minutes();
    price_per_hour * minutes / 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn t(hm: (u32, u32)) -> NaiveTime {
        NaiveTime::from_hms_opt(hm.0, hm.1, 0).unwrap()
    }

    #[rstest]
    #[case((10, 0), (12, 0), (11, 0), (13, 0), true)]
    #[case((11, 0), (13, 0), (10, 0), (12, 0), true)]
    #[case((10, 0), (12, 0), (10, 30), (11, 30), true)]
    #[case((10, 30), (11, 30), (10, 0), (12, 0), true)]
    #[case((10, 0), (12, 0), (12, 0), (14, 0), false)] // abutment is allowed
    #[case((12, 0), (14, 0), (10, 0), (12, 0), false)]
    #[case((8, 0), (9, 0), (10, 0), (11, 0), false)]
    #[case((10, 0), (12, 0), (10, 0), (12, 0), true)]
    fn half_open_overlap(
        #[case] a_start: (u32, u32),
        #[case] a_end: (u32, u32),
        #[case] b_start: (u32, u32),
        #[case] b_end: (u32, u32),
        #[case] expected: bool,
    ) {
        assert_eq!(
            ranges_overlap(t(a_start), t(a_end), t(b_start), t(b_end)),
            expected
        );
    }

    #[rstest]
    #[case(500, (10, 0), (12, 0), 1000)]
    #[case(500, (10, 0), (11, 30), 750)]
    #[case(1000, (9, 15), (9, 45), 500)]
    #[case(300, (0, 0), (23, 0), 6900)]
    fn cost_is_minute_accurate(
        #[case] price: i64,
        #[case] start: (u32, u32),
        #[case] end: (u32, u32),
        #[case] expected: i64,
    ) {
        assert_eq!(total_cost(price, t(start), t(end)), expected);
    }

    #[test]
    fn status_string_round_trip() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Rejected,
            ReservationStatus::Cancelled,
            ReservationStatus::CancellationRequested,
            ReservationStatus::Completed,
        ] {
            let parsed: ReservationStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(
            ReservationStatus::CancellationRequested.to_string(),
            "cancellation_requested"
        );
    }

    #[test]
    fn active_and_terminal_are_disjoint_and_exhaustive() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(ReservationStatus::CancellationRequested.is_active());
        assert!(ReservationStatus::Rejected.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(ReservationStatus::Completed.is_terminal());
        for status in ReservationStatus::ACTIVE {
            assert!(!status.is_terminal());
        }
    }
}
