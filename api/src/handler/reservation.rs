use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        AvailabilityQuery, AvailabilityResponse, CreateReservationRequest, ReservationResponse,
        ReservationsResponse, UpdateReservationStatusRequest,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::lifecycle::{plan_transition, resolve_relation, NotifyParty, TransitionPlan};
use kernel::model::{
    id::{ReservationId, VenueId},
    notification::event::CreateNotification,
    reservation::{
        event::{CreateReservation, UpdateStatus},
        Reservation, ReservationStatus,
    },
    user::User,
};
use kernel::repository::reservation::ReservationRepository;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn reserve_venue(
    user: AuthorizedUser,
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    req.validate(&())?;

    if req.start_time >= req.end_time {
        return Err(AppError::UnprocessableEntity(
            "reservation start time must precede its end time".into(),
        ));
    }

    let create_reservation = CreateReservation::new(
        venue_id,
        user.id(),
        req.event_date,
        req.start_time,
        req.end_time,
    );

    // The availability check happens inside the repository's transaction;
    // a conflict comes back as `UnavailableError`.
    let reservation_id = registry
        .reservation_repository()
        .create(create_reservation)
        .await?;

    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

pub async fn check_venue_availability(
    _user: AuthorizedUser,
    Path(venue_id): Path<VenueId>,
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    if query.start >= query.end {
        return Err(AppError::UnprocessableEntity(
            "availability range start must precede its end".into(),
        ));
    }

    registry
        .reservation_repository()
        .check_availability(venue_id, query.date, query.start, query.end)
        .await
        .map(AvailabilityResponse::from)
        .map(Json)
}

/// Drives one edge of the reservation lifecycle.
///
/// Role, current status and guard are all re-evaluated from a fresh row,
/// then the write goes through the compare-and-swap update. Losing that
/// race gets exactly one retry; after the retry the conflict is the
/// caller's to resolve.
pub async fn update_reservation_status(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationStatusRequest>,
) -> AppResult<Json<ReservationResponse>> {
    let target = ReservationStatus::from(req.status);

    let repo = registry.reservation_repository();
    let (reservation, plan) =
        apply_status_change(repo.as_ref(), &user.user, reservation_id, target).await?;

    emit_notification(&registry, &reservation, &plan).await;

    let updated = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?;
    Ok(Json(updated.into()))
}

/// Fetch, plan and write one lifecycle edge. Losing the compare-and-swap
/// race gets exactly one retry, which re-fetches and re-plans from the
/// fresh row; a second loss, or a plan that no longer holds, is returned
/// to the caller.
async fn apply_status_change(
    repo: &dyn ReservationRepository,
    actor: &User,
    reservation_id: ReservationId,
    target: ReservationStatus,
) -> AppResult<(Reservation, TransitionPlan)> {
    let mut retried = false;

    loop {
        let reservation = repo.find_by_id(reservation_id).await?;

        let relation = resolve_relation(
            actor,
            reservation.venue.owner_id,
            Some(reservation.reserved_by),
        );
        let plan = plan_transition(reservation.status, target, relation)?;

        match repo
            .update_status(UpdateStatus::new(reservation_id, plan.from, plan.to))
            .await
        {
            Ok(()) => return Ok((reservation, plan)),
            Err(AppError::StaleStateError(_)) if !retried => {
                retried = true;
            }
            Err(e) => return Err(e),
        }
    }
}

pub async fn delete_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation(
            "only an administrator may delete a reservation record".into(),
        ));
    }

    registry
        .reservation_repository()
        .delete(reservation_id)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn show_my_reservations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_by_user_id(user.id())
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_venue_reservations(
    _user: AuthorizedUser,
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_repository()
        .find_by_venue_id(venue_id)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

// Notification delivery is best-effort: the state change is authoritative
// whether or not this insert lands.
async fn emit_notification(registry: &AppRegistry, reservation: &Reservation, plan: &TransitionPlan) {
    let Some(party) = plan.notify else {
        return;
    };

    let (recipient, message) = match party {
        NotifyParty::Owner => (
            reservation.venue.owner_id,
            format!(
                "A cancellation was requested for the booking of {} on {}",
                reservation.venue.title, reservation.event_date
            ),
        ),
        NotifyParty::Booker => (
            reservation.reserved_by,
            format!(
                "Your booking of {} on {} is now {}",
                reservation.venue.title, reservation.event_date, plan.to
            ),
        ),
    };

    if let Err(e) = registry
        .notification_repository()
        .create(CreateNotification::new(
            recipient,
            reservation.reservation_id,
            message,
            plan.to,
        ))
        .await
    {
        tracing::warn!(
            error.cause_chain = ?e,
            reservation_id = %reservation.reservation_id,
            "failed to record notification for status change"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use kernel::model::{
        id::{UserId, VenueId},
        reservation::{Availability, ReservationVenue},
        role::Role,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Repository whose reads and writes play out a fixed script, so the
    /// orchestration around them can be observed without a database.
    struct ScriptedReservations {
        owner_id: UserId,
        booker_id: UserId,
        // Status served by each successive find_by_id.
        reads: Mutex<Vec<ReservationStatus>>,
        // Outcome of each successive update_status; true means the row
        // no longer held the expected status.
        writes: Mutex<Vec<bool>>,
        finds: AtomicUsize,
        updates: AtomicUsize,
    }

    impl ScriptedReservations {
        fn new(reads: Vec<ReservationStatus>, writes: Vec<bool>) -> Self {
            Self {
                owner_id: UserId::new(),
                booker_id: UserId::new(),
                reads: Mutex::new(reads),
                writes: Mutex::new(writes),
                finds: AtomicUsize::new(0),
                updates: AtomicUsize::new(0),
            }
        }

        fn owner(&self) -> User {
            User {
                user_id: self.owner_id,
                user_name: "owner".into(),
                email: "owner@example.com".into(),
                role: Role::User,
            }
        }

        fn reservation(&self, id: ReservationId, status: ReservationStatus) -> Reservation {
            Reservation {
                reservation_id: id,
                reserved_by: self.booker_id,
                event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                total_cost: 1000,
                status,
                created_at: Utc::now(),
                updated_at: Utc::now(),
                venue: ReservationVenue {
                    venue_id: VenueId::new(),
                    owner_id: self.owner_id,
                    title: "Loft 21".into(),
                    price_per_hour: 500,
                },
            }
        }
    }

    #[async_trait]
    impl ReservationRepository for ScriptedReservations {
        async fn create(&self, _event: CreateReservation) -> AppResult<ReservationId> {
            unreachable!()
        }

        async fn check_availability(
            &self,
            _venue_id: VenueId,
            _event_date: NaiveDate,
            _start_time: NaiveTime,
            _end_time: NaiveTime,
        ) -> AppResult<Availability> {
            unreachable!()
        }

        async fn update_status(&self, event: UpdateStatus) -> AppResult<()> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            let stale = self.writes.lock().unwrap().remove(0);
            if stale {
                Err(AppError::StaleStateError(format!(
                    "reservation ({}) is no longer {}",
                    event.reservation_id, event.expected
                )))
            } else {
                Ok(())
            }
        }

        async fn delete(&self, _reservation_id: ReservationId) -> AppResult<()> {
            unreachable!()
        }

        async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            let status = self.reads.lock().unwrap().remove(0);
            Ok(self.reservation(reservation_id, status))
        }

        async fn find_by_user_id(&self, _user_id: UserId) -> AppResult<Vec<Reservation>> {
            unreachable!()
        }

        async fn find_by_venue_id(&self, _venue_id: VenueId) -> AppResult<Vec<Reservation>> {
            unreachable!()
        }
    }

    use ReservationStatus::*;

    #[tokio::test]
    async fn lost_race_is_retried_once_and_succeeds() {
        // First write loses the race, the re-read still allows the edge.
        let repo = ScriptedReservations::new(vec![Pending, Pending], vec![true, false]);
        let owner = repo.owner();

        let (_, plan) =
            apply_status_change(&repo, &owner, ReservationId::new(), Confirmed)
                .await
                .unwrap();

        assert_eq!(plan.to, Confirmed);
        assert_eq!(repo.finds.load(Ordering::SeqCst), 2);
        assert_eq!(repo.updates.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_sees_target_already_reached_and_conflicts() {
        // A concurrent confirm landed between the read and the write; the
        // retry re-reads, finds no confirmed -> confirmed edge, and stops
        // without writing again.
        let repo = ScriptedReservations::new(vec![Pending, Confirmed], vec![true]);
        let owner = repo.owner();

        let err = apply_status_change(&repo, &owner, ReservationId::new(), Confirmed)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidTransitionError(_)));
        assert_eq!(repo.finds.load(Ordering::SeqCst), 2);
        assert_eq!(repo.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn second_lost_race_is_surfaced() {
        let repo = ScriptedReservations::new(vec![Pending, Pending], vec![true, true]);
        let owner = repo.owner();

        let err = apply_status_change(&repo, &owner, ReservationId::new(), Confirmed)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::StaleStateError(_)));
        // Exactly one retry: two writes, never a third.
        assert_eq!(repo.updates.load(Ordering::SeqCst), 2);
    }
}
