//! Reservation lifecycle: who may move a reservation from which status to
//! which, and who gets notified when it happens.
//!
//! Everything here is a pure function over already-fetched rows. Callers
//! re-fetch the reservation (and its venue) on every call so that no stale
//! row ever feeds an authorization decision, and serialize the actual write
//! with a compare-and-swap update keyed on the status observed here.

use crate::model::id::UserId;
use crate::model::reservation::ReservationStatus;
use crate::model::user::User;
use shared::error::{AppError, AppResult};

/// The acting principal's relationship to the entity under change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Admin,
    Owner,
    Booker,
    Unrelated,
}

/// Resolves the actor's role relative to a venue and, for reservations,
/// the booking user. Admin wins over ownership, ownership over booking.
pub fn resolve_relation(actor: &User, venue_owner: UserId, booked_by: Option<UserId>) -> Relation {
    if actor.is_admin() {
        Relation::Admin
    } else if actor.user_id == venue_owner {
        Relation::Owner
    } else if booked_by == Some(actor.user_id) {
        Relation::Booker
    } else {
        Relation::Unrelated
    }
}

/// Which side of the booking the guard admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    OwnerOrAdmin,
    BookerOnly,
}

impl Guard {
    fn admits(self, relation: Relation) -> bool {
        match self {
            Guard::OwnerOrAdmin => matches!(relation, Relation::Owner | Relation::Admin),
            Guard::BookerOnly => relation == Relation::Booker,
        }
    }
}

/// The counterparty to notify after a transition lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyParty {
    Owner,
    Booker,
}

/// A checked transition: the edge exists and the actor is admitted.
/// `from` doubles as the expected value for the compare-and-swap write.
#[derive(Debug)]
pub struct TransitionPlan {
    pub from: ReservationStatus,
    pub to: ReservationStatus,
    pub notify: Option<NotifyParty>,
}

fn edge(
    from: ReservationStatus,
    to: ReservationStatus,
) -> Option<(Guard, Option<NotifyParty>)> {
    use ReservationStatus::*;
    match (from, to) {
        (Pending, Confirmed) => Some((Guard::OwnerOrAdmin, Some(NotifyParty::Booker))),
        (Pending, Rejected) => Some((Guard::OwnerOrAdmin, Some(NotifyParty::Booker))),
        (Pending, CancellationRequested) => Some((Guard::BookerOnly, Some(NotifyParty::Owner))),
        (Confirmed, CancellationRequested) => Some((Guard::BookerOnly, Some(NotifyParty::Owner))),
        (Confirmed, Completed) => Some((Guard::OwnerOrAdmin, None)),
        (CancellationRequested, Cancelled) => {
            Some((Guard::OwnerOrAdmin, Some(NotifyParty::Booker)))
        }
        // Denying a cancellation request puts the booking back into the
        // confirmed slot rather than freeing it.
        (CancellationRequested, Confirmed) => {
            Some((Guard::OwnerOrAdmin, Some(NotifyParty::Booker)))
        }
        _ => None,
    }
}

/// Validates `(current, target)` against the transition table and the
/// actor's relation.
///
/// Edge legality is checked before the guard: a request for an edge that
/// does not exist is an `InvalidTransitionError` no matter who asks
/// (including `target == current`, so a repeated request is a conflict,
/// not a silent no-op). A legal edge requested by the wrong party is
/// `ForbiddenOperation`.
pub fn plan_transition(
    current: ReservationStatus,
    target: ReservationStatus,
    relation: Relation,
) -> AppResult<TransitionPlan> {
    let Some((guard, notify)) = edge(current, target) else {
        return Err(AppError::InvalidTransitionError(format!(
            "reservation cannot move from {current} to {target}"
        )));
    };
    if !guard.admits(relation) {
        return Err(AppError::ForbiddenOperation(format!(
            "not allowed to move this reservation from {current} to {target}"
        )));
    }
    Ok(TransitionPlan {
        from: current,
        to: target,
        notify,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{id::UserId, role::Role};
    use rstest::rstest;
    use ReservationStatus::*;

    fn user(role: Role) -> User {
        User {
            user_id: UserId::new(),
            user_name: "someone".into(),
            email: "someone@example.com".into(),
            role,
        }
    }

    #[rstest]
    #[case(Pending, Confirmed, Relation::Owner)]
    #[case(Pending, Confirmed, Relation::Admin)]
    #[case(Pending, Rejected, Relation::Owner)]
    #[case(Pending, Rejected, Relation::Admin)]
    #[case(Pending, CancellationRequested, Relation::Booker)]
    #[case(Confirmed, CancellationRequested, Relation::Booker)]
    #[case(Confirmed, Completed, Relation::Owner)]
    #[case(CancellationRequested, Cancelled, Relation::Owner)]
    #[case(CancellationRequested, Cancelled, Relation::Admin)]
    #[case(CancellationRequested, Confirmed, Relation::Owner)]
    fn legal_edges_are_admitted(
        #[case] from: ReservationStatus,
        #[case] to: ReservationStatus,
        #[case] relation: Relation,
    ) {
        let plan = plan_transition(from, to, relation).unwrap();
        assert_eq!(plan.from, from);
        assert_eq!(plan.to, to);
    }

    #[rstest]
    // A booker never cancels directly; the owner must see the request first.
    #[case(Pending, Cancelled)]
    #[case(Confirmed, Cancelled)]
    // Terminal states admit nothing.
    #[case(Rejected, Confirmed)]
    #[case(Cancelled, Pending)]
    #[case(Completed, CancellationRequested)]
    // Repeating an already-reached status is a conflict, not a no-op.
    #[case(Confirmed, Confirmed)]
    #[case(Pending, Pending)]
    // No skipping through the graph.
    #[case(Pending, Completed)]
    #[case(CancellationRequested, Rejected)]
    fn missing_edges_are_invalid(#[case] from: ReservationStatus, #[case] to: ReservationStatus) {
        // Even an admin cannot traverse an edge that does not exist.
        let err = plan_transition(from, to, Relation::Admin).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransitionError(_)));
    }

    #[rstest]
    #[case(Pending, Confirmed, Relation::Booker)]
    #[case(Pending, Rejected, Relation::Booker)]
    #[case(Pending, CancellationRequested, Relation::Owner)]
    #[case(Pending, CancellationRequested, Relation::Admin)]
    #[case(Confirmed, CancellationRequested, Relation::Unrelated)]
    #[case(CancellationRequested, Cancelled, Relation::Booker)]
    #[case(Pending, Confirmed, Relation::Unrelated)]
    fn wrong_party_is_forbidden(
        #[case] from: ReservationStatus,
        #[case] to: ReservationStatus,
        #[case] relation: Relation,
    ) {
        let err = plan_transition(from, to, relation).unwrap_err();
        assert!(matches!(err, AppError::ForbiddenOperation(_)));
    }

    #[rstest]
    #[case(Pending, Confirmed, Some(NotifyParty::Booker))]
    #[case(Pending, Rejected, Some(NotifyParty::Booker))]
    #[case(Pending, CancellationRequested, Some(NotifyParty::Owner))]
    #[case(Confirmed, CancellationRequested, Some(NotifyParty::Owner))]
    #[case(CancellationRequested, Cancelled, Some(NotifyParty::Booker))]
    #[case(CancellationRequested, Confirmed, Some(NotifyParty::Booker))]
    #[case(Confirmed, Completed, None)]
    fn counterparty_is_notified(
        #[case] from: ReservationStatus,
        #[case] to: ReservationStatus,
        #[case] expected: Option<NotifyParty>,
    ) {
        let relation = match from {
            Pending | Confirmed if to == CancellationRequested => Relation::Booker,
            _ => Relation::Owner,
        };
        let plan = plan_transition(from, to, relation).unwrap();
        assert_eq!(plan.notify, expected);
    }

    #[test]
    fn accept_then_request_cancellation_then_cancel() {
        // Owner accepts, booker asks out, owner confirms the cancel.
        let mut status = Pending;
        for (target, relation) in [
            (Confirmed, Relation::Owner),
            (CancellationRequested, Relation::Booker),
            (Cancelled, Relation::Owner),
        ] {
            status = plan_transition(status, target, relation).unwrap().to;
        }
        assert!(status.is_terminal());
    }

    #[test]
    fn relation_resolution_precedence() {
        let owner_id = UserId::new();
        let booker_id = UserId::new();

        let admin = user(Role::Admin);
        assert_eq!(
            resolve_relation(&admin, owner_id, Some(booker_id)),
            Relation::Admin
        );

        let mut owner = user(Role::User);
        owner.user_id = owner_id;
        assert_eq!(
            resolve_relation(&owner, owner_id, Some(booker_id)),
            Relation::Owner
        );

        let mut booker = user(Role::User);
        booker.user_id = booker_id;
        assert_eq!(
            resolve_relation(&booker, owner_id, Some(booker_id)),
            Relation::Booker
        );
        // No booking side on venue-level checks.
        assert_eq!(resolve_relation(&booker, owner_id, None), Relation::Unrelated);

        let stranger = user(Role::User);
        assert_eq!(
            resolve_relation(&stranger, owner_id, Some(booker_id)),
            Relation::Unrelated
        );
    }
}
