use crate::database::{
    map_query_error, model::reservation::ReservationRow, set_statement_timeout,
    set_transaction_serializable, ConnectionPool,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use derive_new::new;
use kernel::model::{
    id::{ReservationId, UserId, VenueId},
    reservation::{
        event::{CreateReservation, UpdateStatus},
        total_cost, Availability, Reservation, ReservationStatus,
    },
    venue::VenueStatus,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

const RESERVATION_COLUMNS: &str = r#"
    r.reservation_id,
    r.venue_id,
    v.owner_id,
    v.title,
    v.price_per_hour,
    r.user_id,
    r.event_date,
    r.start_time,
    r.end_time,
    r.total_cost,
    r.status,
    r.created_at,
    r.updated_at
"#;

// The same conflict rule feeds both the read-only probe and the
// in-transaction check before an insert: half-open intervals, counting
// only statuses that still occupy the slot.
const CONFLICT_SQL: &str = r#"
    SELECT reservation_id
    FROM reservations
    WHERE venue_id = $1
      AND event_date = $2
      AND status IN ('pending', 'confirmed', 'cancellation_requested')
      AND start_time < $4
      AND $3 < end_time
    LIMIT 1
"#;

#[derive(sqlx::FromRow)]
struct VenueGateRow {
    price_per_hour: i64,
    status: String,
}

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        if event.start_time >= event.end_time {
            return Err(AppError::UnprocessableEntity(
                "reservation start time must precede its end time".into(),
            ));
        }

        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;
        set_statement_timeout(&mut tx).await?;

        // Gate on the venue inside the transaction: it must exist and be
        // open for new reservations.
        let venue = sqlx::query_as::<_, VenueGateRow>(
            r#"
            SELECT price_per_hour, status
            FROM venues
            WHERE venue_id = $1
            "#,
        )
        .bind(event.venue_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_query_error)?;

        let venue = match venue {
            None => {
                return Err(AppError::EntityNotFound(format!(
                    "venue ({}) was not found",
                    event.venue_id
                )))
            }
            Some(v) => v,
        };

        let venue_status: VenueStatus = venue.status.parse().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "unknown venue status in row: {}",
                venue.status
            ))
        })?;
        if venue_status != VenueStatus::Open {
            return Err(AppError::UnprocessableEntity(format!(
                "venue ({}) is closed for new reservations",
                event.venue_id
            )));
        }

        // Conflict check and insert share this transaction; under the
        // serializable isolation set above, two concurrent requests for the
        // same slot cannot both pass.
        let conflict: Option<(ReservationId,)> = sqlx::query_as(CONFLICT_SQL)
            .bind(event.venue_id)
            .bind(event.event_date)
            .bind(event.start_time)
            .bind(event.end_time)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_query_error)?;

        if let Some((conflicting_id,)) = conflict {
            return Err(AppError::UnavailableError(format!(
                "venue ({}) is already reserved in the requested range (conflict with {})",
                event.venue_id, conflicting_id
            )));
        }

        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
            INSERT INTO reservations
            (reservation_id, venue_id, user_id, event_date,
             start_time, end_time, total_cost, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reservation_id)
        .bind(event.venue_id)
        .bind(event.reserved_by)
        .bind(event.event_date)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(total_cost(venue.price_per_hour, event.start_time, event.end_time))
        .bind(ReservationStatus::Pending.to_string())
        .execute(&mut *tx)
        .await
        .map_err(map_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn check_availability(
        &self,
        venue_id: VenueId,
        event_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> AppResult<Availability> {
        let conflict: Option<(ReservationId,)> = sqlx::query_as(CONFLICT_SQL)
            .bind(venue_id)
            .bind(event_date)
            .bind(start_time)
            .bind(end_time)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(map_query_error)?;

        Ok(Availability {
            available: conflict.is_none(),
            conflicting: conflict.map(|(id,)| id),
        })
    }

    async fn update_status(&self, event: UpdateStatus) -> AppResult<()> {
        // The WHERE clause carries the expected status; losing the race
        // means zero rows and the caller decides whether to retry.
        let res = sqlx::query(
            r#"
            UPDATE reservations
            SET status = $1, updated_at = now()
            WHERE reservation_id = $2 AND status = $3
            "#,
        )
        .bind(event.target.to_string())
        .bind(event.reservation_id)
        .bind(event.expected.to_string())
        .execute(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::StaleStateError(format!(
                "reservation ({}) is no longer {}",
                event.reservation_id, event.expected
            )));
        }

        Ok(())
    }

    async fn delete(&self, reservation_id: ReservationId) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        set_statement_timeout(&mut tx).await?;

        sqlx::query("DELETE FROM notifications WHERE reservation_id = $1")
            .bind(reservation_id)
            .execute(&mut *tx)
            .await
            .map_err(map_query_error)?;

        let res = sqlx::query("DELETE FROM reservations WHERE reservation_id = $1")
            .bind(reservation_id)
            .execute(&mut *tx)
            .await
            .map_err(map_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "reservation ({reservation_id}) was not found"
            )));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let row: Option<ReservationRow> = sqlx::query_as(&format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM reservations AS r
            INNER JOIN venues AS v ON r.venue_id = v.venue_id
            WHERE r.reservation_id = $1
            "#
        ))
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        match row {
            None => Err(AppError::EntityNotFound(format!(
                "reservation ({reservation_id}) was not found"
            ))),
            Some(row) => row.try_into(),
        }
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM reservations AS r
            INNER JOIN venues AS v ON r.venue_id = v.venue_id
            WHERE r.user_id = $1
            ORDER BY r.event_date ASC, r.start_time ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_by_venue_id(&self, venue_id: VenueId) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM reservations AS r
            INNER JOIN venues AS v ON r.venue_id = v.venue_id
            WHERE r.venue_id = $1
            ORDER BY r.event_date ASC, r.start_time ASC
            "#
        ))
        .bind(venue_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
