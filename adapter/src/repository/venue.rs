use crate::database::{
    map_query_error, model::venue::VenueRow, set_statement_timeout,
    set_transaction_serializable, ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::VenueId,
    venue::{event::CreateVenue, Venue, VenueStatus},
};
use kernel::repository::venue::VenueRepository;
use shared::error::{AppError, AppResult};

const VENUE_COLUMNS: &str = r#"
    venue_id,
    owner_id,
    title,
    price_per_hour,
    status,
    image_ref,
    created_at,
    updated_at
"#;

#[derive(new)]
pub struct VenueRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl VenueRepository for VenueRepositoryImpl {
    async fn create(&self, event: CreateVenue) -> AppResult<VenueId> {
        if event.price_per_hour <= 0 {
            return Err(AppError::UnprocessableEntity(
                "venue price per hour must be positive".into(),
            ));
        }

        let venue_id = VenueId::new();
        let res = sqlx::query(
            r#"
            INSERT INTO venues (venue_id, owner_id, title, price_per_hour, status, image_ref)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(venue_id)
        .bind(event.owner_id)
        .bind(event.title)
        .bind(event.price_per_hour)
        .bind(VenueStatus::Open.to_string())
        .bind(event.image_ref)
        .execute(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no venue record has been created".into(),
            ));
        }

        Ok(venue_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Venue>> {
        let rows: Vec<VenueRow> = sqlx::query_as(&format!(
            r#"
            SELECT {VENUE_COLUMNS}
            FROM venues
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_by_id(&self, venue_id: VenueId) -> AppResult<Option<Venue>> {
        let row: Option<VenueRow> = sqlx::query_as(&format!(
            r#"
            SELECT {VENUE_COLUMNS}
            FROM venues
            WHERE venue_id = $1
            "#
        ))
        .bind(venue_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(map_query_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete_cascade(&self, venue_id: VenueId) -> AppResult<Option<String>> {
        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;
        set_statement_timeout(&mut tx).await?;

        // Dependents go first: notification records of the venue's
        // reservations, then the reservations, then the venue row itself.
        // A failure anywhere before commit rolls the whole thing back.
        sqlx::query(
            r#"
            DELETE FROM notifications
            WHERE reservation_id IN
                (SELECT reservation_id FROM reservations WHERE venue_id = $1)
            "#,
        )
        .bind(venue_id)
        .execute(&mut *tx)
        .await
        .map_err(map_query_error)?;

        sqlx::query("DELETE FROM reservations WHERE venue_id = $1")
            .bind(venue_id)
            .execute(&mut *tx)
            .await
            .map_err(map_query_error)?;

        let image_ref: Option<(Option<String>,)> =
            sqlx::query_as("DELETE FROM venues WHERE venue_id = $1 RETURNING image_ref")
                .bind(venue_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_query_error)?;

        let Some((image_ref,)) = image_ref else {
            return Err(AppError::EntityNotFound(format!(
                "venue ({venue_id}) was not found"
            )));
        };

        tx.commit().await.map_err(AppError::TransactionError)?;

        // The stored image is removed by the caller after this commit;
        // filesystem cleanup is best-effort and never rolls the delete back.
        Ok(image_ref)
    }
}
