use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{postgres::PgConnectOptions, PgPool};

pub mod model;

const STATEMENT_TIMEOUT: &str = "5s";

fn make_pg_connect_options(cfg: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.username)
        .password(&cfg.password)
        .database(&cfg.database)
        // Session-level bound so every statement, not only those inside an
        // explicit transaction, is cut off at the same limit.
        .options([("statement_timeout", STATEMENT_TIMEOUT)])
}

#[derive(Clone)]
pub struct ConnectionPool(PgPool);

impl ConnectionPool {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &PgPool {
        &self.0
    }

    pub async fn begin(&self) -> AppResult<sqlx::Transaction<'_, sqlx::Postgres>> {
        self.0.begin().await.map_err(AppError::TransactionError)
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> ConnectionPool {
    ConnectionPool(PgPool::connect_lazy_with(make_pg_connect_options(cfg)))
}

/// Read-then-write transactions run serializable so two concurrent
/// bookings of the same slot cannot both pass the conflict check.
pub(crate) async fn set_transaction_serializable(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> AppResult<()> {
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
    Ok(())
}

/// Re-asserts the statement bound inside an explicit transaction; expiry
/// surfaces as `TimeoutError` through `map_query_error`.
pub(crate) async fn set_statement_timeout(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> AppResult<()> {
    sqlx::query(&format!(
        "SET LOCAL statement_timeout = '{STATEMENT_TIMEOUT}'"
    ))
    .execute(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;
    Ok(())
}

// Postgres reports a cancelled statement (statement_timeout included) as
// SQLSTATE 57014.
const QUERY_CANCELED: &str = "57014";

pub(crate) fn map_query_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::PoolTimedOut => AppError::TimeoutError(e),
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some(QUERY_CANCELED) => {
            AppError::TimeoutError(e)
        }
        e => AppError::SpecificOperationError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_carry_the_configured_target() {
        let cfg = DatabaseConfig {
            host: "db".into(),
            port: 5433,
            username: "app".into(),
            password: "passwd".into(),
            database: "venues".into(),
        };
        let opts = make_pg_connect_options(&cfg);
        assert_eq!(opts.get_host(), "db");
        assert_eq!(opts.get_port(), 5433);
        assert_eq!(opts.get_database(), Some("venues"));
    }
}
