use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("{0}")]
    InvalidTransitionError(String),
    #[error("{0}")]
    UnavailableError(String),
    #[error("{0}")]
    StaleStateError(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("statement exceeded its time bound")]
    TimeoutError(#[source] sqlx::Error),
    #[error("transaction failed")]
    TransactionError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("key-value store operation failed")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("image storage operation failed")]
    ImageStorageError(#[source] std::io::Error),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error(transparent)]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("unauthenticated")]
    UnauthenticatedError,
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            AppError::InvalidTransitionError(_)
            | AppError::UnavailableError(_)
            | AppError::StaleStateError(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) | AppError::ConvertToUuidError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            AppError::TimeoutError(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::TransactionError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::SpecificOperationError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::ImageStorageError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code.is_server_error() {
            // Internal detail is logged here and never shown to the caller.
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "unexpected error happened"
            );
            return (
                status_code,
                Json(json!({ "error": "try again later" })),
            )
                .into_response();
        }

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
