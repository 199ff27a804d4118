//! Server-side error type.
//!
//! Handlers return [`ApiError`] internally and convert to [`ServerFnError`] at
//! the server-function boundary. The message is what the client shows in its
//! notification, so database details are logged rather than forwarded.

use dioxus::prelude::ServerFnError;
use releases::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Not permitted")]
    Forbidden,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("{0}")]
    Password(String),
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound { table, id } => ApiError::NotFound(format!("{table} record {id}")),
            BackendError::Forbidden => ApiError::Forbidden,
            other => ApiError::InvalidInput(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidInput(format!("malformed row: {err}"))
    }
}

impl From<uuid::Error> for ApiError {
    fn from(err: uuid::Error) -> Self {
        ApiError::InvalidInput(format!("invalid id: {err}"))
    }
}

impl From<ApiError> for ServerFnError {
    fn from(err: ApiError) -> Self {
        if let ApiError::Database(ref e) = err {
            tracing::error!("database error: {e}");
        }
        ServerFnError::new(err.to_string())
    }
}
