use thiserror::Error;

use crate::backend::Table;

/// Failure of a backend round-trip or of local validation before one.
///
/// Every variant is recoverable: the UI shows it as a transient notification
/// and the user retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{table} record {id} not found")]
    NotFound { table: Table, id: String },

    #[error("{0}")]
    Invalid(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("not permitted")]
    Forbidden,
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}
