use crate::domain::value_objects::MutationKind;
use thiserror::Error;

/// Failures reported by the collaborators behind the engine (resource client,
/// configuration, background tasks).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Cancelled: {0}")]
    Cancelled(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        AppError::Server {
            status,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            AppError::Cancelled(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Outcome of a write that did not go through.
///
/// `NoIdentity` and `InvalidInput` are raised before anything touches the
/// cache. `Rejected` means the optimistic write was applied and has already
/// been rolled back.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MutationError {
    #[error("{0} requires an authenticated user")]
    NoIdentity(MutationKind),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{kind} rejected: {source}")]
    Rejected {
        kind: MutationKind,
        #[source]
        source: AppError,
    },
}

impl MutationError {
    pub fn is_rejected(&self) -> bool {
        matches!(self, MutationError::Rejected { .. })
    }
}
