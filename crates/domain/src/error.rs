//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CrmError`]
//! via `From`. Adapters box their source errors into [`CrmError::Storage`].

use std::time::Duration;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    /// The input failed a domain invariant or could not be parsed.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A looked-up record does not exist.
    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    /// The document store was never connected.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// A store operation did not complete in time.
    #[error("document store operation timed out after {0:?}")]
    Timeout(Duration),

    /// A store operation failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations detected before any store access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid object id: {0}")]
    InvalidId(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// A record looked up by identifier is missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    pub kind: &'static str,
    pub id: String,
}
