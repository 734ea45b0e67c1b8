//! Storage-specific error type wrapping sqlx errors.

use crm_automations_domain::error::CrmError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to (de)serialize a document body.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    /// A collection or field name cannot be used in a query.
    #[error("invalid name `{0}`: only ASCII letters, digits and underscores are allowed")]
    InvalidName(String),

    /// A stored identifier is not a valid document id.
    #[error("stored identifier `{0}` is malformed")]
    CorruptId(String),

    /// A stored body is valid JSON but not an object.
    #[error("stored document {0} is not a JSON object")]
    NotAnObject(String),
}

impl From<StorageError> for CrmError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
