//! Record kinds and their collection names.
//!
//! Every persisted record type declares a [`RecordKind`]; the kind maps to
//! its collection name through a fixed table.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::id::DocumentId;

/// The persisted record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Automation,
    AutomationRun,
}

impl RecordKind {
    /// Name of the collection holding records of this kind.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Automation => "automation",
            Self::AutomationRun => "automationrun",
        }
    }

    /// Human-readable label used in error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Automation => "Automation",
            Self::AutomationRun => "AutomationRun",
        }
    }
}

/// A record type that can be stored in a document collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: RecordKind;
}

/// A record together with its store-assigned identifier.
///
/// Serializes as the record's own fields plus `_id`, rendered as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub record: T,
}

impl<T> Stored<T> {
    #[must_use]
    pub fn new(id: DocumentId, record: T) -> Self {
        Self { id, record }
    }
}
