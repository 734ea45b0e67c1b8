//! Diagnostics service: reports store connectivity as data.
//!
//! [`DiagnosticsService::report`] never fails: every problem it meets is
//! folded into the returned [`DiagnosticReport`].

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::ports::DocumentStore;
use crate::repository::bounded;
use crate::store::StoreHandle;

/// Maximum number of collection names included in a report.
pub const MAX_LISTED_COLLECTIONS: usize = 10;

/// Maximum length, in characters, of an error message embedded in a report.
pub const MAX_ERROR_CHARS: usize = 50;

/// Connectivity snapshot returned by the diagnostic endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: Option<String>,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

/// Application service producing [`DiagnosticReport`]s.
pub struct DiagnosticsService<S> {
    store: Arc<StoreHandle<S>>,
    timeout: Duration,
}

impl<S: DocumentStore + Send + Sync> DiagnosticsService<S> {
    /// Create a new service backed by the shared store handle.
    pub fn new(store: Arc<StoreHandle<S>>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Describe the backend and its store connection.
    pub async fn report(&self) -> DiagnosticReport {
        let mut report = DiagnosticReport {
            backend: "running",
            database: "not configured".to_string(),
            database_url: if self.store.is_url_configured() {
                "set"
            } else {
                "not set"
            },
            database_name: None,
            connection_status: "not connected",
            collections: Vec::new(),
        };

        let Ok(store) = self.store.get() else {
            if self.store.is_url_configured() {
                let reason = self.store.unavailable_reason().unwrap_or_default();
                report.database = format!("unavailable: {}", truncate(reason));
            }
            return report;
        };

        report.database = "connected".to_string();
        report.database_name = Some(store.database_name().to_string());
        report.connection_status = "connected";

        match bounded(self.timeout, store.list_collection_names()).await {
            Ok(mut names) => {
                names.truncate(MAX_LISTED_COLLECTIONS);
                report.collections = names;
            }
            Err(err) => {
                tracing::warn!(error = %describe(&err), "listing collections failed");
                report.database = format!("connected but error: {}", truncate(&describe(&err)));
            }
        }
        report
    }
}

/// Render an error and its sources as one line.
fn describe(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_CHARS).collect()
}
