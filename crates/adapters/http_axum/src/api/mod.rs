//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod automations;
#[allow(clippy::missing_errors_doc)]
pub mod runs;
#[allow(clippy::missing_errors_doc)]
pub mod stats;

use axum::Router;
use axum::routing::get;
use serde::Serialize;

use crm_automations_app::ports::DocumentStore;
use crm_automations_domain::id::DocumentId;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body of the create endpoints.
#[derive(Serialize)]
pub struct CreatedId {
    pub id: DocumentId,
}

/// Parse a path segment into a [`DocumentId`] before touching the store.
fn parse_id(raw: &str) -> Result<DocumentId, ApiError> {
    Ok(raw.parse::<DocumentId>()?)
}

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        // Automations
        .route(
            "/automations",
            get(automations::list::<S>).post(automations::create::<S>),
        )
        .route("/automations/{id}", get(automations::get::<S>))
        .route("/automations/{id}/runs", get(runs::list_for_automation::<S>))
        // Runs
        .route("/runs", get(runs::list::<S>).post(runs::create::<S>))
        .route("/runs/{id}", get(runs::get::<S>))
        // Dashboard
        .route("/stats", get(stats::get::<S>))
}
