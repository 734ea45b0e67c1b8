//! Axum router assembly.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crm_automations_app::ports::DocumentStore;
use crm_automations_app::services::diagnostics_service::DiagnosticReport;

use crate::state::AppState;

/// Liveness banner returned by `GET /`.
#[derive(Serialize)]
struct Banner {
    message: &'static str,
}

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api`. Includes a [`TraceLayer`] that logs each
/// HTTP request/response at the `DEBUG` level using the `tracing` ecosystem,
/// and a CORS layer that mirrors the caller's origin, method and headers with
/// credentials allowed.
pub fn build<S>(state: AppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(banner))
        .route("/test", get(diagnostics::<S>))
        .nest("/api", crate::api::routes())
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn banner() -> Json<Banner> {
    Json(Banner {
        message: "CRM Automations API running",
    })
}

/// `GET /test`: connectivity report; always answers 200.
async fn diagnostics<S>(State(state): State<AppState<S>>) -> Json<DiagnosticReport>
where
    S: DocumentStore + Send + Sync + 'static,
{
    Json(state.diagnostics_service.report().await)
}
