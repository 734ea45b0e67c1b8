//! Dashboard statistics handler.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crm_automations_app::ports::DocumentStore;
use crm_automations_domain::stats::DashboardStats;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the stats endpoint.
pub enum GetResponse {
    Ok(Json<DashboardStats>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/stats`: automation counts and the most recent runs.
pub async fn get<S>(State(state): State<AppState<S>>) -> Result<GetResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let stats = state.stats_service.dashboard_stats().await?;
    Ok(GetResponse::Ok(Json(stats)))
}
