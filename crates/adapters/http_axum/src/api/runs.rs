//! JSON REST handlers for automation runs.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crm_automations_app::ports::DocumentStore;
use crm_automations_domain::record::Stored;
use crm_automations_domain::run::AutomationRun;

use super::{CreatedId, parse_id};
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::state::AppState;

/// Request body for starting a run.
///
/// Status and start time are decided by the server.
#[derive(Deserialize)]
pub struct StartRunRequest {
    pub automation_id: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Stored<AutomationRun>>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Stored<AutomationRun>>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<CreatedId>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => json.into_response(),
        }
    }
}

/// `GET /api/runs`: list all runs in insertion order.
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let runs = state.run_service.list_runs().await?;
    Ok(ListResponse::Ok(Json(runs)))
}

/// `GET /api/runs/{id}`: get run by ID.
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let run = state.run_service.get_run(id).await?;
    Ok(GetResponse::Ok(Json(run)))
}

/// `GET /api/automations/{id}/runs`: runs referencing one automation.
pub async fn list_for_automation<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let runs = state.run_service.list_runs_for_automation(id).await?;
    Ok(ListResponse::Ok(Json(runs)))
}

/// `POST /api/runs`: record the start of a run.
pub async fn create<S>(
    State(state): State<AppState<S>>,
    ValidJson(req): ValidJson<StartRunRequest>,
) -> Result<CreateResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = state
        .run_service
        .start_run(req.automation_id, req.notes)
        .await?;
    Ok(CreateResponse::Created(Json(CreatedId { id })))
}
