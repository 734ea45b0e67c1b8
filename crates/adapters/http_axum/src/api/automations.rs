//! JSON REST handlers for automations.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crm_automations_app::ports::DocumentStore;
use crm_automations_domain::automation::Automation;
use crm_automations_domain::record::Stored;

use super::{CreatedId, parse_id};
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Stored<Automation>>>),
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
    Ok(Json<Stored<Automation>>),
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

/// `GET /api/automations`: list all automations in insertion order.
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let automations = state.automation_service.list_automations().await?;
    Ok(ListResponse::Ok(Json(automations)))
}

/// `GET /api/automations/{id}`: get automation by ID.
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let automation = state.automation_service.get_automation(id).await?;
    Ok(GetResponse::Ok(Json(automation)))
}

/// `POST /api/automations`: create a new automation.
pub async fn create<S>(
    State(state): State<AppState<S>>,
    ValidJson(automation): ValidJson<Automation>,
) -> Result<CreateResponse, ApiError>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = state
        .automation_service
        .create_automation(automation)
        .await?;
    Ok(CreateResponse::Created(Json(CreatedId { id })))
}
