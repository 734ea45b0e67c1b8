//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crm_automations_domain::error::{CrmError, ValidationError};

/// JSON error body returned by every non-2xx response.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`CrmError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(CrmError);

impl From<CrmError> for ApiError {
    fn from(err: CrmError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::MalformedBody(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CrmError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            CrmError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            CrmError::Unavailable(reason) => {
                tracing::warn!(%reason, "request needs the document store");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database unavailable".to_string(),
                )
            }
            CrmError::Timeout(limit) => {
                tracing::error!(?limit, "document store operation timed out");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database operation timed out".to_string(),
                )
            }
            CrmError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
