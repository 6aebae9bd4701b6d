//! HTTP error mapping (§7).
//!
//! `ProspectingError` lives in `prospecting-domain`, which has no HTTP
//! dependency, so it cannot implement `axum::response::IntoResponse`
//! directly — neither the trait nor the type is local to this crate. This
//! newtype closes that gap the same way `prospecting_infra::InfraError`
//! closes it for `rusqlite`/`reqwest` conversions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use prospecting_domain::ProspectingError;
use serde_json::json;

#[derive(Debug)]
pub struct ApiError(pub ProspectingError);

impl From<ProspectingError> for ApiError {
    fn from(value: ProspectingError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            ProspectingError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            ProspectingError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ProspectingError::GateBlocked(_) => (StatusCode::BAD_REQUEST, "gate_blocked"),
            ProspectingError::StateConflict(_) => (StatusCode::CONFLICT, "state_conflict"),
            ProspectingError::AuthFailed => (StatusCode::UNAUTHORIZED, "auth_failed"),
            ProspectingError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ProspectingError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
        }

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "an internal error occurred".to_string(),
            _ => self.0.to_string(),
        };

        (status, Json(json!({ "kind": kind, "message": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
