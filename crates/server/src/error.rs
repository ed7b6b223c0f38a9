//! Request-boundary error mapping.
//!
//! Upstream failures are logged with full detail here and surfaced to the
//! caller as a generic message; nothing internal leaks into response bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use glimpse_client::CommonsError;

/// Error body shape shared by every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// Errors surfaced by the search endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `q` was missing or blank.
    #[error("Missing q parameter")]
    MissingQuery,

    /// The single upstream call failed.
    #[error(transparent)]
    Upstream(#[from] CommonsError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingQuery => (StatusCode::BAD_REQUEST, "Missing q parameter".to_string()),
            ApiError::Upstream(CommonsError::InvalidQuery(_)) => {
                (StatusCode::BAD_REQUEST, "Missing q parameter".to_string())
            }
            ApiError::Upstream(e @ CommonsError::Upstream { status }) => {
                tracing::error!("upstream search failed with HTTP {}: {}", status, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Upstream search failed".to_string())
            }
            ApiError::Upstream(e @ CommonsError::Parse(_)) => {
                tracing::error!("upstream payload could not be parsed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Invalid upstream response".to_string())
            }
            ApiError::Upstream(e) => {
                tracing::error!("search request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Upstream search failed".to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
