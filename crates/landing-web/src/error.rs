//! Error types for the landing web API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors returned by the landing API handlers.
#[derive(Debug, Error)]
pub enum WebError {
    /// Analyze was called with blank text.
    #[error("Text to analyze is empty")]
    EmptyInput,

    /// Analyze input exceeds the accepted length.
    #[error("Text to analyze exceeds {max} characters")]
    InputTooLong { max: usize },
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::EmptyInput => StatusCode::BAD_REQUEST,
            WebError::InputTooLong { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        };

        tracing::debug!(status = %status, "Rejected request: {}", self);

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for landing handlers.
pub type Result<T> = std::result::Result<T, WebError>;
