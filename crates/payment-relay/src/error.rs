use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Why a payment intent could not be created.
///
/// The client only ever sees a generic 500; the detail goes to the log.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RelayError {
    #[error("malformed request: {0}")]
    InvalidRequest(String),

    #[error("processor request failed: {0}")]
    Transport(String),

    #[error("processor rejected the intent ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("processor response had no client secret")]
    MissingClientSecret,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error creating payment intent");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to create payment intent" })),
        )
            .into_response()
    }
}
