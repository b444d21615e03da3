//! Error types for the server.

use axum::{
    Json,
    body::Bytes,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::plate::InvalidPlateFormat;

/// Server error type.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Plate failed validation.
    #[error("{0}")]
    InvalidPlateFormat(#[from] InvalidPlateFormat),

    /// Upstream API answered with a non-success status. Replayed verbatim.
    #[error("Upstream returned {status}")]
    Upstream {
        status: StatusCode,
        content_type: Option<String>,
        body: Bytes,
    },

    /// Upstream API could not be reached.
    #[error("Upstream unreachable: {0}")]
    Network(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::Upstream {
                status,
                content_type,
                body,
            } => {
                tracing::warn!(status = %status, "Passing upstream error through");
                let content_type = content_type
                    .clone()
                    .unwrap_or_else(|| "application/json".to_string());
                return (*status, [(header::CONTENT_TYPE, content_type)], body.clone())
                    .into_response();
            }
            ServerError::InvalidPlateFormat(_) => (StatusCode::BAD_REQUEST, "invalid_plate_format"),
            ServerError::Network(_) => (StatusCode::BAD_GATEWAY, "upstream_unreachable"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, code, error = %message, "Server error");
        } else {
            tracing::warn!(status = %status, code, error = %message, "Client error");
        }

        let body = ErrorResponse {
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
