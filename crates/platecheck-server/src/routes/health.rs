//! Health check endpoint.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Whether a bearer token is currently cached.
    pub token_cached: bool,
    /// When the cached token was issued.
    pub token_issued_at: Option<DateTime<Utc>>,
}

/// Liveness plus token cache status. Never acquires a token.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let info = state.tokens.cached_token_info();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        token_cached: info.as_ref().is_some_and(|i| !i.is_expired),
        token_issued_at: info.map(|i| i.issued_at),
    })
}
