//! Bearer token exposure.

use axum::{Json, extract::State};

use crate::state::AppState;

/// Handle GET /api/bearer
///
/// Returns the current token as a JSON string, or `null` when it cannot be
/// acquired. Never fails.
pub async fn bearer_handler(State(state): State<AppState>) -> Json<Option<String>> {
    match state.tokens.access_token().await {
        Ok(token) => Json(Some(token)),
        Err(e) => {
            tracing::warn!(error = %e, "Bearer token unavailable, returning null");
            Json(None)
        }
    }
}
