//! Vehicle lookup proxy endpoints.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::error::Result;
use crate::plate::Plate;
use crate::state::AppState;

/// Handle GET /api/{plate}
///
/// Validates the plate, attaches the cached bearer token if one can be
/// obtained, and proxies to the MOT history API.
pub async fn mot_history_handler(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> Result<Response> {
    let plate = Plate::parse(&plate)?;

    let bearer = match state.tokens.access_token().await {
        Ok(token) => Some(token),
        Err(e) => {
            tracing::warn!(error = %e, plate = %plate, "Proceeding without MOT bearer token");
            None
        }
    };

    let response = state
        .upstream
        .mot_history(&plate, bearer.as_deref())
        .await?;
    Ok(response.into_response())
}

/// Handle GET /api/dvla/{plate}
///
/// Proxies to the DVLA vehicle enquiry API. The plate is only validated when
/// `dvla_plate_validation` is enabled.
pub async fn dvla_enquiry_handler(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> Result<Response> {
    if state.config.dvla_plate_validation {
        Plate::parse(&plate)?;
    }

    let response = state.upstream.vehicle_enquiry(&plate).await?;
    Ok(response.into_response())
}
