//! Client for the upstream vehicle APIs.
//!
//! Attaches the static API keys (and the MOT bearer token when one is
//! available), issues exactly one request per lookup and hands back the
//! upstream body untouched.

use std::time::Duration;

use axum::{
    body::Bytes,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use platecheck_config::{Secret, UpstreamCredentials, UpstreamEndpoints};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use crate::error::{Result, ServerError};
use crate::plate::Plate;

/// MOT history trade API lookup by registration.
pub const MOT_REGISTRATION_PATH: &str = "/v1/trade/vehicles/registration";

/// DVLA vehicle enquiry endpoint.
pub const DVLA_ENQUIRY_PATH: &str = "/vehicle-enquiry/v1/vehicles";

/// Header carrying the static API key on both upstreams.
pub const API_KEY_HEADER: &str = "x-api-key";

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A successful upstream response, passed through verbatim.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let content_type = self
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        (self.status, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VehicleEnquiryRequest<'a> {
    registration_number: &'a str,
}

/// HTTP client for the MOT history and DVLA vehicle enquiry APIs.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    endpoints: UpstreamEndpoints,
    mot_api_key: Secret,
    dvla_api_key: Secret,
}

impl UpstreamClient {
    /// Create a client sharing an existing HTTP client.
    pub fn new(client: Client, endpoints: UpstreamEndpoints, credentials: &UpstreamCredentials) -> Self {
        Self {
            client,
            endpoints,
            mot_api_key: credentials.mot_api_key.clone(),
            dvla_api_key: credentials.dvla_api_key.clone(),
        }
    }

    /// Build the HTTP client used for every outbound call.
    pub fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| ServerError::Internal(format!("Failed to build HTTP client: {}", e)))
    }

    /// Get the configured endpoints.
    pub fn endpoints(&self) -> &UpstreamEndpoints {
        &self.endpoints
    }

    /// Look up MOT history for a validated plate.
    ///
    /// The `Authorization` header is omitted when no bearer token is
    /// available; the upstream then decides how to reject the call.
    pub async fn mot_history(&self, plate: &Plate, bearer: Option<&str>) -> Result<UpstreamResponse> {
        let url = format!(
            "{}{}/{}",
            self.endpoints.mot_base_url, MOT_REGISTRATION_PATH, plate
        );

        let mut req = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.mot_api_key.expose())
            .header(header::CONTENT_TYPE, DEFAULT_CONTENT_TYPE);

        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }

        tracing::debug!(plate = %plate, has_bearer = bearer.is_some(), "Forwarding MOT history lookup");
        forward(req, "MOT history").await
    }

    /// Look up a vehicle with the DVLA vehicle enquiry API.
    pub async fn vehicle_enquiry(&self, registration_number: &str) -> Result<UpstreamResponse> {
        let url = format!("{}{}", self.endpoints.dvla_base_url, DVLA_ENQUIRY_PATH);

        let req = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.dvla_api_key.expose())
            .json(&VehicleEnquiryRequest {
                registration_number,
            });

        tracing::debug!(registration_number, "Forwarding DVLA vehicle enquiry");
        forward(req, "DVLA vehicle enquiry").await
    }
}

/// Send one request and classify the outcome.
async fn forward(req: RequestBuilder, upstream: &'static str) -> Result<UpstreamResponse> {
    let response = req.send().await.map_err(|e| {
        if e.is_builder() {
            ServerError::Internal(format!("Failed to build {} request: {}", upstream, e))
        } else {
            ServerError::Network(format!("{} request failed: {}", upstream, e))
        }
    })?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response
        .bytes()
        .await
        .map_err(|e| ServerError::Network(format!("Failed to read {} response: {}", upstream, e)))?;

    if !status.is_success() {
        tracing::warn!(upstream, status = %status, "Upstream returned an error");
        return Err(ServerError::Upstream {
            status,
            content_type,
            body,
        });
    }

    Ok(UpstreamResponse {
        status,
        content_type,
        body,
    })
}
