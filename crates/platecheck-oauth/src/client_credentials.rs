//! OAuth 2.0 client-credentials grant against the identity provider.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenAcquisitionError};

/// How long an acquired token is reused before a refresh is forced.
///
/// Independent of the provider's `expires_in`; must stay inside the lifetime
/// the provider issues.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Settings for the client-credentials grant.
#[derive(Clone)]
pub struct ClientCredentialsConfig {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub ttl: Duration,
}

impl std::fmt::Debug for ClientCredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentialsConfig")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("scope", &self.scope)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ClientCredentialsConfig {
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: scope.into(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the cache lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Request a fresh token with the client-credentials grant.
pub async fn request_token(client: &Client, config: &ClientCredentialsConfig) -> Result<TokenResponse> {
    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("scope", config.scope.as_str()),
    ];

    let response = client
        .post(&config.token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| TokenAcquisitionError::Network(format!("Token request failed: {}", e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TokenAcquisitionError::Network(format!("Failed to read token response: {}", e)))?;

    if !status.is_success() {
        return Err(TokenAcquisitionError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| TokenAcquisitionError::MalformedResponse(e.to_string()))?;

    if token.access_token.is_empty() {
        return Err(TokenAcquisitionError::MalformedResponse(
            "empty access_token".to_string(),
        ));
    }

    Ok(token)
}
