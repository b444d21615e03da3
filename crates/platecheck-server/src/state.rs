//! Application state shared across handlers.

use std::sync::Arc;

use platecheck_config::ResolvedConfig;
use platecheck_oauth::{ClientCredentialsCache, ClientCredentialsConfig, SharedTokenSource};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,

    /// Upstream vehicle API client.
    pub upstream: Arc<UpstreamClient>,

    /// Source of MOT history bearer tokens.
    pub tokens: SharedTokenSource,
}

impl AppState {
    /// Create application state from its parts.
    pub fn new(config: ServerConfig, upstream: UpstreamClient, tokens: SharedTokenSource) -> Self {
        Self {
            config: Arc::new(config),
            upstream: Arc::new(upstream),
            tokens,
        }
    }

    /// Build the full state from resolved configuration.
    ///
    /// One HTTP client is shared between the token cache and the upstream
    /// client.
    pub fn from_config(resolved: &ResolvedConfig) -> Result<Self> {
        let http = UpstreamClient::build_http_client(resolved.upstream_timeout)?;
        let credentials = &resolved.credentials;

        let token_config = ClientCredentialsConfig::new(
            resolved
                .endpoints
                .token_url(credentials.mot_api_token_url.expose()),
            credentials.mot_api_client_id.expose(),
            credentials.mot_api_client_secret.expose(),
            resolved.endpoints.mot_scope.clone(),
        );
        info!(token_url = %token_config.token_url, "Configured MOT token cache");
        let tokens: SharedTokenSource =
            Arc::new(ClientCredentialsCache::with_client(http.clone(), token_config));

        let upstream = UpstreamClient::new(http, resolved.endpoints.clone(), credentials);

        Ok(Self::new(ServerConfig::from(resolved), upstream, tokens))
    }
}
