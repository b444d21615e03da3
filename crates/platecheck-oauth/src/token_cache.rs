//! Bearer token caching for the MOT history API.
//!
//! A single token is shared by every caller. It is reused until it is older
//! than the configured TTL, then replaced by a fresh client-credentials
//! grant. A failed refresh leaves the previous entry in place.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use reqwest::Client;

use crate::client_credentials::{ClientCredentialsConfig, request_token};
use crate::error::Result;

// ============================================================================
// TokenSource Trait
// ============================================================================

/// Anything that can hand out a bearer token for the MOT history API.
#[async_trait]
pub trait TokenSource: Send + Sync + std::fmt::Debug {
    /// Get a valid access token, acquiring a new one if necessary.
    async fn access_token(&self) -> Result<String>;

    /// Describe the currently cached token without touching the network.
    fn cached_token_info(&self) -> Option<TokenInfo>;
}

/// Shared token source for use across async contexts.
pub type SharedTokenSource = Arc<dyn TokenSource>;

// ============================================================================
// TokenInfo
// ============================================================================

/// Information about the cached token for display.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub issued_at: DateTime<Utc>,
    pub age: Duration,
    pub is_expired: bool,
}

// ============================================================================
// ClientCredentialsCache
// ============================================================================

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    issued_at: Instant,
    issued_at_utc: DateTime<Utc>,
}

impl CachedToken {
    fn new(value: String) -> Self {
        Self {
            value,
            issued_at: Instant::now(),
            issued_at_utc: Utc::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.issued_at.elapsed() < ttl
    }
}

/// Client-credentials token cache with a fixed time-to-live.
///
/// Concurrent callers that all miss the cache each issue a grant; the last
/// successful response wins the slot. The lock is never held across an
/// await.
#[derive(Debug)]
pub struct ClientCredentialsCache {
    client: Client,
    config: ClientCredentialsConfig,
    slot: RwLock<Option<CachedToken>>,
}

impl ClientCredentialsCache {
    /// Create an empty cache with its own HTTP client.
    pub fn new(config: ClientCredentialsConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create an empty cache sharing an existing HTTP client.
    pub fn with_client(client: Client, config: ClientCredentialsConfig) -> Self {
        Self {
            client,
            config,
            slot: RwLock::new(None),
        }
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &ClientCredentialsConfig {
        &self.config
    }

    fn fresh_value(&self) -> Option<String> {
        self.slot
            .read()
            .as_ref()
            .filter(|cached| cached.is_fresh(self.config.ttl))
            .map(|cached| cached.value.clone())
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsCache {
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.fresh_value() {
            tracing::debug!("Using cached MOT bearer token");
            return Ok(token);
        }

        tracing::info!("MOT bearer token missing or expired, requesting a new one");
        match request_token(&self.client, &self.config).await {
            Ok(response) => {
                *self.slot.write() = Some(CachedToken::new(response.access_token.clone()));
                tracing::info!(
                    expires_in = ?response.expires_in,
                    ttl_secs = self.config.ttl.as_secs(),
                    "MOT bearer token acquired"
                );
                Ok(response.access_token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "MOT bearer token acquisition failed");
                Err(e)
            }
        }
    }

    fn cached_token_info(&self) -> Option<TokenInfo> {
        self.slot.read().as_ref().map(|cached| TokenInfo {
            issued_at: cached.issued_at_utc,
            age: cached.issued_at.elapsed(),
            is_expired: !cached.is_fresh(self.config.ttl),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenAcquisitionError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN_PATH: &str = "/tenant/oauth2/v2.0/token";

    fn token_body(token: &str) -> serde_json::Value {
        serde_json::json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": token
        })
    }

    fn cache_for(server: &MockServer, ttl: Duration) -> ClientCredentialsCache {
        let config = ClientCredentialsConfig::new(
            format!("{}{}", server.uri(), TOKEN_PATH),
            "client-id",
            "client-secret",
            "api-scope",
        )
        .with_ttl(ttl);
        ClientCredentialsCache::new(config)
    }

    #[tokio::test]
    async fn test_new_cache_is_empty() {
        let server = MockServer::start().await;
        let cache = cache_for(&server, Duration::from_secs(3600));
        assert!(cache.cached_token_info().is_none());
    }

    #[tokio::test]
    async fn test_reuses_token_within_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1")))
            .expect(1)
            .mount(&server)
            .await;

        let cache = cache_for(&server, Duration::from_secs(3600));
        for _ in 0..5 {
            assert_eq!(cache.access_token().await.unwrap(), "tok-1");
        }

        let info = cache.cached_token_info().unwrap();
        assert!(!info.is_expired);
    }

    #[tokio::test]
    async fn test_refreshes_once_after_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1")))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-2")))
            .expect(1)
            .mount(&server)
            .await;

        let cache = cache_for(&server, Duration::from_millis(200));
        assert_eq!(cache.access_token().await.unwrap(), "tok-1");

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(cache.cached_token_info().unwrap().is_expired);

        assert_eq!(cache.access_token().await.unwrap(), "tok-2");
        assert_eq!(cache.access_token().await.unwrap(), "tok-2");
    }

    #[tokio::test]
    async fn test_failure_caches_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(2)
            .mount(&server)
            .await;

        let cache = cache_for(&server, Duration::from_secs(3600));
        assert!(cache.access_token().await.is_err());
        assert!(cache.cached_token_info().is_none());

        // No failure was cached, so the next call tries again.
        let err = cache.access_token().await.unwrap_err();
        assert!(matches!(err, TokenAcquisitionError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1")))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-2")))
            .mount(&server)
            .await;

        let cache = cache_for(&server, Duration::from_millis(200));
        assert_eq!(cache.access_token().await.unwrap(), "tok-1");
        let first_issued = cache.cached_token_info().unwrap().issued_at;

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(cache.access_token().await.is_err());

        let info = cache.cached_token_info().unwrap();
        assert_eq!(info.issued_at, first_issued);
        assert_eq!(cache.slot.read().as_ref().unwrap().value, "tok-1");

        assert_eq!(cache.access_token().await.unwrap(), "tok-2");
    }

    #[tokio::test]
    async fn test_independent_instances_do_not_share_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok")))
            .expect(2)
            .mount(&server)
            .await;

        let a = cache_for(&server, Duration::from_secs(3600));
        let b = cache_for(&server, Duration::from_secs(3600));
        a.access_token().await.unwrap();
        b.access_token().await.unwrap();
        a.access_token().await.unwrap();
    }
}
