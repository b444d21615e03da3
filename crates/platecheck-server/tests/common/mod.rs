//! Common test utilities for integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, StatusCode},
};
use platecheck_config::{Secret, UpstreamCredentials, UpstreamEndpoints};
use platecheck_oauth::{ClientCredentialsCache, ClientCredentialsConfig, DEFAULT_TOKEN_TTL};
use platecheck_server::{AppState, Server, ServerConfig, UpstreamClient};
use tower::ServiceExt;
use wiremock::MockServer;

pub const MOT_API_KEY: &str = "test-mot-key";
pub const DVLA_API_KEY: &str = "test-dvla-key";
pub const TENANT: &str = "test-tenant";
pub const TOKEN_PATH: &str = "/test-tenant/oauth2/v2.0/token";

/// A router wired to mock upstreams.
///
/// The token endpoint, the MOT history API and the DVLA API all live on one
/// mock server; their paths do not overlap.
pub struct TestApp {
    pub upstream: MockServer,
    pub router: Router,
}

impl TestApp {
    /// Start with default server config.
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default().with_request_logging(false), DEFAULT_TOKEN_TTL).await
    }

    /// Start with explicit server config and token TTL.
    pub async fn start_with(config: ServerConfig, ttl: Duration) -> Self {
        let upstream = MockServer::start().await;
        let endpoints = UpstreamEndpoints {
            mot_base_url: upstream.uri(),
            dvla_base_url: upstream.uri(),
            token_authority: upstream.uri(),
            mot_scope: "api://mot/.default".to_string(),
        };
        let router = build_router(config, endpoints, ttl);
        Self { upstream, router }
    }

    /// Start with an identity provider nobody is listening on.
    pub async fn start_with_unreachable_idp() -> Self {
        let upstream = MockServer::start().await;
        let endpoints = UpstreamEndpoints {
            mot_base_url: upstream.uri(),
            dvla_base_url: upstream.uri(),
            token_authority: "http://127.0.0.1:1".to_string(),
            mot_scope: "api://mot/.default".to_string(),
        };
        let router = build_router(
            ServerConfig::default().with_request_logging(false),
            endpoints,
            DEFAULT_TOKEN_TTL,
        );
        Self { upstream, router }
    }

    /// Issue a GET against the router.
    pub async fn get(&self, uri: &str) -> (StatusCode, Bytes) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    /// Issue a GET and parse the body as JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// Number of requests the mock upstream received on `path`.
    pub async fn hits(&self, path: &str) -> usize {
        self.upstream
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == path)
            .count()
    }
}

fn build_router(config: ServerConfig, endpoints: UpstreamEndpoints, ttl: Duration) -> Router {
    let credentials = UpstreamCredentials {
        mot_api_key: Secret::new(MOT_API_KEY),
        mot_api_client_id: Secret::new("test-client"),
        mot_api_client_secret: Secret::new("test-secret"),
        mot_api_token_url: Secret::new(TENANT),
        dvla_api_key: Secret::new(DVLA_API_KEY),
    };

    let http = reqwest::Client::new();
    let token_config = ClientCredentialsConfig::new(
        endpoints.token_url(TENANT),
        "test-client",
        "test-secret",
        endpoints.mot_scope.clone(),
    )
    .with_ttl(ttl);
    let tokens = ClientCredentialsCache::with_client(http.clone(), token_config);
    let upstream = UpstreamClient::new(http, endpoints, &credentials);

    Server::new(AppState::new(config, upstream, Arc::new(tokens))).router()
}

/// Token endpoint success body.
pub fn token_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "token_type": "Bearer",
        "expires_in": 3599,
        "ext_expires_in": 3599,
        "access_token": token
    })
}
