//! HTTP proxy for vehicle lookups.
//!
//! Exposes MOT history and DVLA vehicle enquiry lookups to a frontend and
//! forwards each request to the upstream government API with credentials
//! attached. Upstream responses are returned verbatim.
//!
//! # Routes
//!
//! - `GET /api/{plate}`: MOT history (plate validated, bearer + API key)
//! - `GET /api/dvla/{plate}`: DVLA vehicle enquiry (API key)
//! - `GET /api/bearer`: current MOT bearer token, or `null`
//! - `GET /health`: liveness and token cache status
//!
//! # Example
//!
//! ```ignore
//! use platecheck_server::{AppState, Server};
//!
//! let resolved = platecheck_config::load_config(None)?;
//! let server = Server::new(AppState::from_config(&resolved)?);
//! server.run().await?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod plate;
pub mod routes;
pub mod state;
pub mod upstream;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use plate::{InvalidPlateFormat, Plate};
pub use state::AppState;
pub use upstream::{UpstreamClient, UpstreamResponse};

use std::future::Future;

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// The platecheck HTTP server.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a server from application state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(routes::health_handler))
            .route("/api/bearer", get(routes::bearer_handler))
            .route("/api/dvla/{plate}", get(routes::dvla_enquiry_handler))
            .route("/api/{plate}", get(routes::mot_history_handler))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                logging::request_logging_middleware,
            ))
            .layer(cors_layer(&self.state.config.cors_origins))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until the process is stopped.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run the server, shutting down gracefully when `shutdown` resolves.
    pub async fn run_until(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let addr = self.state.config.bind_address;
        let router = self.router();

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to bind {}: {}", addr, e)))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Internal(format!("Failed to read bound address: {}", e)))?;

        info!(addr = %local_addr, "Starting platecheck server");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        info!("Server stopped");
        Ok(())
    }
}

/// CORS for the frontend. An empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
