//! Server configuration.

use std::net::SocketAddr;

use platecheck_config::ResolvedConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,

    /// CORS allowed origins (empty = any origin).
    pub cors_origins: Vec<String>,

    /// Validate plates on the DVLA route as well as the MOT route.
    pub dvla_plate_validation: bool,

    /// Enable request logging.
    pub request_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: Vec::new(),
            dvla_plate_validation: false,
            request_logging: true,
        }
    }
}

impl ServerConfig {
    /// Create a server config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bind address.
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Set CORS allowed origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Enable or disable plate validation on the DVLA route.
    pub fn with_dvla_plate_validation(mut self, enabled: bool) -> Self {
        self.dvla_plate_validation = enabled;
        self
    }

    /// Enable or disable request logging.
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }
}

impl From<&ResolvedConfig> for ServerConfig {
    fn from(config: &ResolvedConfig) -> Self {
        Self::new()
            .with_bind_address(config.bind_address)
            .with_cors_origins(config.cors_origins.clone())
            .with_dvla_plate_validation(config.validate_dvla_plates)
    }
}
