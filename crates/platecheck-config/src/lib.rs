//! Configuration for the platecheck vehicle-lookup proxy.
//!
//! Provides TOML-based configuration with:
//! - Upstream credentials (MOT history API key, OAuth client, DVLA key)
//! - Server settings (bind address, CORS origins, DVLA plate validation)
//! - Upstream endpoint overrides (base URLs, token authority, scope)
//!
//! Credentials are resolved env var first, then config file. A missing
//! credential is a load-time error, never an empty string.

pub mod discovery;
pub mod error;
pub mod secrets;
pub mod types;

pub use discovery::{PROJECT_CONFIG_FILE, load_config, load_config_file, load_config_with_env};
pub use error::{ConfigError, Result};
pub use secrets::{CredentialField, Secret};
pub use types::*;
