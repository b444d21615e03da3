//! Config file discovery and loading.
//!
//! Resolution order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Config file (explicit path, else `./platecheck.toml` if present)
//! 3. Environment variables
//! 4. CLI arguments (handled externally)

use std::path::{Path, PathBuf};

use crate::{ConfigError, PlatecheckConfig, ResolvedConfig, Result};

/// Default config filename for project-local config.
pub const PROJECT_CONFIG_FILE: &str = "platecheck.toml";

/// Load and resolve configuration against the process environment.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load and resolve configuration against an explicit environment lookup.
///
/// An explicit `path` must exist. Without one, `./platecheck.toml` is used
/// when present and skipped otherwise.
pub fn load_config_with_env<F>(path: Option<&Path>, env: F) -> Result<ResolvedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match path {
        Some(path) => load_config_file(path)?,
        None => {
            let local = PathBuf::from(PROJECT_CONFIG_FILE);
            if local.exists() {
                load_config_file(&local)?
            } else {
                tracing::debug!("No config file found, using environment only");
                PlatecheckConfig::default()
            }
        }
    };

    config.resolve(env)
}

/// Load config from a specific file path (no discovery, no resolution).
pub fn load_config_file(path: &Path) -> Result<PlatecheckConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "Loaded config file");
    PlatecheckConfig::from_toml(&contents)
}
