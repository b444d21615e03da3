//! CLI command handlers.

pub mod check;
pub mod serve;
pub mod token;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use platecheck_config::ResolvedConfig;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit config file, if any.
    pub config_path: Option<PathBuf>,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Load and resolve configuration from file and environment.
    pub fn load_config(&self) -> Result<ResolvedConfig> {
        platecheck_config::load_config(self.config_path.as_deref())
            .context("Failed to load configuration")
    }
}
