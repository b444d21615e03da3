//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration loading and resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required credential was not set through any source.
    #[error("missing required setting '{field}'. Set env var {env_var} or [credentials].{field}")]
    MissingField {
        field: &'static str,
        env_var: &'static str,
    },

    /// A setting was present but could not be interpreted.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}
