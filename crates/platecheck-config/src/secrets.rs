//! Upstream credential resolution.
//!
//! Resolution order:
//! 1. Environment variable
//! 2. Config file `[credentials]` table
//!
//! Empty values count as unset.

use std::fmt;

use crate::error::{ConfigError, Result};

/// A credential value whose `Debug` and `Display` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value for use in an outbound request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// The credentials the proxy needs to reach its upstreams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    MotApiKey,
    MotApiClientId,
    MotApiClientSecret,
    MotApiTokenUrl,
    DvlaApiKey,
}

impl CredentialField {
    /// Key under the `[credentials]` table.
    pub fn field_name(&self) -> &'static str {
        match self {
            CredentialField::MotApiKey => "mot_api_key",
            CredentialField::MotApiClientId => "mot_api_client_id",
            CredentialField::MotApiClientSecret => "mot_api_client_secret",
            CredentialField::MotApiTokenUrl => "mot_api_token_url",
            CredentialField::DvlaApiKey => "dvla_api_key",
        }
    }

    /// Environment variable that overrides the config file.
    pub fn env_var(&self) -> &'static str {
        match self {
            CredentialField::MotApiKey => "MOT_API_KEY",
            CredentialField::MotApiClientId => "MOT_API_CLIENT_ID",
            CredentialField::MotApiClientSecret => "MOT_API_CLIENT_SECRET",
            CredentialField::MotApiTokenUrl => "MOT_API_TOKEN_URL",
            CredentialField::DvlaApiKey => "DVLA_API_KEY_TEST",
        }
    }
}

/// Resolve a required credential from the environment, then the config file.
pub fn resolve_credential<F>(
    field: CredentialField,
    file_value: Option<&str>,
    env: &F,
) -> Result<Secret>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env(field.env_var()).filter(|v| !v.is_empty()) {
        tracing::debug!(field = field.field_name(), source = "env", "Resolved credential");
        return Ok(Secret(value));
    }

    if let Some(value) = file_value.filter(|v| !v.is_empty()) {
        tracing::debug!(field = field.field_name(), source = "file", "Resolved credential");
        return Ok(Secret(value.to_string()));
    }

    Err(ConfigError::MissingField {
        field: field.field_name(),
        env_var: field.env_var(),
    })
}
