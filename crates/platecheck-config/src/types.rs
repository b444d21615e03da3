//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [credentials]            # upstream credentials (env vars win)
//! [server]                 # listener settings
//! [upstream]               # upstream endpoint overrides
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::secrets::{CredentialField, Secret, resolve_credential};

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// MOT history trade API.
pub const DEFAULT_MOT_BASE_URL: &str = "https://history.mot.api.gov.uk";

/// DVLA vehicle enquiry API (UAT environment, matching the test key).
pub const DEFAULT_DVLA_BASE_URL: &str = "https://uat.driver-vehicle-licensing.api.gov.uk";

/// Identity provider hosting the MOT API's token endpoint.
pub const DEFAULT_TOKEN_AUTHORITY: &str = "https://login.microsoftonline.com";

/// Scope requested in the client-credentials grant.
pub const DEFAULT_MOT_SCOPE: &str = "https://tapi.dvsa.gov.uk/.default";

/// Environment variable overriding the bind address.
pub const BIND_ENV: &str = "PLATECHECK_BIND";

// ─────────────────────────────────────────────────────────────────────────────
// File schema
// ─────────────────────────────────────────────────────────────────────────────

/// Root of the TOML config file.
///
/// Every section is optional so a deployment can supply everything through
/// environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatecheckConfig {
    pub credentials: CredentialsSection,
    pub server: ServerSection,
    pub upstream: UpstreamSection,
}

/// `[credentials]`
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsSection {
    pub mot_api_key: Option<String>,
    pub mot_api_client_id: Option<String>,
    pub mot_api_client_secret: Option<String>,
    /// Identity-provider tenant segment of the token URL.
    pub mot_api_token_url: Option<String>,
    pub dvla_api_key: Option<String>,
}

impl std::fmt::Debug for CredentialsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("CredentialsSection")
            .field("mot_api_key", &set(&self.mot_api_key))
            .field("mot_api_client_id", &set(&self.mot_api_client_id))
            .field("mot_api_client_secret", &set(&self.mot_api_client_secret))
            .field("mot_api_token_url", &set(&self.mot_api_token_url))
            .field("dvla_api_key", &set(&self.dvla_api_key))
            .finish()
    }
}

/// `[server]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Listen address, e.g. `0.0.0.0:3000`.
    pub bind: Option<String>,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Apply plate validation to the DVLA route as well.
    pub validate_dvla_plates: bool,
    /// Timeout for outbound calls. Unset keeps the HTTP client default.
    pub upstream_timeout_secs: Option<u64>,
}

/// `[upstream]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamSection {
    pub mot_base_url: Option<String>,
    pub dvla_base_url: Option<String>,
    pub token_authority: Option<String>,
    pub mot_scope: Option<String>,
}

impl PlatecheckConfig {
    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Resolve against an environment lookup, producing validated settings.
    pub fn resolve<F>(self, env: F) -> Result<ResolvedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let c = &self.credentials;
        let credentials = UpstreamCredentials {
            mot_api_key: resolve_credential(
                CredentialField::MotApiKey,
                c.mot_api_key.as_deref(),
                &env,
            )?,
            mot_api_client_id: resolve_credential(
                CredentialField::MotApiClientId,
                c.mot_api_client_id.as_deref(),
                &env,
            )?,
            mot_api_client_secret: resolve_credential(
                CredentialField::MotApiClientSecret,
                c.mot_api_client_secret.as_deref(),
                &env,
            )?,
            mot_api_token_url: resolve_credential(
                CredentialField::MotApiTokenUrl,
                c.mot_api_token_url.as_deref(),
                &env,
            )?,
            dvla_api_key: resolve_credential(
                CredentialField::DvlaApiKey,
                c.dvla_api_key.as_deref(),
                &env,
            )?,
        };

        let bind_str = env(BIND_ENV)
            .filter(|v| !v.is_empty())
            .or(self.server.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_address: SocketAddr =
            bind_str
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                    field: "server.bind".to_string(),
                    message: format!("'{}': {}", bind_str, e),
                })?;

        let upstream_timeout = match self.server.upstream_timeout_secs {
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    field: "server.upstream_timeout_secs".to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        let u = self.upstream;
        let endpoints = UpstreamEndpoints {
            mot_base_url: trim_base(u.mot_base_url, DEFAULT_MOT_BASE_URL),
            dvla_base_url: trim_base(u.dvla_base_url, DEFAULT_DVLA_BASE_URL),
            token_authority: trim_base(u.token_authority, DEFAULT_TOKEN_AUTHORITY),
            mot_scope: u.mot_scope.unwrap_or_else(|| DEFAULT_MOT_SCOPE.to_string()),
        };

        Ok(ResolvedConfig {
            credentials,
            endpoints,
            bind_address,
            cors_origins: self.server.cors_origins,
            validate_dvla_plates: self.server.validate_dvla_plates,
            upstream_timeout,
        })
    }
}

fn trim_base(value: Option<String>, default: &str) -> String {
    value
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolved settings
// ─────────────────────────────────────────────────────────────────────────────

/// Static per-upstream credentials, read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct UpstreamCredentials {
    pub mot_api_key: Secret,
    pub mot_api_client_id: Secret,
    pub mot_api_client_secret: Secret,
    pub mot_api_token_url: Secret,
    pub dvla_api_key: Secret,
}

/// Upstream base URLs, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoints {
    pub mot_base_url: String,
    pub dvla_base_url: String,
    pub token_authority: String,
    pub mot_scope: String,
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        Self {
            mot_base_url: DEFAULT_MOT_BASE_URL.to_string(),
            dvla_base_url: DEFAULT_DVLA_BASE_URL.to_string(),
            token_authority: DEFAULT_TOKEN_AUTHORITY.to_string(),
            mot_scope: DEFAULT_MOT_SCOPE.to_string(),
        }
    }
}

impl UpstreamEndpoints {
    /// Client-credentials token endpoint for the given tenant.
    pub fn token_url(&self, tenant: &str) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.token_authority, tenant)
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub credentials: UpstreamCredentials,
    pub endpoints: UpstreamEndpoints,
    pub bind_address: SocketAddr,
    pub cors_origins: Vec<String>,
    pub validate_dvla_plates: bool,
    pub upstream_timeout: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("MOT_API_KEY", "mot-key"),
            ("MOT_API_CLIENT_ID", "client-id"),
            ("MOT_API_CLIENT_SECRET", "client-secret"),
            ("MOT_API_TOKEN_URL", "tenant-123"),
            ("DVLA_API_KEY_TEST", "dvla-key"),
        ]
    }

    #[test]
    fn test_empty_config_parses() {
        let config = PlatecheckConfig::from_toml("").unwrap();
        assert!(config.credentials.mot_api_key.is_none());
        assert!(config.server.cors_origins.is_empty());
        assert!(!config.server.validate_dvla_plates);
    }

    #[test]
    fn test_resolve_from_env_with_defaults() {
        let resolved = PlatecheckConfig::default()
            .resolve(env_from(&full_env()))
            .unwrap();

        assert_eq!(resolved.credentials.mot_api_key.expose(), "mot-key");
        assert_eq!(resolved.credentials.dvla_api_key.expose(), "dvla-key");
        assert_eq!(resolved.bind_address, DEFAULT_BIND.parse().unwrap());
        assert_eq!(resolved.endpoints, UpstreamEndpoints::default());
        assert!(resolved.upstream_timeout.is_none());
    }

    #[test]
    fn test_resolve_from_file() {
        let toml = r#"
[credentials]
mot_api_key = "k"
mot_api_client_id = "id"
mot_api_client_secret = "s"
mot_api_token_url = "tenant"
dvla_api_key = "d"

[server]
bind = "0.0.0.0:8080"
cors_origins = ["https://example.test"]
validate_dvla_plates = true
upstream_timeout_secs = 15

[upstream]
mot_base_url = "http://localhost:9000/"
"#;
        let resolved = PlatecheckConfig::from_toml(toml)
            .unwrap()
            .resolve(env_from(&[]))
            .unwrap();

        assert_eq!(resolved.credentials.mot_api_token_url.expose(), "tenant");
        assert_eq!(resolved.bind_address.port(), 8080);
        assert_eq!(resolved.cors_origins, vec!["https://example.test"]);
        assert!(resolved.validate_dvla_plates);
        assert_eq!(resolved.upstream_timeout, Some(Duration::from_secs(15)));
        assert_eq!(resolved.endpoints.mot_base_url, "http://localhost:9000");
        assert_eq!(resolved.endpoints.dvla_base_url, DEFAULT_DVLA_BASE_URL);
    }

    #[test]
    fn test_missing_credential_is_an_error() {
        let mut env = full_env();
        env.retain(|(k, _)| *k != "DVLA_API_KEY_TEST");

        let err = PlatecheckConfig::default()
            .resolve(env_from(&env))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: "dvla_api_key",
                ..
            }
        ));
    }

    #[test]
    fn test_bind_env_overrides_file() {
        let mut env = full_env();
        env.push((BIND_ENV, "127.0.0.1:4545"));
        let mut config = PlatecheckConfig::default();
        config.server.bind = Some("0.0.0.0:8080".to_string());

        let resolved = config.resolve(env_from(&env)).unwrap();
        assert_eq!(resolved.bind_address.port(), 4545);
    }

    #[test]
    fn test_invalid_bind_address() {
        let mut config = PlatecheckConfig::default();
        config.server.bind = Some("not-an-address".to_string());

        let err = config.resolve(env_from(&full_env())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = PlatecheckConfig::default();
        config.server.upstream_timeout_secs = Some(0);

        assert!(config.resolve(env_from(&full_env())).is_err());
    }

    #[test]
    fn test_token_url() {
        let endpoints = UpstreamEndpoints::default();
        assert_eq!(
            endpoints.token_url("tenant-123"),
            "https://login.microsoftonline.com/tenant-123/oauth2/v2.0/token"
        );
    }

    #[test]
    fn test_credentials_debug_hides_values() {
        let section = CredentialsSection {
            mot_api_key: Some("super-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", section);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<set>"));
    }
}
