//! OAuth 2.0 client-credentials token cache for the MOT history API.
//!
//! # Components
//!
//! - [`client_credentials`]: token endpoint request and response types
//! - [`token_cache`]: fixed-TTL cache behind the [`TokenSource`] trait

pub mod client_credentials;
pub mod error;
pub mod token_cache;

pub use client_credentials::{ClientCredentialsConfig, DEFAULT_TOKEN_TTL, TokenResponse};
pub use error::{Result, TokenAcquisitionError};
pub use token_cache::{ClientCredentialsCache, SharedTokenSource, TokenInfo, TokenSource};
