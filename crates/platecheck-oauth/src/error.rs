//! Error types for token acquisition.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, TokenAcquisitionError>;

/// Errors that can occur while acquiring a bearer token.
#[derive(Debug, thiserror::Error)]
pub enum TokenAcquisitionError {
    /// The token endpoint could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The token endpoint answered with a non-success status.
    #[error("Token endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not carry a usable `access_token`.
    #[error("Malformed token response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for TokenAcquisitionError {
    fn from(e: reqwest::Error) -> Self {
        TokenAcquisitionError::Network(e.to_string())
    }
}
