//! Error types for the Aer client pipeline.

use aer_crypto::CryptoError;
use thiserror::Error;

/// Result type alias using Aer's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for upload and search operations.
///
/// Validation, auth and token-format errors are fatal to one operation and
/// never retried. Network, upload and search failures carry diagnostic detail;
/// the caller decides whether to re-invoke.
#[derive(Error, Debug)]
pub enum Error {
    /// Normalized payload has none of `content`, `plaintext`, `encryptedContent`
    #[error(r#"Payload must contain either "content", "plaintext", or "encryptedContent""#)]
    MissingContent,

    /// No auth token configured
    #[error("No authentication token configured. Please set up authentication first.")]
    Unauthenticated,

    /// Token lacks the `aer_` prefix
    #[error("Invalid token format; expected aer_{{userId}}")]
    InvalidTokenFormat,

    /// Transport-level failure (connect, TLS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Upload endpoint answered with a non-success status
    #[error("Upload failed ({status}): {body}")]
    UploadFailed { status: u16, body: String },

    /// Every candidate search endpoint failed
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// Key or cipher failure other than token format
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UploadFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<CryptoError> for Error {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidTokenFormat => Error::InvalidTokenFormat,
            other => Error::Crypto(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}
