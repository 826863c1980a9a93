//! Error types for the resolver client

use crate::models::SourceIdentifier;

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Underlying cause of a failed resolution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL (endpoint or resolved stream)
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Resolution endpoint returned an error status
    #[error("API error: {0}")]
    ApiError(String),

    /// The source has no audio-only stream
    #[error("No audio stream found for source: {0}")]
    NoAudioStream(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout,

    /// Configuration error (from pmoconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an API error
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }

    /// Classify a transport error, keeping timeouts apart
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// A source identifier that could not be turned into a playable track
///
/// This is the only failure a [`Resolver`](crate::Resolver) reports. The
/// cause is kept for logging; callers only need to know which identifier
/// failed.
#[derive(Debug, thiserror::Error)]
#[error("Could not resolve {identifier}: {cause}")]
pub struct ResolutionError {
    pub identifier: SourceIdentifier,
    #[source]
    pub cause: Error,
}

impl ResolutionError {
    pub fn new(identifier: SourceIdentifier, cause: Error) -> Self {
        Self { identifier, cause }
    }

    pub fn identifier(&self) -> &SourceIdentifier {
        &self.identifier
    }

    /// True when the failure came from the request timing out
    pub fn is_timeout(&self) -> bool {
        matches!(self.cause, Error::Timeout)
    }
}
