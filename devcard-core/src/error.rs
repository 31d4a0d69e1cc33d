//! Error types for DevCard

use thiserror::Error;

/// Result type alias for DevCard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for DevCard operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Username failed GitHub login validation
    #[error("Invalid GitHub username: {0}")]
    InvalidUsername(String),

    /// The requested user or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials missing or rejected upstream
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Upstream rate limit hit
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Any other failure reported by a profile source
    #[error("Source error: {0}")]
    Source(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this failure came from missing or rejected credentials
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }
}
