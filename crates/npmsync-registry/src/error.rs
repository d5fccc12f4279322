//! Internal error types for registry operations.
//!
//! These are mapped to `UpstreamError` at the port boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised by the registry client.
///
/// A non-2xx upstream status is never one of these.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Connection, DNS, TLS, timeout or protocol failure.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Writing the response body to its destination failed.
    #[error("Failed to write response body: {0}")]
    Write(#[source] std::io::Error),

    /// Preparing the staging location failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being created
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The URL could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// Request params could not be serialized.
    #[error("Failed to encode request params: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RegistryError {
    /// Whether this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
