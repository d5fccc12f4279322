//! Error types for upstream port operations.

use thiserror::Error;

/// Errors from upstream port operations.
///
/// Only transport and staging failures are errors. An upstream answering
/// with a 4xx/5xx status is a normal `UpstreamReply`.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request did not complete within its timeout.
    #[error("Request to {url} timed out")]
    Timeout {
        /// The URL that timed out
        url: String,
    },

    /// Connection, DNS, TLS or protocol failure.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// Local filesystem failure while staging a download.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the failure, including the path when known
        message: String,
    },

    /// The URL could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Parser message
        message: String,
    },

    /// The request could not be built (e.g. unserializable params).
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What was wrong with the request
        message: String,
    },
}

/// Result type alias for upstream port operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
