//! Request options and the uniform response envelope.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWrite;

/// Per-call overrides for [`NpmRegistry::request`](crate::NpmRegistry::request).
///
/// Every field left as `None` falls back to the client default.
#[derive(Default)]
pub struct RequestOptions<'a> {
    /// Replaces the configured request timeout
    pub timeout: Option<Duration>,
    /// Replaces the default of following redirects
    pub follow_redirects: Option<bool>,
    /// Streams the body into this writer instead of decoding it
    pub writer: Option<&'a mut (dyn AsyncWrite + Send + Unpin)>,
}

impl<'a> RequestOptions<'a> {
    /// Options with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override redirect following.
    #[must_use]
    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = Some(follow);
        self
    }

    /// Stream the response body into `writer`.
    #[must_use]
    pub fn with_writer(mut self, writer: &'a mut (dyn AsyncWrite + Send + Unpin)) -> Self {
        self.writer = Some(writer);
        self
    }
}

/// Response body after the envelope has been built.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body parsed as JSON; an empty body is `Value::Null`.
    Json(serde_json::Value),
    /// Body that was not valid JSON, kept as (lossy) text.
    Text(String),
    /// Body was streamed to a writer.
    Streamed {
        /// Bytes written to the writer
        bytes_written: u64,
    },
}

/// Uniform result of one upstream call.
///
/// `status` is whatever the upstream sent. Callers decide what a 404 or an
/// `ok: false` means.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    /// Method that was sent
    pub method: Method,
    /// URL that was requested, as given by the caller
    pub url: String,
    /// Final HTTP status
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: ResponseBody,
    /// Time from send until the body was consumed
    pub elapsed: Duration,
}

impl ResponseEnvelope {
    /// Whether the status is 2xx.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decoded JSON body, if the body was JSON.
    pub const fn json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Deserialize the JSON body into `T`.
    ///
    /// Returns `None` when the body is not JSON or does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        self.json()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Number of bytes streamed to a writer, if the body was streamed.
    pub const fn bytes_written(&self) -> Option<u64> {
        match self.body {
            ResponseBody::Streamed { bytes_written } => Some(bytes_written),
            _ => None,
        }
    }
}

/// A completed tarball download.
///
/// The file at `temp_file_path` now belongs to the caller.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// Envelope of the download request
    pub envelope: ResponseEnvelope,
    /// Staged file holding the body
    pub temp_file_path: PathBuf,
}
