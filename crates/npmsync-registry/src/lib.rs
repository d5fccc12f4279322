#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod envelope;
mod error;
mod http;
mod port;
mod staging;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultNpmRegistry, NpmRegistry};

// Configuration
pub use config::{
    DEFAULT_DOWNLOAD_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SOURCE_REGISTRY, NpmRegistryConfig,
};

// Request/response envelopes
pub use envelope::{DownloadResult, RequestOptions, ResponseBody, ResponseEnvelope};

// Errors
pub use error::{RegistryError, RegistryResult};

// Transport seam
pub use http::{BodySink, HttpTransport, ReqwestTransport, TransportBody, TransportRequest, TransportResponse};

// HTTP types that appear in the public API
pub use reqwest::Method;
pub use reqwest::header::HeaderMap;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use wiremock as _;
