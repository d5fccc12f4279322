//! Registry client: the request wrapper every operation goes through.
//!
//! Manifest fetch, tarball staging and sync task calls live in sibling
//! modules and all end up in [`NpmRegistry::request`].

mod manifest;
mod sync;
mod tarball;

use std::sync::Arc;
use std::time::Instant;

use npmsync_core::{RequestObserver, RequestRecord, TracingObserver};
use reqwest::Method;
use url::Url;

use crate::config::NpmRegistryConfig;
use crate::envelope::{RequestOptions, ResponseBody, ResponseEnvelope};
use crate::error::{RegistryError, RegistryResult};
use crate::http::{BodySink, HttpTransport, ReqwestTransport, TransportBody, TransportRequest};
use crate::url::append_query_params;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default registry client using the reqwest transport.
pub type DefaultNpmRegistry = NpmRegistry<ReqwestTransport>;

// ============================================================================
// Client
// ============================================================================

/// Client for an upstream npm registry.
///
/// Holds only read-only state, so one instance can serve any number of
/// concurrent calls.
pub struct NpmRegistry<T: HttpTransport> {
    pub(crate) config: NpmRegistryConfig,
    pub(crate) transport: T,
    pub(crate) observer: Arc<dyn RequestObserver>,
}

impl DefaultNpmRegistry {
    /// Create a client with the reqwest transport and the tracing observer.
    pub fn new(config: NpmRegistryConfig) -> RegistryResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_parts(
            config,
            transport,
            Arc::new(TracingObserver::new()),
        ))
    }
}

impl<T: HttpTransport> NpmRegistry<T> {
    /// Create a client from explicit parts.
    pub fn with_parts(
        config: NpmRegistryConfig,
        transport: T,
        observer: Arc<dyn RequestObserver>,
    ) -> Self {
        Self {
            config,
            transport,
            observer,
        }
    }

    /// Upstream base URL.
    pub fn registry(&self) -> &str {
        self.config.registry()
    }

    /// Client configuration.
    pub const fn config(&self) -> &NpmRegistryConfig {
        &self.config
    }

    /// Issue a single request.
    ///
    /// Defaults: configured request timeout, redirects followed, body decoded
    /// as JSON. Anything set in `options` replaces the matching default.
    /// `params` become query pairs for GET/HEAD/DELETE and a JSON body
    /// otherwise.
    ///
    /// Any status the upstream returns is a successful call. Errors are
    /// transport failures, writer failures and unparsable URLs.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        params: Option<&serde_json::Value>,
        options: RequestOptions<'_>,
    ) -> RegistryResult<ResponseEnvelope> {
        let mut target = Url::parse(url).map_err(|source| RegistryError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let mut body = None;
        if let Some(params) = params {
            if matches!(method, Method::GET | Method::HEAD | Method::DELETE) {
                append_query_params(&mut target, params);
            } else {
                body = Some(serde_json::to_vec(params)?);
            }
        }

        let request = TransportRequest {
            method: method.clone(),
            url: target,
            body,
            timeout: options.timeout.unwrap_or(self.config.request_timeout),
            follow_redirects: options.follow_redirects.unwrap_or(true),
        };
        let sink = options.writer.map_or(BodySink::Buffer, BodySink::Writer);

        let started = Instant::now();
        let response = self.transport.send(request, sink).await?;
        let elapsed = started.elapsed();

        self.observer.on_request_complete(&RequestRecord {
            method: method.to_string(),
            url: url.to_string(),
            status: response.status,
            elapsed,
        });

        Ok(ResponseEnvelope {
            method,
            url: url.to_string(),
            status: response.status,
            headers: response.headers,
            body: decode_body(response.body),
            elapsed,
        })
    }
}

/// Turn a raw transport body into an envelope body.
fn decode_body(body: TransportBody) -> ResponseBody {
    match body {
        TransportBody::Written(bytes_written) => ResponseBody::Streamed { bytes_written },
        TransportBody::Bytes(bytes) => {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return ResponseBody::Json(serde_json::Value::Null);
            }
            serde_json::from_slice(&bytes).map_or_else(
                |_| ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned()),
                ResponseBody::Json,
            )
        }
    }
}
