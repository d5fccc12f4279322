//! HTTP transport abstraction for the registry client.
//!
//! The client builds a fully resolved [`TransportRequest`] (method, URL,
//! body, effective timeout, redirect policy) and hands it to an
//! [`HttpTransport`]. The production implementation uses reqwest; tests use
//! a fake that records every request it receives.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, redirect};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use url::Url;

use crate::config::NpmRegistryConfig;
use crate::error::{RegistryError, RegistryResult};

// ============================================================================
// Transport Types
// ============================================================================

/// Effective request handed to the transport, after defaults and overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Fully built URL, including query
    pub url: Url,
    /// JSON body, if any
    pub body: Option<Vec<u8>>,
    /// Ceiling for the whole exchange, body included
    pub timeout: Duration,
    /// Whether redirects are followed
    pub follow_redirects: bool,
}

/// Where the response body goes.
pub enum BodySink<'a> {
    /// Buffer the body in memory.
    Buffer,
    /// Stream the body into a writer.
    Writer(&'a mut (dyn AsyncWrite + Send + Unpin)),
}

/// Raw response body as produced by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportBody {
    /// Buffered bytes
    Bytes(Vec<u8>),
    /// Number of bytes streamed into the writer
    Written(u64),
}

/// Raw response as produced by the transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Body
    pub body: TransportBody,
}

// ============================================================================
// HTTP Transport Trait
// ============================================================================

/// Trait for HTTP transports that execute a single request.
///
/// Implementations must not retry and must not treat non-2xx statuses as
/// errors. Only transport-level failures and writer failures are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute `request`, delivering the body to `sink`.
    async fn send(
        &self,
        request: TransportRequest,
        sink: BodySink<'_>,
    ) -> RegistryResult<TransportResponse>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Production transport using reqwest.
///
/// Redirect policy is a client-level setting in reqwest, so two clients are
/// kept and picked per request.
pub struct ReqwestTransport {
    following: reqwest::Client,
    not_following: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: &NpmRegistryConfig) -> RegistryResult<Self> {
        let following = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()?;
        let not_following = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            following,
            not_following,
        })
    }

    fn client(&self, follow_redirects: bool) -> &reqwest::Client {
        if follow_redirects {
            &self.following
        } else {
            &self.not_following
        }
    }
}

/// Copy a streamed body into `writer`, returning the byte count.
async fn stream_into(
    response: reqwest::Response,
    writer: &mut (dyn AsyncWrite + Send + Unpin),
) -> RegistryResult<u64> {
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer
            .write_all(&chunk)
            .await
            .map_err(RegistryError::Write)?;
        written += chunk.len() as u64;
    }

    writer.flush().await.map_err(RegistryError::Write)?;
    Ok(written)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: TransportRequest,
        sink: BodySink<'_>,
    ) -> RegistryResult<TransportResponse> {
        let mut builder = self
            .client(request.follow_redirects)
            .request(request.method, request.url)
            .timeout(request.timeout);

        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();

        let body = match sink {
            BodySink::Buffer => TransportBody::Bytes(response.bytes().await?.to_vec()),
            BodySink::Writer(writer) => TransportBody::Written(stream_into(response, writer).await?),
        };

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

// ============================================================================
// Fake Transport for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    fn get(url: &str) -> TransportRequest {
        TransportRequest {
            method: Method::GET,
            url: Url::parse(url).unwrap(),
            body: None,
            timeout: Duration::from_secs(10),
            follow_redirects: true,
        }
    }

    #[test]
    fn test_reqwest_transport_creation() {
        let config = NpmRegistryConfig::new();
        assert!(ReqwestTransport::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_fake_transport_buffers_and_records() {
        let transport =
            FakeTransport::new().with_reply(FakeReply::json(200, &json!({"name": "left-pad"})));

        let response = transport
            .send(get("https://registry.example/left-pad"), BodySink::Buffer)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert!(matches!(response.body, TransportBody::Bytes(ref b) if !b.is_empty()));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_fake_transport_writes_partial_then_fails() {
        let transport =
            FakeTransport::new().with_reply(FakeReply::bytes(200, vec![7u8; 100]).failing_after(40));

        let mut sink: Vec<u8> = Vec::new();
        let result = transport
            .send(
                get("https://registry.example/a.tgz"),
                BodySink::Writer(&mut sink),
            )
            .await;

        assert!(matches!(result, Err(RegistryError::Write(_))));
        assert_eq!(sink.len(), 40);
    }

    #[tokio::test]
    async fn test_fake_transport_defaults_to_404() {
        let transport = FakeTransport::new();
        let response = transport
            .send(get("https://registry.example/missing"), BodySink::Buffer)
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }
}
