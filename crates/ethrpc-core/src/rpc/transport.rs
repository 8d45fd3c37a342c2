//! HTTP transport seam used by [`HttpRpcClient`](super::HttpRpcClient).
//!
//! The client never talks to `reqwest` directly; it hands a serialized
//! request to an [`HttpSender`] and gets raw body bytes back. Callers that
//! must route outbound HTTP through something other than a process-wide
//! client (a request-scoped proxy, a sandboxed fetch API, a test double)
//! provide their own sender.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, trace};

/// Suggested connect timeout for callers of [`ReqwestSender::with_timeouts`].
/// Nothing applies it by default.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Issues one HTTP POST and returns the response body untouched.
///
/// Implementations must not interpret the HTTP status: JSON-RPC errors can
/// arrive with any status code and are decoded from the body.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}

/// [`HttpSender`] backed by a pooled `reqwest::Client`.
pub struct ReqwestSender {
    client: reqwest::Client,
    auth: Option<(String, String)>,
}

impl ReqwestSender {
    /// Wrap an existing client. Its timeouts, proxy and TLS settings apply
    /// unchanged.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, auth: None }
    }

    /// Pooled client with no connect or request timeout. A call waits as
    /// long as the node takes to answer.
    pub fn pooled() -> Result<Self, TransportError> {
        let client = pooled_builder().build()?;
        Ok(Self::new(client))
    }

    /// Pooled client that gives up after the given timeouts.
    pub fn with_timeouts(
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = pooled_builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        Ok(Self::new(client))
    }

    pub fn with_basic_auth(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.auth = Some((user.into(), pass.into()));
        self
    }
}

fn pooled_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .pool_max_idle_per_host(32)
        .tcp_nodelay(true)
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let mut builder = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(%status, body_len = bytes.len(), "http response");
        trace!(body = %String::from_utf8_lossy(&bytes), "http response body");

        Ok(bytes.to_vec())
    }
}
