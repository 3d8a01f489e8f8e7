//! HTTP transport seam
//!
//! The dispatcher talks to upstream APIs through `HttpTransport`, so it can be
//! exercised without a network. `ReqwestTransport` is the production
//! implementation; one instance (one connection pool) is shared by all calls.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::BridgeResult;

use super::binding::BoundRequest;

/// Status and body of an upstream response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends bound requests
///
/// Implementations must be safe to call from many tasks at once.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform exactly one request
    ///
    /// Non-2xx statuses are returned as responses, not errors; only
    /// transport-level failures are errors.
    async fn send(&self, request: &BoundRequest) -> BridgeResult<HttpResponse>;
}

/// `HttpTransport` backed by a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    /// Per-call timeout; `None` keeps the client's default
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Create a transport with a default client
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &BoundRequest) -> BridgeResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.to_reqwest(), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
