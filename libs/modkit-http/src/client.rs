//! Traced HTTP client
//!
//! Thin wrapper around `reqwest::Client` that opens an `outgoing_http` span for
//! every request and records the response status on it.

use std::time::Duration;

use serde::Serialize;
use tracing::{field, Instrument, Level};

/// An HTTP client that emits one tracing span per outgoing request.
#[derive(Clone, Debug)]
pub struct TracedClient {
    inner: reqwest::Client,
}

impl TracedClient {
    /// Create a new TracedClient wrapping the provided reqwest::Client
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Build a client with an optional overall request timeout.
    /// `None` keeps the transport default (no timeout).
    pub fn with_timeout(timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self::new(builder.build()?))
    }

    /// Execute a built request inside an `outgoing_http` span.
    pub async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let span = tracing::span!(
            Level::INFO, "outgoing_http",
            http.method = %req.method(),
            http.url = %req.url(),
            http.status_code = field::Empty,
            error = field::Empty,
            otel.kind = "client",
        );

        let response = self
            .inner
            .execute(req)
            .instrument(span.clone())
            .await
            .inspect_err(|_| {
                span.record("error", true);
            })?;

        span.record("http.status_code", response.status().as_u16());
        if response.status().is_client_error() || response.status().is_server_error() {
            span.record("error", true);
        }

        Ok(response)
    }

    /// GET without a body
    pub async fn get(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        let req = self.inner.get(url).build()?;
        self.execute(req).await
    }

    /// POST with a JSON body
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> reqwest::Result<reqwest::Response> {
        let req = self.inner.post(url).json(body).build()?;
        self.execute(req).await
    }

    /// PUT with a JSON body
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> reqwest::Result<reqwest::Response> {
        let req = self.inner.put(url).json(body).build()?;
        self.execute(req).await
    }

    /// DELETE without a body
    pub async fn delete(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        let req = self.inner.delete(url).build()?;
        self.execute(req).await
    }

    /// Get a reference to the underlying reqwest::Client for advanced usage
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

impl From<reqwest::Client> for TracedClient {
    fn from(c: reqwest::Client) -> Self {
        Self::new(c)
    }
}

impl Default for TracedClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}
