//! Transport abstraction and the reqwest-backed implementation.
//!
//! The dispatcher submits requests through the [`Transport`] trait so tests
//! can substitute a mock. The production implementation, [`HttpTransport`],
//! opens a fresh session per call: VDP calls share no connection cache, and
//! the certificate strategy's TLS client identity is a session-level option
//! that must be applied when the session is created.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::time::Duration;

use tracing::instrument;

use crate::{
    auth::SessionOptions,
    endpoint::HttpVerb,
    error::Result,
    request::OutgoingRequest,
};

/// Raw response from the transport, before envelope construction.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Response body as text.
    pub body: String,
}

/// Contract between the dispatcher and the wire.
///
/// One `send` per call, exactly once, no retries. Retry policy is left to
/// the caller: the remote API's duplicate-transaction signaling makes blind
/// retries unsafe for mutating calls.
pub trait Transport: Send + Sync {
    /// Submits the request over a fresh session configured with the given
    /// session options.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was obtained (connection
    /// failure, timeout, TLS failure). A response with any status code,
    /// including errors, is returned as [`RawResponse`]; classification is
    /// the dispatcher's job.
    fn send<'a>(
        &'a self,
        request: &'a OutgoingRequest,
        session: &'a SessionOptions,
    ) -> impl Future<Output = Result<RawResponse>> + Send + 'a;
}

/// HTTPS transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport with the given per-request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request, session), fields(verb = %request.verb, url = %request.url))]
    async fn send<'a>(
        &'a self,
        request: &'a OutgoingRequest,
        session: &'a SessionOptions,
    ) -> Result<RawResponse> {
        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(pem) = &session.identity_pem {
            builder = builder.identity(reqwest::Identity::from_pem(pem)?);
        }
        let client = builder.build()?;

        let mut outgoing = match request.verb {
            HttpVerb::Get => client.get(&request.url),
            HttpVerb::Post => client.post(&request.url),
            HttpVerb::Put => client.put(&request.url),
        };

        if !request.query.is_empty() {
            outgoing = outgoing.query(&request.query);
        }
        for (name, value) in &request.headers {
            outgoing = outgoing.header(name, value);
        }
        if let Some((username, password)) = &request.basic_auth {
            outgoing = outgoing.basic_auth(username, Some(password));
        }
        if let Some(body) = &request.body {
            outgoing = outgoing.body(body.clone());
        }

        let response = outgoing.send().await?;

        let code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.to_string(), value.to_str().unwrap_or_default().to_owned())
            })
            .collect();
        let body = response.text().await?;

        Ok(RawResponse { code, headers, body })
    }
}
