//! Port interfaces for connections
//!
//! These traits define the boundary between the client facade and the HTTP
//! stacks implemented in the infra crate.

use std::fmt;

use salt_netapi_domain::{ClientConfig, Result};
use tracing::debug;

use crate::parser::ResponseParser;

/// HTTP method of a request. Chosen from the presence of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// `GET` when there is no body, `POST` otherwise.
    pub fn for_body(body: Option<&str>) -> Self {
        if body.is_some() {
            Self::Post
        } else {
            Self::Get
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable per-request view of the client state: configuration snapshot
/// plus the session token current when the call started.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub config: ClientConfig,
    pub token: Option<String>,
}

impl RequestContext {
    pub fn new(config: ClientConfig, token: Option<String>) -> Self {
        Self { config, token }
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("config", &self.config)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Issues one HTTP request and returns the raw response body.
///
/// Implementations attach the standard headers, the session token and the
/// proxy/timeout settings from the [`RequestContext`] they were created with,
/// and map every failure (transport, timeout, non-2xx) to a `SaltError`.
pub trait Transport: Send {
    fn execute(&self, method: HttpMethod, body: Option<&str>) -> Result<String>;
}

/// Builds single-use transports. Pure construction, no I/O.
pub trait ConnectionFactory: Send + Sync {
    fn open(&self, endpoint: &str, context: &RequestContext) -> Box<dyn Transport>;
}

impl dyn ConnectionFactory {
    /// Create a connection for `endpoint` whose response is read with
    /// `parser`.
    pub fn create<T>(
        &self,
        endpoint: &str,
        parser: ResponseParser<T>,
        context: &RequestContext,
    ) -> Connection<T> {
        Connection::new(endpoint, self.open(endpoint, context), parser)
    }
}

/// A transport bound to an endpoint and a response parser.
pub struct Connection<T> {
    endpoint: String,
    transport: Box<dyn Transport>,
    parser: ResponseParser<T>,
}

impl<T> Connection<T> {
    pub fn new(endpoint: impl Into<String>, transport: Box<dyn Transport>, parser: ResponseParser<T>) -> Self {
        Self { endpoint: endpoint.into(), transport, parser }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the request (GET without a body, POST with one) and parse the
    /// response.
    pub fn get_result(self, body: Option<&str>) -> Result<T> {
        let method = HttpMethod::for_body(body);
        debug!(endpoint = %self.endpoint, %method, parser = self.parser.name(), "issuing request");
        let raw = self.transport.execute(method, body).map_err(|err| {
            debug!(endpoint = %self.endpoint, kind = err.label(), error = %err, "request failed");
            err
        })?;
        self.parser.parse(&raw)
    }
}
