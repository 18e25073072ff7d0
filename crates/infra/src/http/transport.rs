//! Blocking HTTP transport

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use salt_netapi_core::{HttpMethod, RequestContext, Transport};
use salt_netapi_domain::constants::{JSON_MEDIA_TYPE, SESSION_TOKEN_HEADER};
use salt_netapi_domain::{Result, SaltError};
use tracing::{debug, warn};

use crate::errors::http_error;

/// One request against one endpoint, sent with a reqwest blocking client.
///
/// A client that failed to build is kept as its error and reported when the
/// request is executed, so opening a connection never fails.
pub struct ReqwestTransport {
    client: Result<Client>,
    url: String,
    token: Option<String>,
}

impl ReqwestTransport {
    pub fn new(client: Result<Client>, endpoint: &str, context: &RequestContext) -> Self {
        Self { client, url: context.config.endpoint_url(endpoint), token: context.token.clone() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, method: HttpMethod, body: Option<&str>) -> Result<String> {
        let client = self.client.as_ref().map_err(Clone::clone)?;

        let mut request = match method {
            HttpMethod::Get => client.get(&self.url),
            HttpMethod::Post => client.post(&self.url),
        }
        .header(ACCEPT, JSON_MEDIA_TYPE);

        if let Some(token) = &self.token {
            request = request.header(SESSION_TOKEN_HEADER, token);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(body.to_string());
        }

        debug!(%method, url = %self.url, "sending HTTP request");
        let response = request.send().map_err(http_error)?;
        let status = response.status();
        debug!(%method, url = %self.url, %status, "received HTTP response");

        let text = response.text().map_err(http_error)?;
        if !status.is_success() {
            warn!(%method, url = %self.url, status = status.as_u16(), "request rejected");
            return Err(SaltError::Status { status: status.as_u16(), body: text });
        }

        Ok(text)
    }
}
