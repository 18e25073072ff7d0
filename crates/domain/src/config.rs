//! Client configuration
//!
//! `ClientConfig` is the configuration store read by the connection layer on
//! every call. The session token is not part of it; see the infra crate's
//! session store.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a Salt API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, e.g. `https://salt-master:8000`
    pub url: String,
    /// Optional HTTP proxy used for every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxySettings>,
    /// Socket timeout in milliseconds, applied to connect and read. `0`
    /// disables the timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_timeout_ms: Option<u64>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), proxy: None, socket_timeout_ms: None }
    }

    /// Full URL for an endpoint path such as `/login`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), endpoint)
    }

    /// Effective socket timeout; `None` when unset or zero.
    pub fn socket_timeout(&self) -> Option<Duration> {
        self.socket_timeout_ms.filter(|millis| *millis > 0).map(Duration::from_millis)
    }

    pub fn set_socket_timeout(&mut self, timeout: Duration) {
        self.socket_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
    }

    pub fn clear_socket_timeout(&mut self) {
        self.socket_timeout_ms = None;
    }

    pub fn proxy(&self) -> Option<&ProxySettings> {
        self.proxy.as_ref()
    }

    pub fn set_proxy(&mut self, proxy: ProxySettings) {
        self.proxy = Some(proxy);
    }

    pub fn clear_proxy(&mut self) {
        self.proxy = None;
    }
}

/// Proxy host, port and optional basic credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySettings {
    pub hostname: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

impl ProxySettings {
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self { hostname: hostname.into(), port, username: None, password: None }
    }

    /// Attach basic credentials. The password is only used when a username
    /// is present.
    pub fn with_credentials(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    /// Proxy URL in the form `http://host:port`.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.port)
    }
}

impl fmt::Debug for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxySettings")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
