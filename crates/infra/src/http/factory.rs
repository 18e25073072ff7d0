//! Connection factories over reqwest
//!
//! Both factories build [`ReqwestTransport`]s and behave identically from
//! the caller's perspective. They differ only in how the underlying HTTP
//! client is managed.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::blocking::Client;
use salt_netapi_core::{ConnectionFactory, RequestContext, Transport};
use salt_netapi_domain::{ClientConfig, ProxySettings, Result};
use tracing::debug;

use super::client::HttpClientBuilder;
use super::transport::ReqwestTransport;

/// Settings a built client is bound to. A change in any of them requires a
/// new client.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NetworkSettings {
    proxy: Option<ProxySettings>,
    timeout: Option<Duration>,
}

impl NetworkSettings {
    fn of(config: &ClientConfig) -> Self {
        Self { proxy: config.proxy().cloned(), timeout: config.socket_timeout() }
    }
}

/// Full-featured factory: one shared client with connection reuse and
/// redirect handling, rebuilt whenever proxy or timeout settings change.
#[derive(Default)]
pub struct PooledConnectionFactory {
    cached: Mutex<Option<(NetworkSettings, Client)>>,
}

impl PooledConnectionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    fn client_for(&self, config: &ClientConfig) -> Result<Client> {
        let settings = NetworkSettings::of(config);
        let mut cached = self.cached.lock();

        if let Some((current, client)) = cached.as_ref() {
            if *current == settings {
                return Ok(client.clone());
            }
            debug!("network settings changed, rebuilding pooled HTTP client");
        }

        let client = HttpClientBuilder::from_config(config).build()?;
        *cached = Some((settings, client.clone()));
        Ok(client)
    }
}

impl ConnectionFactory for PooledConnectionFactory {
    fn open(&self, endpoint: &str, context: &RequestContext) -> Box<dyn Transport> {
        Box::new(ReqwestTransport::new(self.client_for(&context.config), endpoint, context))
    }
}

/// Minimal factory: a fresh single-use client per connection, no idle
/// connections kept, redirects not followed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleConnectionFactory;

impl SimpleConnectionFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ConnectionFactory for SimpleConnectionFactory {
    fn open(&self, endpoint: &str, context: &RequestContext) -> Box<dyn Transport> {
        let client = HttpClientBuilder::from_config(&context.config).pooled(false).build();
        Box::new(ReqwestTransport::new(client, endpoint, context))
    }
}
