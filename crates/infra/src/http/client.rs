use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::Proxy;
use salt_netapi_domain::{ClientConfig, ProxySettings, Result};
use tracing::debug;

use crate::errors::http_error;

const USER_AGENT: &str = concat!("salt-netapi-rust/", env!("CARGO_PKG_VERSION"));

/// Builder for the blocking reqwest client behind every transport.
///
/// System proxy variables are ignored; the only proxy used is the one from
/// the client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    proxy: Option<ProxySettings>,
    pooled: bool,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: None, proxy: None, pooled: true, user_agent: USER_AGENT.to_string() }
    }
}

impl HttpClientBuilder {
    /// Start from the network settings (proxy, socket timeout) of `config`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::default().timeout(config.socket_timeout()).proxy(config.proxy().cloned())
    }

    /// Timeout applied to connect and to the whole request. `None` waits
    /// forever.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn proxy(mut self, proxy: Option<ProxySettings>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Keep idle connections and follow redirects (`true`, the default), or
    /// open a fresh connection per request and never redirect.
    pub fn pooled(mut self, pooled: bool) -> Self {
        self.pooled = pooled;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut builder = Client::builder().no_proxy().user_agent(self.user_agent).timeout(self.timeout);

        if let Some(timeout) = self.timeout {
            builder = builder.connect_timeout(timeout);
        }

        if let Some(settings) = &self.proxy {
            let mut proxy = Proxy::all(settings.url()).map_err(http_error)?;
            if let Some(username) = &settings.username {
                proxy = proxy.basic_auth(username, settings.password.as_deref().unwrap_or_default());
            }
            builder = builder.proxy(proxy);
        }

        if !self.pooled {
            builder = builder.pool_max_idle_per_host(0).redirect(Policy::none());
        }

        debug!(
            pooled = self.pooled,
            timeout_ms = self.timeout.map(|t| t.as_millis() as u64),
            proxy = ?self.proxy.as_ref().map(ProxySettings::url),
            "building HTTP client"
        );

        builder.build().map_err(http_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_config_with_proxy_and_timeout() {
        let mut config = ClientConfig::new("http://salt:8000");
        config.set_socket_timeout(Duration::from_secs(3));
        config.set_proxy(
            ProxySettings::new("proxy.local", 3128).with_credentials("alice", Some("pw".into())),
        );

        let builder = HttpClientBuilder::from_config(&config);
        assert_eq!(builder.timeout, Some(Duration::from_secs(3)));
        assert_eq!(builder.proxy.as_ref().map(|p| p.port), Some(3128));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn unpooled_client_builds() {
        assert!(HttpClientBuilder::default().pooled(false).build().is_ok());
    }

    #[test]
    fn default_user_agent_names_the_crate() {
        assert!(HttpClientBuilder::default().user_agent.starts_with("salt-netapi-rust/"));
    }
}
