//! Salt API client facade
//!
//! One method per API operation. Each builds its request payload, opens a
//! connection through the configured factory, parses the response and
//! unwraps the single-element result list the API wraps most payloads in.
//! Every operation has an `_async` twin that runs the same code on the
//! worker pool.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use salt_netapi_core::lowstate::{self, RunRequest};
use salt_netapi_core::parser::{self, Retvals};
use salt_netapi_core::{unwrap_single, ConnectionFactory, RequestContext, ResponseParser};
use salt_netapi_domain::constants::{
    JOBS_ENDPOINT, KEYS_ENDPOINT, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, MINIONS_ENDPOINT, RUN_ENDPOINT,
    STATS_ENDPOINT,
};
use salt_netapi_domain::{
    Arguments, AuthModule, ClientConfig, Job, JobResult, Keys, ProxySettings, Result, SaltError,
    ScheduledJob, Stats, Token,
};
use tracing::{debug, info, instrument};
use url::Url;

use super::session::SessionStore;
use super::worker::{PendingCall, WorkerPool};
use crate::http::PooledConnectionFactory;

/// Client for the Salt REST API.
///
/// Cheap to clone; clones share configuration, session and worker pool.
///
/// The blocking methods must be called from a plain thread, not from inside
/// an async task. Async code uses the `_async` twins.
#[derive(Clone)]
pub struct SaltClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: RwLock<ClientConfig>,
    session: SessionStore,
    factory: Arc<dyn ConnectionFactory>,
    workers: WorkerPool,
}

impl SaltClient {
    /// Client for `url` with the pooled connection factory.
    ///
    /// # Errors
    ///
    /// Returns `SaltError::Config` if the URL is invalid or no worker pool
    /// can be started.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::builder().url(url).build()
    }

    pub fn builder() -> SaltClientBuilder {
        SaltClientBuilder::default()
    }

    /* ---------------------------------------------------------------------- */
    /* Configuration and session */
    /* ---------------------------------------------------------------------- */

    /// Snapshot of the current configuration.
    pub fn config(&self) -> ClientConfig {
        self.inner.config.read().clone()
    }

    /// Route every following request through `proxy`.
    pub fn set_proxy(&self, proxy: ProxySettings) {
        debug!(proxy = %proxy.url(), "proxy configured");
        self.inner.config.write().set_proxy(proxy);
    }

    /// Connect and read timeout for every following request.
    pub fn set_socket_timeout(&self, timeout: Duration) {
        debug!(timeout_ms = timeout.as_millis() as u64, "socket timeout configured");
        self.inner.config.write().set_socket_timeout(timeout);
    }

    /// Apply an arbitrary change to the configuration.
    pub fn update_config(&self, update: impl FnOnce(&mut ClientConfig)) {
        update(&mut *self.inner.config.write());
    }

    /// Current session token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.inner.session.token()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.session.is_set()
    }

    fn context(&self) -> RequestContext {
        RequestContext::new(self.config(), self.inner.session.token())
    }

    fn call<T>(&self, endpoint: &str, parser: ResponseParser<T>, body: Option<&str>) -> Result<T> {
        let context = self.context();
        self.inner.factory.create(endpoint, parser, &context).get_result(body)
    }

    fn spawn<T, F>(&self, operation: F) -> PendingCall<T>
    where
        T: Send + 'static,
        F: FnOnce(&SaltClient) -> Result<T> + Send + 'static,
    {
        let client = self.clone();
        self.inner.workers.submit(move || operation(&client))
    }

    /* ---------------------------------------------------------------------- */
    /* Authentication */
    /* ---------------------------------------------------------------------- */

    /// Log in with the `auto` eauth backend.
    pub fn login(&self, username: &str, password: &str) -> Result<Token> {
        self.login_with(username, password, AuthModule::Auto)
    }

    /// Log in and store the returned session token. Nothing is stored when
    /// the call fails.
    #[instrument(skip(self, password))]
    pub fn login_with(&self, username: &str, password: &str, eauth: AuthModule) -> Result<Token> {
        let body = lowstate::login_body(username, password, eauth)?;
        let tokens = self.call(LOGIN_ENDPOINT, parser::TOKEN, Some(&body))?;
        let token = unwrap_single(tokens, LOGIN_ENDPOINT)?;

        self.inner.session.set(token.token.clone());
        info!(user = %token.user, expire = %token.expire, "logged in");
        Ok(token)
    }

    /// Invalidate the session on the server and forget the token.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<String> {
        let message = self.call(LOGOUT_ENDPOINT, parser::STRING, Some(""))?;
        self.inner.session.clear();
        info!("logged out");
        Ok(message)
    }

    /* ---------------------------------------------------------------------- */
    /* Commands and jobs */
    /* ---------------------------------------------------------------------- */

    /// Dispatch `function` to the minions matching `target` without waiting
    /// for their returns.
    #[instrument(skip(self, target, arguments), fields(tgt = %target))]
    pub fn start_command(
        &self,
        target: &str,
        function: &str,
        arguments: Option<&Arguments>,
    ) -> Result<ScheduledJob> {
        let body = lowstate::command_body(target, function, arguments)?;
        let jobs = self.call(MINIONS_ENDPOINT, parser::JOB_MINIONS, Some(&body))?;
        let job = unwrap_single(jobs, MINIONS_ENDPOINT)?;
        debug!(jid = %job.jid, minions = job.minions.len(), "command dispatched");
        Ok(job)
    }

    /// Run a command synchronously through `/run`, authenticating inline.
    /// Returns the return value of every minion that answered.
    #[instrument(skip(self, request), fields(tgt = %request.target, function = %request.function))]
    pub fn run(&self, request: &RunRequest) -> Result<Retvals> {
        let body = request.to_body()?;
        let retvals = self.call(RUN_ENDPOINT, parser::RETVALS, Some(&body))?;
        unwrap_single(retvals, RUN_ENDPOINT)
    }

    /// Per-minion returns of job `jid`.
    #[instrument(skip(self))]
    pub fn job_returns(&self, jid: &str) -> Result<Retvals> {
        let endpoint = job_endpoint(jid);
        let retvals = self.call(&endpoint, parser::RETVALS, None)?;
        unwrap_single(retvals, &endpoint)
    }

    /// Metadata of job `jid` together with its per-minion returns.
    #[instrument(skip(self))]
    pub fn job_result(&self, jid: &str) -> Result<JobResult> {
        let endpoint = job_endpoint(jid);
        let results = self.call(&endpoint, parser::JOB_RESULT, None)?;
        unwrap_single(results, &endpoint)
    }

    /// Jobs known to the job cache, keyed by jid.
    #[instrument(skip(self))]
    pub fn jobs(&self) -> Result<BTreeMap<String, Job>> {
        let jobs = self.call(JOBS_ENDPOINT, parser::JOBS, None)?;
        unwrap_single(jobs, JOBS_ENDPOINT)
    }

    /* ---------------------------------------------------------------------- */
    /* Keys and statistics */
    /* ---------------------------------------------------------------------- */

    #[instrument(skip(self))]
    pub fn keys(&self) -> Result<Keys> {
        self.call(KEYS_ENDPOINT, parser::KEYS, None)
    }

    #[instrument(skip(self))]
    pub fn stats(&self) -> Result<Stats> {
        self.call(STATS_ENDPOINT, parser::STATS, None)
    }

    /* ---------------------------------------------------------------------- */
    /* Asynchronous twins */
    /* ---------------------------------------------------------------------- */

    pub fn login_async(&self, username: &str, password: &str) -> PendingCall<Token> {
        self.login_with_async(username, password, AuthModule::Auto)
    }

    pub fn login_with_async(
        &self,
        username: &str,
        password: &str,
        eauth: AuthModule,
    ) -> PendingCall<Token> {
        let (username, password) = (username.to_string(), password.to_string());
        self.spawn(move |client| client.login_with(&username, &password, eauth))
    }

    pub fn logout_async(&self) -> PendingCall<String> {
        self.spawn(SaltClient::logout)
    }

    pub fn start_command_async(
        &self,
        target: &str,
        function: &str,
        arguments: Option<Arguments>,
    ) -> PendingCall<ScheduledJob> {
        let (target, function) = (target.to_string(), function.to_string());
        self.spawn(move |client| client.start_command(&target, &function, arguments.as_ref()))
    }

    pub fn run_async(&self, request: RunRequest) -> PendingCall<Retvals> {
        self.spawn(move |client| client.run(&request))
    }

    pub fn job_returns_async(&self, jid: &str) -> PendingCall<Retvals> {
        let jid = jid.to_string();
        self.spawn(move |client| client.job_returns(&jid))
    }

    pub fn job_result_async(&self, jid: &str) -> PendingCall<JobResult> {
        let jid = jid.to_string();
        self.spawn(move |client| client.job_result(&jid))
    }

    pub fn jobs_async(&self) -> PendingCall<BTreeMap<String, Job>> {
        self.spawn(SaltClient::jobs)
    }

    pub fn keys_async(&self) -> PendingCall<Keys> {
        self.spawn(SaltClient::keys)
    }

    pub fn stats_async(&self) -> PendingCall<Stats> {
        self.spawn(SaltClient::stats)
    }
}

impl std::fmt::Debug for SaltClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaltClient")
            .field("config", &*self.inner.config.read())
            .field("session", &self.inner.session)
            .field("workers", &self.inner.workers)
            .finish_non_exhaustive()
    }
}

fn job_endpoint(jid: &str) -> String {
    format!("{}/{}", JOBS_ENDPOINT, urlencoding::encode(jid))
}

/// Builder for [`SaltClient`].
#[derive(Default)]
pub struct SaltClientBuilder {
    config: Option<ClientConfig>,
    factory: Option<Arc<dyn ConnectionFactory>>,
    workers: Option<WorkerPool>,
}

impl SaltClientBuilder {
    /// Base URL of the API. Replaces the URL of a configuration given
    /// earlier.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        match self.config.as_mut() {
            Some(config) => config.url = url,
            None => self.config = Some(ClientConfig::new(url)),
        }
        self
    }

    /// Start from a complete configuration, e.g. one read by
    /// [`crate::config::load`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connection factory to use; defaults to [`PooledConnectionFactory`].
    pub fn factory(mut self, factory: impl ConnectionFactory + 'static) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Pool for the asynchronous operations. Defaults to the runtime the
    /// builder is called from, or a dedicated pool outside of one.
    pub fn workers(mut self, workers: WorkerPool) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn build(self) -> Result<SaltClient> {
        let config =
            self.config.ok_or_else(|| SaltError::Config("Salt API URL is required".to_string()))?;
        Url::parse(&config.url)
            .map_err(|e| SaltError::Config(format!("Invalid Salt API URL '{}': {}", config.url, e)))?;

        let factory = self.factory.unwrap_or_else(|| Arc::new(PooledConnectionFactory::new()));
        let workers = match self.workers.or_else(WorkerPool::current) {
            Some(workers) => workers,
            None => WorkerPool::new()?,
        };

        debug!(url = %config.url, "Salt API client created");
        Ok(SaltClient {
            inner: Arc::new(ClientInner {
                config: RwLock::new(config),
                session: SessionStore::new(),
                factory,
                workers,
            }),
        })
    }
}
