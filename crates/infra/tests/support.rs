//! Shared helpers for the Salt API integration tests

use salt_netapi_infra::{PooledConnectionFactory, SaltClient, SimpleConnectionFactory};
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const LOGIN_RESPONSE: &str = include_str!("fixtures/login_response.json");
pub const LOGOUT_RESPONSE: &str = include_str!("fixtures/logout_response.json");
pub const MINIONS_RESPONSE: &str = include_str!("fixtures/minions_response.json");
pub const RUN_RESPONSE: &str = include_str!("fixtures/run_response.json");
pub const JOBS_RESPONSE: &str = include_str!("fixtures/jobs_response.json");
pub const JOB_RESPONSE: &str = include_str!("fixtures/job_response.json");
pub const KEYS_RESPONSE: &str = include_str!("fixtures/keys_response.json");
pub const STATS_RESPONSE: &str = include_str!("fixtures/stats_response.json");

pub const TOKEN: &str = "f248284b655724ca8a86bcab4b8df608ebf5b08b";

/// Mock Salt API driven from its own runtime, so the blocking client can be
/// called from the test thread.
pub struct SaltApiMock {
    server: MockServer,
    runtime: Runtime,
}

impl SaltApiMock {
    pub fn start() -> Self {
        init_tracing();
        let runtime = Runtime::new().expect("runtime should start");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn address(&self) -> std::net::SocketAddr {
        *self.server.address()
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .expect("request recording is enabled")
    }

    /// Client with the default pooled factory.
    pub fn pooled_client(&self) -> SaltClient {
        SaltClient::builder()
            .url(self.uri())
            .factory(PooledConnectionFactory::new())
            .build()
            .expect("client should build")
    }

    /// Client with the minimal factory.
    pub fn simple_client(&self) -> SaltClient {
        SaltClient::builder()
            .url(self.uri())
            .factory(SimpleConnectionFactory::new())
            .build()
            .expect("client should build")
    }

    /// One client per connection factory.
    pub fn clients(&self) -> Vec<(&'static str, SaltClient)> {
        vec![("pooled", self.pooled_client()), ("simple", self.simple_client())]
    }
}

/// 200 response carrying `body` as JSON.
pub fn json_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|value| value.to_str().ok())
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
