//! Request payload builders
//!
//! Lowstate chunks describe target, function and arguments of a command.
//! Field order is fixed by the structs below so the serialized bodies are
//! stable byte-for-byte.

use std::collections::BTreeMap;

use salt_netapi_domain::{Arguments, AuthModule, ClientKind, Result, SaltError};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
    eauth: AuthModule,
}

#[derive(Serialize)]
struct CommandChunk<'a> {
    tgt: &'a str,
    fun: &'a str,
    #[serde(skip_serializing_if = "<[Value]>::is_empty")]
    arg: &'a [Value],
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    kwarg: &'a BTreeMap<String, Value>,
}

#[derive(Serialize)]
struct RunChunk<'a> {
    username: &'a str,
    password: &'a str,
    eauth: AuthModule,
    client: ClientKind,
    #[serde(flatten)]
    command: CommandChunk<'a>,
}

/// `/login` body: `{"username", "password", "eauth"}`.
pub fn login_body(username: &str, password: &str, eauth: AuthModule) -> Result<String> {
    Ok(serde_json::to_string(&LoginBody { username, password, eauth })?)
}

/// `/minions` body: a one-chunk lowstate list `[{"tgt", "fun", "arg", "kwarg"}]`.
///
/// `arg` and `kwarg` are left out when there are no positional or named
/// values respectively.
pub fn command_body(target: &str, function: &str, arguments: Option<&Arguments>) -> Result<String> {
    let empty = Arguments::default();
    let arguments = arguments.unwrap_or(&empty);
    let chunk =
        CommandChunk { tgt: target, fun: function, arg: arguments.args(), kwarg: arguments.kwargs() };
    Ok(serde_json::to_string(&[chunk])?)
}

/// Parameters of a `/run` call, which authenticates inline and bypasses the
/// session.
#[derive(Clone, PartialEq)]
pub struct RunRequest {
    pub username: String,
    pub password: String,
    pub eauth: AuthModule,
    pub client: ClientKind,
    pub target: String,
    pub function: String,
    pub arguments: Option<Arguments>,
}

impl RunRequest {
    /// A `local` client run authenticated with `auto` eauth.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        target: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            eauth: AuthModule::default(),
            client: ClientKind::default(),
            target: target.into(),
            function: function.into(),
            arguments: None,
        }
    }

    pub fn eauth(mut self, eauth: AuthModule) -> Self {
        self.eauth = eauth;
        self
    }

    pub fn client(mut self, client: ClientKind) -> Self {
        self.client = client;
        self
    }

    pub fn arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = Some(arguments);
        self
    }

    /// `/run` body: `[{"username", "password", "eauth", "client", "tgt",
    /// "fun", "arg", "kwarg"}]`.
    pub fn to_body(&self) -> Result<String> {
        let empty = Arguments::default();
        let arguments = self.arguments.as_ref().unwrap_or(&empty);
        let chunk = RunChunk {
            username: &self.username,
            password: &self.password,
            eauth: self.eauth,
            client: self.client,
            command: CommandChunk {
                tgt: &self.target,
                fun: &self.function,
                arg: arguments.args(),
                kwarg: arguments.kwargs(),
            },
        };
        Ok(serde_json::to_string(&[chunk])?)
    }
}

impl std::fmt::Debug for RunRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunRequest")
            .field("username", &self.username)
            .field("eauth", &self.eauth)
            .field("client", &self.client)
            .field("target", &self.target)
            .field("function", &self.function)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Take the single element the API wraps list payloads in.
///
/// An empty list fails with [`SaltError::EmptyResponse`]; extra elements are
/// ignored.
pub fn unwrap_single<T>(items: Vec<T>, endpoint: &str) -> Result<T> {
    let count = items.len();
    if count > 1 {
        debug!(endpoint, count, "result list has more than one element, using the first");
    }
    items
        .into_iter()
        .next()
        .ok_or_else(|| SaltError::EmptyResponse { endpoint: endpoint.to_string() })
}
