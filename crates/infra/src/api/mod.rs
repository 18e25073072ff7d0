//! Salt API client
//!
//! This module provides the client facade over the Salt REST API. It holds
//! the configuration and session state, issues every operation through the
//! injected connection factory, and runs the asynchronous twins on a worker
//! pool.
//!
//! # Architecture
//!
//! - Transports come from a `ConnectionFactory` (pooled by default)
//! - Session token kept in a synchronized store, set by login, cleared by
//!   logout
//! - Async operations run the blocking code path on the tokio blocking pool
//! - No retry, no backoff: every failure surfaces as a `SaltError`

pub mod client;
pub mod session;
pub mod worker;

pub use client::{SaltClient, SaltClientBuilder};
pub use session::SessionStore;
pub use worker::{PendingCall, WorkerPool};
