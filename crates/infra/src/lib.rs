//! # Salt netapi Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP transports and connection factories (reqwest, blocking)
//! - The `SaltClient` facade with its worker pool
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `salt-netapi-core`
//! - Depends on `salt-netapi-domain` and `salt-netapi-core`
//! - Contains all "impure" code (sockets, threads, environment, files)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{PendingCall, SaltClient, SaltClientBuilder, WorkerPool};
pub use http::{PooledConnectionFactory, SimpleConnectionFactory};
pub use salt_netapi_core::RunRequest;
