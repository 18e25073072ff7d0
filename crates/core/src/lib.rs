//! # Salt netapi Core
//!
//! Pure client logic - no HTTP stack dependencies.
//!
//! This crate contains:
//! - Port interfaces for connections and connection factories (traits)
//! - Response parsers, one per response shape
//! - Lowstate request payload builders
//!
//! ## Architecture Principles
//! - Only depends on `salt-netapi-domain`
//! - No sockets, no HTTP client
//! - Transports are injected via [`ConnectionFactory`]

pub mod connection;
pub mod lowstate;
pub mod parser;

pub use connection::ports::{Connection, ConnectionFactory, HttpMethod, RequestContext, Transport};
pub use lowstate::{unwrap_single, RunRequest};
pub use parser::ResponseParser;
