//! Connections to the Salt API
//!
//! A connection is single-use: it is bound to one endpoint, one response
//! parser and one snapshot of the client configuration, and issues exactly
//! one request.

pub mod ports;

pub use ports::{Connection, ConnectionFactory, HttpMethod, RequestContext, Transport};
