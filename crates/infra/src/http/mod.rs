//! HTTP adapters for the connection ports

pub mod client;
pub mod factory;
pub mod transport;

pub use client::HttpClientBuilder;
pub use factory::{PooledConnectionFactory, SimpleConnectionFactory};
pub use transport::ReqwestTransport;
