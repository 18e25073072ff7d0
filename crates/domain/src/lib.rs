//! # Salt netapi Domain
//!
//! Data types and models for the Salt REST API client.
//!
//! This crate contains:
//! - Response datatypes (Token, ScheduledJob, Job, JobResult, Keys, Stats)
//! - Request building blocks (Arguments, AuthModule, ClientKind)
//! - The client error type and Result definition
//! - Client configuration structures
//!
//! ## Architecture
//! - No dependencies on other salt-netapi crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
