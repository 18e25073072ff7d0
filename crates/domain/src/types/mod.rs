//! Datatypes exchanged with the Salt API

pub mod arguments;
pub mod auth;
pub mod job;
pub mod keys;
pub mod stats;
pub mod token;

pub use arguments::Arguments;
pub use auth::{AuthModule, ClientKind};
pub use job::{Job, JobMinions, JobResult, JobTarget, ScheduledJob};
pub use keys::Keys;
pub use stats::Stats;
pub use token::Token;
