//! API constants
//!
//! Endpoint paths, header names and media types used by the client.

// Endpoints
pub const LOGIN_ENDPOINT: &str = "/login";
pub const LOGOUT_ENDPOINT: &str = "/logout";
pub const MINIONS_ENDPOINT: &str = "/minions";
pub const JOBS_ENDPOINT: &str = "/jobs";
pub const RUN_ENDPOINT: &str = "/run";
pub const STATS_ENDPOINT: &str = "/stats";
pub const KEYS_ENDPOINT: &str = "/keys";

// Headers
pub const SESSION_TOKEN_HEADER: &str = "X-Auth-Token";
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Marker Salt puts on keyword-argument objects inside recorded job arguments.
pub const KWARG_MARKER: &str = "__kwarg__";

/// Format of the `StartTime` field in job listings, e.g.
/// `2015, Mar 04 19:28:17.363806`.
pub const JOB_START_TIME_FORMAT: &str = "%Y, %b %d %H:%M:%S%.f";
