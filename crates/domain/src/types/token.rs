//! Authentication token returned by `/login`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Session credential handed out by the API on login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    pub user: String,
    pub eauth: String,
    /// Permission expressions; plain strings or nested per-target objects.
    #[serde(default)]
    pub perms: Vec<Value>,
    #[serde(with = "epoch_seconds")]
    pub start: DateTime<Utc>,
    #[serde(with = "epoch_seconds")]
    pub expire: DateTime<Utc>,
}

impl Token {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expire
    }
}

/// Fractional Unix seconds, as emitted by the API.
mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        let secs = value.timestamp() as f64 + f64::from(value.timestamp_subsec_micros()) / 1e6;
        serializer.serialize_f64(secs)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() {
            return Err(D::Error::custom(format!("invalid timestamp: {secs}")));
        }
        let whole = secs.trunc();
        let nanos = ((secs - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64, nanos)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {secs}")))
    }
}
