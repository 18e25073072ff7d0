//! Jobs: dispatched commands and their recorded results

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::arguments::Arguments;
use crate::constants::JOB_START_TIME_FORMAT;

/// Job id plus the minions a freshly dispatched command was sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub jid: String,
    #[serde(default)]
    pub minions: Vec<String>,
}

/// Name kept for callers used to the `/minions` response terminology.
pub type JobMinions = ScheduledJob;

/// Target expression of a job: a glob/regex/compound string or a list of
/// minion ids for list targeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobTarget {
    Expression(String),
    List(Vec<String>),
}

impl JobTarget {
    /// The expression, if this is not a list target.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Expression(expr) => Some(expr),
            Self::List(_) => None,
        }
    }
}

/// Metadata of a previously run job, as reported by `/jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "Function")]
    pub function: String,
    #[serde(rename = "Target")]
    pub target: JobTarget,
    #[serde(rename = "Target-type")]
    pub target_type: String,
    #[serde(rename = "User", default)]
    pub user: String,
    #[serde(
        rename = "StartTime",
        default,
        with = "start_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveDateTime>,
    #[serde(rename = "Arguments", default)]
    pub arguments: Arguments,
}

/// A job's metadata together with the value each minion returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub job: Job,
    /// Return values keyed by minion id.
    pub results: BTreeMap<String, Value>,
}

impl JobResult {
    pub fn new(job: Job, results: BTreeMap<String, Value>) -> Self {
        Self { job, results }
    }

    pub fn result_for(&self, minion: &str) -> Option<&Value> {
        self.results.get(minion)
    }
}

mod start_time {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.collect_str(&time.format(JOB_START_TIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|text| {
            NaiveDateTime::parse_from_str(&text, JOB_START_TIME_FORMAT).map_err(|e| {
                serde::de::Error::custom(format!("invalid StartTime {text:?}: {e}"))
            })
        })
        .transpose()
    }
}
