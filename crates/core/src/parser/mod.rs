//! Response parsers
//!
//! One parser per response shape. Parsing is structural JSON mapping: no
//! semantic validation beyond type coercion, unknown fields are ignored.
//! Every parser is a pure function of the input bytes.

use std::collections::BTreeMap;
use std::fmt;

use salt_netapi_domain::{Job, JobResult, Keys, Result, SaltError, ScheduledJob, Stats, Token};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Return values keyed by minion id.
pub type Retvals = BTreeMap<String, Value>;

/// Standard `{"return": ...}` envelope wrapped around most responses.
#[derive(Debug, Deserialize)]
struct Return<T> {
    #[serde(rename = "return")]
    result: T,
}

/// `/jobs/{jid}` envelope: job metadata under `info`, per-minion returns
/// under `return`, both as parallel lists.
#[derive(Debug, Deserialize)]
struct JobInfo {
    info: Vec<JobInfoEntry>,
    #[serde(rename = "return", default)]
    returns: Vec<Retvals>,
}

/// One `info` entry: the job listing fields plus the recorded `Result`
/// object, keyed by minion id with each outcome under `return`.
#[derive(Debug, Deserialize)]
struct JobInfoEntry {
    #[serde(flatten)]
    job: Job,
    #[serde(rename = "Result", default)]
    result: BTreeMap<String, Value>,
}

/// Turns a raw response body into a typed value.
pub struct ResponseParser<T> {
    name: &'static str,
    parse: fn(&str) -> Result<T>,
}

impl<T> ResponseParser<T> {
    pub const fn new(name: &'static str, parse: fn(&str) -> Result<T>) -> Self {
        Self { name, parse }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parse(&self, body: &str) -> Result<T> {
        (self.parse)(body)
            .map_err(|err| match err {
                SaltError::Parse(detail) => {
                    SaltError::Parse(format!("{} response: {}", self.name, detail))
                }
                other => other,
            })
    }
}

impl<T> Clone for ResponseParser<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResponseParser<T> {}

impl<T> fmt::Debug for ResponseParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResponseParser").field(&self.name).finish()
    }
}

fn bare<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

fn wrapped<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Return<T> = serde_json::from_str(body)?;
    Ok(envelope.result)
}

fn job_results(body: &str) -> Result<Vec<JobResult>> {
    let envelope: JobInfo = serde_json::from_str(body)?;
    let mut returns = envelope.returns.into_iter();
    Ok(envelope
        .info
        .into_iter()
        .map(|entry| {
            let fallback = returns.next().unwrap_or_default();
            let results = if entry.result.is_empty() { fallback } else { minion_returns(entry.result) };
            JobResult::new(entry.job, results)
        })
        .collect())
}

/// Strips the `{"return": ...}` wrapper Salt records around each outcome.
fn minion_returns(result: BTreeMap<String, Value>) -> Retvals {
    result
        .into_iter()
        .map(|(minion, outcome)| {
            let value = match outcome {
                Value::Object(mut fields) if fields.contains_key("return") => {
                    fields.remove("return").unwrap_or_default()
                }
                other => other,
            };
            (minion, value)
        })
        .collect()
}

/// `/login`: list of tokens.
pub const TOKEN: ResponseParser<Vec<Token>> = ResponseParser::new("token", wrapped);

/// `/minions` (POST): list of dispatched jobs.
pub const JOB_MINIONS: ResponseParser<Vec<ScheduledJob>> =
    ResponseParser::new("job_minions", wrapped);

/// `/run` and `/jobs/{jid}`: list of minion → return value maps.
pub const RETVALS: ResponseParser<Vec<Retvals>> = ResponseParser::new("retvals", wrapped);

/// `/jobs`: list of jid → job maps.
pub const JOBS: ResponseParser<Vec<BTreeMap<String, Job>>> = ResponseParser::new("jobs", wrapped);

/// `/jobs/{jid}`: job metadata paired with its returns.
pub const JOB_RESULT: ResponseParser<Vec<JobResult>> =
    ResponseParser::new("job_result", job_results);

/// `/keys`: key groups.
pub const KEYS: ResponseParser<Keys> = ResponseParser::new("keys", wrapped);

/// `/stats`: bare statistics object.
pub const STATS: ResponseParser<Stats> = ResponseParser::new("stats", bare);

/// `/logout` and other endpoints answering with a message.
pub const STRING: ResponseParser<String> = ResponseParser::new("string", wrapped);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn token_list() {
        let tokens = TOKEN
            .parse(
                r#"{"return": [{"perms": [".*"], "start": 1.5, "token": "t", "expire": 2.5,
                    "user": "u", "eauth": "pam"}]}"#,
            )
            .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token, "t");
        assert_eq!(tokens[0].eauth, "pam");
    }

    #[test]
    fn retvals_keep_arbitrary_values() {
        let retvals = RETVALS
            .parse(r#"{"return": [{"minion-1": true, "minion-2": {"pkg": "1.0"}}]}"#)
            .unwrap();
        assert_eq!(retvals[0]["minion-1"], json!(true));
        assert_eq!(retvals[0]["minion-2"]["pkg"], json!("1.0"));
    }

    #[test]
    fn jobs_listing() {
        let jobs = JOBS
            .parse(
                r#"{"return": [{"20150304200110485012": {
                    "Function": "test.echo", "StartTime": "2015, Mar 04 20:01:10.485012",
                    "Arguments": ["enable-autodestruction"], "Target": "*",
                    "Target-type": "glob", "User": "johnny"}}]}"#,
            )
            .unwrap();
        let job = &jobs[0]["20150304200110485012"];
        assert_eq!(job.function, "test.echo");
        assert_eq!(job.arguments.args(), &[json!("enable-autodestruction")]);
    }

    #[test]
    fn job_result_pairs_info_with_returns() {
        let results = JOB_RESULT
            .parse(
                r#"{"info": [{"Function": "test.ping", "Target": "*", "Target-type": "glob",
                    "User": "johnny", "Result": {"blackbox": {"return": true}}}],
                    "return": [{"blackbox": true}]}"#,
            )
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job.user, "johnny");
        assert_eq!(results[0].results["blackbox"], json!(true));
    }

    #[test]
    fn job_result_reads_recorded_result_without_return_list() {
        let results = JOB_RESULT
            .parse(
                r#"{"info": [{"Function": "test.ping", "Target": "*", "Target-type": "glob",
                    "User": "johnny", "Result": {"blackbox": {"return": true},
                    "whitebox": {"return": {"pkg": "1.0"}}}}]}"#,
            )
            .unwrap();
        assert_eq!(results[0].job.function, "test.ping");
        assert_eq!(results[0].result_for("blackbox"), Some(&json!(true)));
        assert_eq!(results[0].result_for("whitebox"), Some(&json!({"pkg": "1.0"})));
    }

    #[test]
    fn job_result_prefers_recorded_result_over_return_list() {
        let results = JOB_RESULT
            .parse(
                r#"{"info": [{"Function": "test.ping", "Target": "*", "Target-type": "glob",
                    "Result": {"blackbox": {"return": false}}}],
                    "return": [{"blackbox": true, "stale": true}]}"#,
            )
            .unwrap();
        assert_eq!(results[0].results, Retvals::from([("blackbox".to_string(), json!(false))]));
    }

    #[test]
    fn recorded_outcome_without_return_field_is_kept_whole() {
        let returns = minion_returns(BTreeMap::from([("m".to_string(), json!({"retcode": 1}))]));
        assert_eq!(returns["m"], json!({"retcode": 1}));
    }

    #[test]
    fn job_result_without_returns_has_empty_results() {
        let results = JOB_RESULT
            .parse(r#"{"info": [{"Function": "test.ping", "Target": "*", "Target-type": "glob"}]}"#)
            .unwrap();
        assert!(results[0].results.is_empty());
    }

    #[test]
    fn keys_and_stats() {
        let keys = KEYS.parse(r#"{"return": {"minions": ["a"], "minions_pre": ["b"]}}"#).unwrap();
        assert_eq!(keys.minions_pre, vec!["b".to_string()]);

        let stats = STATS.parse(r#"{"CherryPy Applications": {"Enabled": true}}"#).unwrap();
        assert_eq!(stats.applications["Enabled"], json!(true));
    }

    #[test]
    fn parser_is_pure() {
        let body = r#"{"CherryPy Applications": {"Uptime": 3.0}, "Server": {"Threads": 10}}"#;
        assert_eq!(STATS.parse(body).unwrap(), STATS.parse(body).unwrap());
    }

    #[test]
    fn malformed_json_names_the_parser() {
        let err = KEYS.parse("{").unwrap_err();
        match err {
            SaltError::Parse(msg) => assert!(msg.starts_with("keys response")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn schema_mismatch_is_a_parse_error() {
        assert!(matches!(TOKEN.parse(r#"{"return": "nope"}"#), Err(SaltError::Parse(_))));
        assert!(matches!(STRING.parse(r#"{"message": "x"}"#), Err(SaltError::Parse(_))));
    }
}
