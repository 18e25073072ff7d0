//! Server statistics reported by `/stats`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CherryPy statistics.
///
/// The layout is owned by the server and changes between releases, so only
/// the applications section is named; every other section is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "CherryPy Applications", default)]
    pub applications: Value,
    /// Remaining sections (HTTP server counters, ...) keyed by their title.
    #[serde(flatten)]
    pub sections: BTreeMap<String, Value>,
}

impl Stats {
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }
}
