//! Minion key management state reported by `/keys`

use serde::{Deserialize, Serialize};

/// Key ids grouped by acceptance state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    #[serde(default)]
    pub local: Vec<String>,
    /// Accepted minion keys.
    #[serde(default)]
    pub minions: Vec<String>,
    /// Keys waiting for acceptance.
    #[serde(default)]
    pub minions_pre: Vec<String>,
    #[serde(default)]
    pub minions_rejected: Vec<String>,
    #[serde(default)]
    pub minions_denied: Vec<String>,
}

impl Keys {
    pub fn is_accepted(&self, minion: &str) -> bool {
        self.minions.iter().any(|id| id == minion)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_groups_default_to_empty() {
        let keys: Keys = serde_json::from_value(json!({
            "local": ["master.pem", "master.pub"],
            "minions": ["web1"]
        }))
        .unwrap();

        assert_eq!(keys.local.len(), 2);
        assert!(keys.is_accepted("web1"));
        assert!(!keys.is_accepted("web2"));
        assert!(keys.minions_pre.is_empty());
        assert!(keys.minions_denied.is_empty());
    }
}
