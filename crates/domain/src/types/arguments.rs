//! Positional and keyword arguments of a Salt function call

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::constants::KWARG_MARKER;

/// Ordered positional values plus named values.
///
/// Used to build the `arg`/`kwarg` fields of outgoing lowstate chunks and to
/// represent the recorded arguments of a past job. Salt records keyword
/// arguments inline in the argument list as an object flagged with
/// `"__kwarg__": true`; (de)serialization follows that convention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    args: Vec<Value>,
    kwargs: BTreeMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional value.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.push_arg(value);
        self
    }

    /// Set a named value, replacing any previous value for `key`.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_kwarg(key, value);
        self
    }

    pub fn push_arg(&mut self, value: impl Into<Value>) {
        self.args.push(value.into());
    }

    pub fn insert_kwarg(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.kwargs.insert(key.into(), value.into());
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn kwargs(&self) -> &BTreeMap<String, Value> {
        &self.kwargs
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }
}

impl<V: Into<Value>> FromIterator<V> for Arguments {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self { args: iter.into_iter().map(Into::into).collect(), kwargs: BTreeMap::new() }
    }
}

impl Serialize for Arguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut items = self.args.clone();
        if !self.kwargs.is_empty() {
            let mut marked: Map<String, Value> =
                self.kwargs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            marked.insert(KWARG_MARKER.to_string(), Value::Bool(true));
            items.push(Value::Object(marked));
        }
        items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Arguments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let items = match raw {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => return Err(D::Error::custom(format!("expected argument list, got {other}"))),
        };

        let mut arguments = Self::default();
        for item in items {
            match item {
                Value::Object(mut map)
                    if map.get(KWARG_MARKER).and_then(Value::as_bool) == Some(true) =>
                {
                    map.remove(KWARG_MARKER);
                    arguments.kwargs.extend(map);
                }
                other => arguments.args.push(other),
            }
        }
        Ok(arguments)
    }
}
