//! Closed value set for declaration extras.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A value attached to a declaration under an extra key.
///
/// The set is deliberately closed: text, numbers, lists of text, and nested
/// maps. Anything richer from a source document is flattened into these
/// shapes by [`ExtraValue::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
    Map(IndexMap<String, ExtraValue>),
}

impl ExtraValue {
    /// Convert arbitrary JSON into the closed value set.
    ///
    /// Nulls vanish ( `None` ), booleans and non-string list items become
    /// their text rendering, and object entries that map to null are
    /// dropped.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            Value::Object(map) => {
                let mut entries = IndexMap::new();
                for (key, item) in map {
                    if let Some(converted) = Self::from_json(item) {
                        entries.insert(key.clone(), converted);
                    }
                }
                Some(Self::Map(entries))
            }
        }
    }

    /// Shorthand for a text value
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Shorthand for a list of text values
    #[must_use]
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for ExtraValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<String>> for ExtraValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}
