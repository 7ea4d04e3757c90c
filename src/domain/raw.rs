//! Untyped product records as delivered by the feed.
//!
//! The upstream sheet export is not a stable schema: fields come and go,
//! numbers arrive as strings, and arbitrary extra columns are permitted.
//! Known fields are therefore read through explicit accessors instead of
//! deserializing into a closed struct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw feed record: an open field-name → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProductRecord(Map<String, Value>);

impl RawProductRecord {
    /// Wraps an already-parsed JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Borrow the raw value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Reads a display string: strings are trimmed and empty ones dropped,
    /// numbers are stringified, everything else is absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Reads the first key of `keys` that yields a display string. Used for
    /// fields the upstream has historically delivered under more than one
    /// spelling.
    pub fn text_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// Permissive numeric coercion for price-like fields.
    ///
    /// Finite JSON numbers are kept; strings are trimmed and parsed, with
    /// the empty string treated as absent. Non-finite results never survive:
    /// absent must stay distinguishable from a legitimate zero price.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawProductRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
