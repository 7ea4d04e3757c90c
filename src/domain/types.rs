//! Value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that the
//! identifier and view-mode conventions are enforced in one place.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when parsing constrained domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    /// A value did not name a known view mode.
    #[error("unknown view mode: {0}")]
    UnknownViewMode(String),
}

/// Stable product identifier used as a routing and list key.
///
/// The feed delivers ids as JSON numbers or strings; both are carried in
/// their string form because the routing surface (`/product/{id}`) keys on
/// it. Construction trims but never fails: the normalizer is total, so a
/// maximally sparse record yields an empty id rather than an error.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates an identifier from its string form, trimming whitespace.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into().trim().to_string())
    }

    /// Reads an identifier out of a raw feed value (number or string).
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::new(s.as_str()),
            Some(Value::Number(n)) => Self(n.to_string()),
            _ => Self(String::new()),
        }
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the source record carried no usable identifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl PartialEq<&str> for ProductId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<ProductId> for &str {
    fn eq(&self, other: &ProductId) -> bool {
        *self == other.as_str()
    }
}

/// Display density for the products listing, persisted in the URL.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Dense grid of small cards.
    Small,
    /// Default grid of large cards.
    #[default]
    Large,
    /// Single-column rows.
    List,
}

impl ViewMode {
    /// String representation used in query parameters.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
            Self::List => "list",
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ViewMode {
    type Error = TypeParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "small" => Ok(Self::Small),
            "large" => Ok(Self::Large),
            "list" => Ok(Self::List),
            other => Err(TypeParseError::UnknownViewMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for ViewMode {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<ViewMode> for String {
    fn from(value: ViewMode) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trims_product_ids() {
        let id = ProductId::new("  42  ");
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn reads_numeric_and_string_raw_ids() {
        assert_eq!(ProductId::from_raw(Some(&json!(17))), "17");
        assert_eq!(ProductId::from_raw(Some(&json!("abc"))), "abc");
        assert!(ProductId::from_raw(None).is_empty());
        assert!(ProductId::from_raw(Some(&json!(null))).is_empty());
    }

    #[test]
    fn parses_view_modes() {
        assert_eq!(ViewMode::try_from("list").unwrap(), ViewMode::List);
        assert_eq!(ViewMode::try_from(" small ").unwrap(), ViewMode::Small);
        assert_eq!(
            ViewMode::try_from("rows").unwrap_err(),
            TypeParseError::UnknownViewMode("rows".to_string())
        );
    }

    #[test]
    fn default_view_mode_is_large() {
        assert_eq!(ViewMode::default(), ViewMode::Large);
    }
}
