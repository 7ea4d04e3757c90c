//! The tagged response wrapper every feed endpoint uses.
//!
//! Payloads are walked as raw JSON values instead of deserialized into
//! closed structs: the upstream has a history of partial and misspelled
//! fields, so the only field trusted before branching is the `status` tag.

use serde_json::Value;

use crate::domain::product::{Product, ProductsPage};
use crate::domain::raw::RawProductRecord;
use crate::feed::normalize;
use crate::feed::{FeedError, FeedResult};

/// A decoded feed envelope, branched on its `status` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `{"status": "success", "httpStatus": ..., "data": ...}`
    Success { data: Option<Value> },
    /// `{"status": "error", "httpStatus": ..., "message": ...}`
    Error { http_status: u16, message: String },
}

impl Envelope {
    /// Branches on the `status` tag. Anything that is not explicitly tagged
    /// as an error is treated as a success wrapper and flows through the
    /// defensive shape handling downstream.
    pub fn from_value(payload: Value) -> Self {
        let is_error = payload
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|status| status == "error");
        if is_error {
            let http_status = payload
                .get("httpStatus")
                .and_then(Value::as_u64)
                .unwrap_or(0) as u16;
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("feed reported an error")
                .to_string();
            return Self::Error {
                http_status,
                message,
            };
        }
        Self::Success {
            data: match payload {
                Value::Object(mut fields) => fields.remove("data"),
                _ => None,
            },
        }
    }

    /// Unwraps the success payload, surfacing the error tag as
    /// [`FeedError::Upstream`].
    pub fn into_data(self) -> FeedResult<Option<Value>> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Error {
                http_status,
                message,
            } => Err(FeedError::Upstream {
                http_status,
                message,
            }),
        }
    }
}

/// Decodes a listing payload into a normalized page.
///
/// Feed malformation degrades gracefully here: a missing `data`, a missing
/// `items`, or an `items` that is not an array all yield the empty page
/// rather than an error.
pub fn decode_list(data: Option<Value>) -> ProductsPage {
    let Some(data) = data else {
        return ProductsPage::empty();
    };
    let Some(items) = data.get("items").and_then(Value::as_array) else {
        return ProductsPage::empty();
    };

    let items: Vec<_> = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(fields) => Some(RawProductRecord::new(fields.clone())),
            _ => None,
        })
        .map(|raw| normalize::normalize(&raw))
        .collect();

    let field = |key: &str, fallback: u64| data.get(key).and_then(Value::as_u64).unwrap_or(fallback);
    ProductsPage {
        count: field("count", items.len() as u64),
        total: field("total", items.len() as u64),
        page: field("page", 1),
        limit: field("limit", 0),
        items,
    }
}

/// Decodes a single-item payload. Absence (`null`, missing, or a non-object
/// `data`) is the explicit not-found signal — a fake product is never
/// synthesized.
pub fn decode_item(data: Option<Value>) -> Option<Product> {
    match data {
        Some(Value::Object(fields)) => Some(normalize::normalize(&RawProductRecord::new(fields))),
        _ => None,
    }
}
