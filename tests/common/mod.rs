//! Helpers for integration tests.

use serde_json::{Value, json};

/// Wraps `data` in the feed's success envelope.
pub fn success_envelope(data: Value) -> String {
    json!({
        "status": "success",
        "httpStatus": 200,
        "data": data,
    })
    .to_string()
}

/// The feed's error envelope.
pub fn error_envelope(http_status: u16, message: &str) -> String {
    json!({
        "status": "error",
        "httpStatus": http_status,
        "message": message,
    })
    .to_string()
}

/// A listing payload around `items`.
pub fn list_data(items: Vec<Value>) -> Value {
    json!({
        "count": items.len(),
        "total": items.len(),
        "page": 1,
        "limit": 200,
        "items": items,
    })
}

/// A representative raw feed record.
pub fn item(id: u64, name: &str, category: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": category,
        "platform": "Amazon",
        "first_image_url": format!("https://cdn.example.com/{id}-main.jpg"),
        // The upstream sheet has carried this misspelling since launch.
        "foutrh_image_url": format!("https://cdn.example.com/{id}-alt.jpg"),
        "buy_price": "1499",
        "original_price": 1999,
        "affiliate_url": format!("https://shop.example.com/deal/{id}"),
    })
}
