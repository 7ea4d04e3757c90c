//! Conversion of raw feed records into canonical products.
//!
//! Pure and total: no I/O, no failure path. A maximally sparse record still
//! yields a product; anything unusable simply normalizes to absent.

use indexmap::IndexSet;
use url::Url;

use crate::domain::product::Product;
use crate::domain::raw::RawProductRecord;
use crate::domain::types::ProductId;

/// The fourth image slot accepts the canonical key or the misspelling the
/// upstream sheet has carried since launch. The typo is part of the feed
/// contract and must be tolerated permanently, not cleaned up.
const FOURTH_IMAGE_KEYS: [&str; 2] = ["fourth_image_url", "foutrh_image_url"];

/// Builds the canonical product view of a raw record.
pub fn normalize(raw: &RawProductRecord) -> Product {
    Product {
        id: ProductId::from_raw(raw.get("id")),
        name: raw.text("name"),
        images: collect_images(raw),
        platform: raw.text("platform"),
        category: raw.text("category"),
        tags: raw.text("tags"),
        description: raw.text("description"),
        buy_price: raw.number("buy_price"),
        original_price: raw.number("original_price"),
        affiliate_url: raw.text("affiliate_url").and_then(|u| sanitize_url(&u)),
    }
}

/// Trims and re-serializes a candidate URL through [`Url`], which
/// percent-encodes and normalizes it. Empty or unparseable input is "no
/// image" — never an error.
pub fn sanitize_url(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return None;
    }
    Url::parse(trimmed).ok().map(|url| url.to_string())
}

/// Gathers the four image slots in precedence order, sanitized and
/// deduplicated with first-seen order preserved.
fn collect_images(raw: &RawProductRecord) -> Vec<String> {
    let candidates = [
        raw.text("first_image_url"),
        raw.text("second_image_url"),
        raw.text("third_image_url"),
        raw.text_any(&FOURTH_IMAGE_KEYS),
    ];

    let unique: IndexSet<String> = candidates
        .into_iter()
        .flatten()
        .filter_map(|candidate| sanitize_url(&candidate))
        .collect();
    unique.into_iter().collect()
}
