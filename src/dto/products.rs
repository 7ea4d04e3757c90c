//! Flattened product projections and price formatting — the contract the
//! card, list, and detail components consume.

use serde::Serialize;

use crate::domain::product::Product;

/// Fixed currency glyph prefixed to every price label.
pub const CURRENCY: &str = "₹";

/// Placeholder rendered for an absent price. Never "0", never "NaN": a
/// missing price is not a free product.
pub const PRICE_PLACEHOLDER: &str = "—";

/// Name fallback for records that arrived without one.
pub const UNTITLED: &str = "Untitled";

/// Card thumbnails are capped at four images.
pub const CARD_IMAGE_LIMIT: usize = 4;

/// The detail gallery accepts up to eight images. The normalizer currently
/// produces at most four, so this is headroom, not a contract violation.
pub const DETAIL_IMAGE_LIMIT: usize = 8;

/// Formats a price with the currency glyph and en-IN digit grouping (last
/// three digits, then groups of two), rounded to whole units.
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| a.is_finite()) else {
        return PRICE_PLACEHOLDER.to_string();
    };
    format!("{CURRENCY} {}", group_digits(amount.round() as i64))
}

fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Projection rendered by the product card (grid and list rows).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCardDto {
    pub id: String,
    pub name: String,
    pub platform: Option<String>,
    pub category: Option<String>,
    /// At most [`CARD_IMAGE_LIMIT`] sanitized thumbnail URLs.
    pub thumbnails: Vec<String>,
    pub price_label: String,
    /// Strikethrough label, present only when a discount exists.
    pub original_price_label: Option<String>,
    pub discount_percent: Option<u8>,
    pub affiliate_url: Option<String>,
    /// Internal route to the detail page.
    pub detail_href: String,
}

impl From<&Product> for ProductCardDto {
    fn from(product: &Product) -> Self {
        let discount_percent = product.discount_percent();
        Self {
            id: product.id.to_string(),
            name: display_name(product),
            platform: product.platform.clone(),
            category: product.category.clone(),
            thumbnails: product
                .images
                .iter()
                .take(CARD_IMAGE_LIMIT)
                .cloned()
                .collect(),
            price_label: format_currency(product.buy_price),
            original_price_label: discount_percent
                .and(product.original_price)
                .map(|p| format_currency(Some(p))),
            discount_percent,
            affiliate_url: product.affiliate_url.clone(),
            detail_href: format!("/product/{}", product.id),
        }
    }
}

/// Projection rendered by the product detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetailDto {
    pub id: String,
    pub name: String,
    pub platform: Option<String>,
    pub category: Option<String>,
    /// At most [`DETAIL_IMAGE_LIMIT`] gallery URLs.
    pub images: Vec<String>,
    pub description: Option<String>,
    /// Comma-split, trimmed tag badges.
    pub tags: Vec<String>,
    pub price_label: String,
    pub original_price_label: Option<String>,
    pub discount_percent: Option<u8>,
    pub affiliate_url: Option<String>,
}

impl From<&Product> for ProductDetailDto {
    fn from(product: &Product) -> Self {
        let discount_percent = product.discount_percent();
        Self {
            id: product.id.to_string(),
            name: display_name(product),
            platform: product.platform.clone(),
            category: product.category.clone(),
            images: product
                .images
                .iter()
                .take(DETAIL_IMAGE_LIMIT)
                .cloned()
                .collect(),
            description: product.description.clone(),
            tags: split_tags(product.tags.as_deref()),
            price_label: format_currency(product.buy_price),
            original_price_label: discount_percent
                .and(product.original_price)
                .map(|p| format_currency(Some(p))),
            discount_percent,
            affiliate_url: product.affiliate_url.clone(),
        }
    }
}

fn display_name(product: &Product) -> String {
    product
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNTITLED)
        .to_string()
}

fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
