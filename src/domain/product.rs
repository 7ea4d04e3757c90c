use serde::{Deserialize, Serialize};

use crate::domain::types::ProductId;

/// Canonical product assembled from a raw feed record.
///
/// Every field except `id` is best-effort: the normalizer never fails, so a
/// sparse record simply yields a sparse product. Once built, a product is
/// immutable for the duration of a render cycle — the feed is the sole
/// source of truth and there is no local mutation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: Option<String>,
    /// Up to four sanitized image URLs, deduplicated, slot order preserved.
    pub images: Vec<String>,
    pub platform: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub description: Option<String>,
    /// Current purchase price in whole display units.
    pub buy_price: Option<f64>,
    /// Pre-discount price in whole display units.
    pub original_price: Option<f64>,
    pub affiliate_url: Option<String>,
}

impl Product {
    /// Discount percentage, present only when a discount genuinely exists:
    /// both prices finite and strictly positive, original above buy.
    pub fn discount_percent(&self) -> Option<u8> {
        match (self.buy_price, self.original_price) {
            (Some(buy), Some(original))
                if buy.is_finite()
                    && original.is_finite()
                    && buy > 0.0
                    && original > 0.0
                    && original > buy =>
            {
                Some(((original - buy) / original * 100.0).round() as u8)
            }
            _ => None,
        }
    }

    /// Category normalized for case-insensitive comparison; empty when the
    /// product has none.
    pub fn category_key(&self) -> String {
        self.category
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }
}

/// One page of the upstream feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsPage {
    pub count: u64,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub items: Vec<Product>,
}

impl ProductsPage {
    /// The defensive value used when the feed payload is malformed: listing
    /// degrades to an empty page instead of failing.
    pub fn empty() -> Self {
        Self {
            count: 0,
            total: 0,
            page: 1,
            limit: 0,
            items: Vec::new(),
        }
    }
}

impl Default for ProductsPage {
    fn default() -> Self {
        Self::empty()
    }
}
