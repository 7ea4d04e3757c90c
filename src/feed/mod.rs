//! The product-feed boundary.
//!
//! Everything the storefront knows about products comes through one remote
//! JSON endpoint. This module owns that boundary: the [`ProductSource`]
//! trait the controllers are generic over, the typed [`FeedError`] taxonomy,
//! the cooperative [`Cancellation`] token, the response envelope decoding,
//! and the normalizer that turns raw records into canonical products. The
//! `reqwest`-backed client lives behind the `http` feature.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::{Product, ProductsPage};
use crate::domain::types::ProductId;

pub mod cancel;
#[cfg(feature = "http")]
pub mod client;
pub mod envelope;
pub mod normalize;

pub use cancel::Cancellation;
#[cfg(feature = "http")]
pub use client::HttpFeedClient;

/// Bound on every feed request; exceeding it is a distinct failure kind.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Longest diagnostic body excerpt carried inside an error message.
pub const ERROR_EXCERPT_LEN: usize = 400;

/// Failures surfaced by the product-feed boundary.
///
/// Shape degradation is deliberately absent: a success envelope whose
/// `items` is missing or not an array decodes to an empty page, and a
/// single-item lookup that finds nothing returns `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The feed endpoint is missing or unusable. Fatal at startup, never
    /// produced per-request.
    #[error("feed endpoint is not configured: {0}")]
    Configuration(String),
    /// The request exceeded its bound. Recoverable via user retry.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The owning view revoked its token while the request was in flight.
    #[error("request was cancelled")]
    Cancelled,
    /// Network failure, non-2xx status, non-JSON content type, or an
    /// undecodable body. `detail` carries the status line and a bounded body
    /// excerpt for diagnostics.
    #[error("{detail}")]
    Transport {
        status: Option<u16>,
        detail: String,
    },
    /// The feed answered with its error-tagged envelope.
    #[error("{http_status}: {message}")]
    Upstream { http_status: u16, message: String },
}

/// Convenient alias for results returned from the feed boundary.
pub type FeedResult<T> = Result<T, FeedError>;

/// Query parameters used when listing products from the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedQuery {
    /// Upstream free-text search string, sent as `q`.
    pub search: Option<String>,
    /// Upstream page number.
    pub page: Option<u64>,
    /// Upstream page size.
    pub limit: Option<u64>,
}

impl FeedQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read-only operations against the product feed.
///
/// Implementations are stateless per invocation and must honor the supplied
/// cancellation token: a cancelled call resolves to [`FeedError::Cancelled`]
/// instead of committing work.
#[async_trait]
pub trait ProductSource {
    /// List one page of products matching the supplied query parameters.
    async fn list_products(
        &self,
        query: FeedQuery,
        cancel: &Cancellation,
    ) -> FeedResult<ProductsPage>;

    /// Retrieve a product by its identifier. `Ok(None)` is the explicit
    /// not-found signal, distinct from every error.
    async fn get_product_by_id(
        &self,
        id: &ProductId,
        cancel: &Cancellation,
    ) -> FeedResult<Option<Product>>;
}

/// Bounds a response body to [`ERROR_EXCERPT_LEN`] characters for inclusion
/// in error messages.
pub(crate) fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    let mut out: String = trimmed.chars().take(ERROR_EXCERPT_LEN).collect();
    if trimmed.chars().count() > ERROR_EXCERPT_LEN {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_query_builder_chains() {
        let query = FeedQuery::default().search("cam").page(2).limit(200);
        assert_eq!(query.search.as_deref(), Some("cam"));
        assert_eq!(query.page, Some(2));
        assert_eq!(query.limit, Some(200));
    }

    #[test]
    fn excerpt_bounds_long_bodies() {
        let long = "x".repeat(1000);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), ERROR_EXCERPT_LEN + 1);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn excerpt_keeps_short_bodies_and_respects_char_boundaries() {
        assert_eq!(excerpt("  oops  "), "oops");
        let unicode = "é".repeat(ERROR_EXCERPT_LEN + 5);
        assert!(excerpt(&unicode).ends_with('…'));
    }

    #[test]
    fn timeout_and_transport_errors_are_distinct() {
        let timeout = FeedError::Timeout(DEFAULT_TIMEOUT);
        let transport = FeedError::Transport {
            status: Some(500),
            detail: "HTTP 500 Internal Server Error".to_string(),
        };
        assert!(matches!(timeout, FeedError::Timeout(_)));
        assert!(matches!(transport, FeedError::Transport { .. }));
        assert!(transport.to_string().contains("HTTP 500"));
    }
}
