//! The product-detail controller and the home-page featured slice.

use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::feed::{Cancellation, FeedError, FeedQuery, FeedResult, ProductSource};

use super::{CATALOG_FETCH_LIMIT, ServiceError, ServiceResult};

/// Cap on the related-products strip under a product detail.
pub const RELATED_LIMIT: usize = 4;

/// Number of products featured on the home page.
pub const FEATURED_LIMIT: usize = 4;

/// Fetch lifecycle of the product detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Idle,
    Loading,
    /// The product plus its related strip.
    Found {
        product: Product,
        related: Vec<Product>,
    },
    /// The feed explicitly signalled absence; rendered as a not-found panel,
    /// never as an error.
    NotFound,
    Error {
        message: String,
    },
}

/// View state of the product detail page.
#[derive(Debug, Default)]
pub struct DetailController {
    state: DetailState,
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Loads the product and its related strip.
    ///
    /// Same commit guard as the catalog controller: when the token was
    /// revoked mid-flight, the stale result is discarded.
    pub async fn load<S>(&mut self, source: &S, id: &ProductId, cancel: &Cancellation)
    where
        S: ProductSource + ?Sized,
    {
        self.state = DetailState::Loading;
        let outcome = load_product_detail(source, id, cancel).await;
        if cancel.is_cancelled() {
            return;
        }
        self.state = match outcome {
            Ok(Some((product, related))) => DetailState::Found { product, related },
            Ok(None) => DetailState::NotFound,
            Err(err) => {
                log::error!("Failed to load product {id}: {err}");
                DetailState::Error {
                    message: err.to_string(),
                }
            }
        };
    }
}

/// Fetches one product and derives its related strip from the bulk list.
///
/// A failure of the related fetch is non-fatal — the primary product still
/// renders, with an empty strip — except cancellation, which propagates.
pub async fn load_product_detail<S>(
    source: &S,
    id: &ProductId,
    cancel: &Cancellation,
) -> FeedResult<Option<(Product, Vec<Product>)>>
where
    S: ProductSource + ?Sized,
{
    let Some(product) = source.get_product_by_id(id, cancel).await? else {
        return Ok(None);
    };

    let related = match source
        .list_products(FeedQuery::default().limit(CATALOG_FETCH_LIMIT), cancel)
        .await
    {
        Ok(page) => related_products(&page.items, &product),
        Err(FeedError::Cancelled) => return Err(FeedError::Cancelled),
        Err(err) => {
            log::warn!("Failed to load related products for {id}: {err}");
            Vec::new()
        }
    };

    Ok(Some((product, related)))
}

/// Result-style wrapper for hosts that prefer [`ServiceError`] over detail
/// states: absence maps to `NotFound`, hard feed failures to `Feed`.
pub async fn get_product_detail<S>(
    source: &S,
    id: &ProductId,
    cancel: &Cancellation,
) -> ServiceResult<(Product, Vec<Product>)>
where
    S: ProductSource + ?Sized,
{
    match load_product_detail(source, id, cancel).await {
        Ok(Some(found)) => Ok(found),
        Ok(None) => Err(ServiceError::NotFound),
        Err(err) => Err(err.into()),
    }
}

/// Products sharing the current product's category (case-insensitive),
/// excluding the product itself, capped at [`RELATED_LIMIT`], upstream order
/// preserved. Products without a category relate to each other.
pub fn related_products(products: &[Product], current: &Product) -> Vec<Product> {
    let category = current.category_key();
    products
        .iter()
        .filter(|p| p.id != current.id && p.category_key() == category)
        .take(RELATED_LIMIT)
        .cloned()
        .collect()
}

/// Home-page slice: the first [`FEATURED_LIMIT`] products of the default
/// feed page. Failures propagate; the home page treats them as non-fatal.
pub async fn featured_products<S>(
    source: &S,
    cancel: &Cancellation,
) -> FeedResult<Vec<Product>>
where
    S: ProductSource + ?Sized,
{
    let page = source.list_products(FeedQuery::default(), cancel).await?;
    Ok(page.items.into_iter().take(FEATURED_LIMIT).collect())
}
