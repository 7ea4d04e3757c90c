//! The products-listing controller.
//!
//! One bulk fetch on mount, then everything — search, category filter,
//! pagination, category derivation — happens client-side over the held
//! page. Only an explicit [`CatalogController::load`] (mount or retry)
//! touches the network.

use indexmap::IndexMap;

use crate::domain::product::Product;
use crate::domain::types::ViewMode;
use crate::feed::{Cancellation, FeedQuery, ProductSource};
use crate::forms::catalog::CatalogSeed;

use super::{CATALOG_FETCH_LIMIT, ITEMS_PER_PAGE, Paginated};

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Filter parameters applied client-side to the fetched catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFilter {
    /// Free-text query, matched case-insensitively as a substring across
    /// name, description, platform, category, and tags.
    pub search: String,
    /// Lowercased category, or [`ALL_CATEGORIES`].
    pub category: String,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl CatalogFilter {
    /// Both predicates must hold: the category filter and, when a query is
    /// present, the any-field substring match.
    pub fn matches(&self, product: &Product) -> bool {
        let matches_category =
            self.category == ALL_CATEGORIES || product.category_key() == self.category;

        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return matches_category;
        }

        let matches_search = [
            product.name.as_deref(),
            product.description.as_deref(),
            product.platform.as_deref(),
            product.category.as_deref(),
            product.tags.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query));

        matches_category && matches_search
    }
}

/// Applies `filter` preserving upstream order.
pub fn filter_products<'a>(products: &'a [Product], filter: &CatalogFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// Distinct category labels across the fetched products: case-insensitively
/// deduplicated, first-seen casing and order.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen: IndexMap<String, String> = IndexMap::new();
    for product in products {
        let Some(label) = product.category.as_deref().map(str::trim) else {
            continue;
        };
        if label.is_empty() {
            continue;
        }
        seen.entry(label.to_lowercase())
            .or_insert_with(|| label.to_string());
    }
    seen.into_values().collect()
}

/// `max(1, ceil(filtered / page size))`.
pub fn total_pages(filtered_count: usize) -> usize {
    filtered_count.div_ceil(ITEMS_PER_PAGE).max(1)
}

/// Fetch lifecycle of the products listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogState {
    #[default]
    Idle,
    Loading,
    Ready {
        products: Vec<Product>,
    },
    Error {
        message: String,
    },
}

/// View state of the products listing page.
///
/// Holds the fetch lifecycle, the client-side filter, the current page, and
/// the URL-persisted view mode. Changing the filter never refetches; only
/// [`Self::load`] (mount or user retry) calls the feed.
#[derive(Debug)]
pub struct CatalogController {
    state: CatalogState,
    filter: CatalogFilter,
    page: usize,
    view_mode: ViewMode,
    fetch_limit: u64,
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogController {
    pub fn new() -> Self {
        Self {
            state: CatalogState::Idle,
            filter: CatalogFilter::default(),
            page: 1,
            view_mode: ViewMode::default(),
            fetch_limit: CATALOG_FETCH_LIMIT,
        }
    }

    /// Seeds filter and view mode from the routing surface.
    pub fn from_seed(seed: CatalogSeed) -> Self {
        let mut controller = Self::new();
        controller.set_category(&seed.category);
        controller.filter.search = seed.search;
        controller.view_mode = seed.view;
        controller.page = seed.page.max(1);
        controller
    }

    /// Overrides the bulk-fetch ceiling (deployment knob).
    pub fn with_fetch_limit(mut self, fetch_limit: u64) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == CatalogState::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            CatalogState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Fetches the catalog: `Loading`, then `Ready` with the page's items or
    /// `Error` with the feed's message. Serves both mount and retry.
    ///
    /// The commit is guarded by the cancellation token: a view torn down
    /// while the request was in flight keeps its previous state.
    pub async fn load<S>(&mut self, source: &S, cancel: &Cancellation)
    where
        S: ProductSource + ?Sized,
    {
        self.state = CatalogState::Loading;
        let outcome = source
            .list_products(FeedQuery::default().limit(self.fetch_limit), cancel)
            .await;
        if cancel.is_cancelled() {
            return;
        }
        self.state = match outcome {
            Ok(page) => CatalogState::Ready {
                products: page.items,
            },
            Err(err) => {
                log::error!("Failed to load products: {err}");
                CatalogState::Error {
                    message: err.to_string(),
                }
            }
        };
    }

    /// Updates the free-text query and resets to page 1. No refetch.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.page = 1;
    }

    /// Selects a category (case-insensitive) and resets to page 1. No
    /// refetch: filtering happens over the already-fetched page.
    pub fn set_category(&mut self, category: &str) {
        let normalized = category.trim().to_lowercase();
        self.filter.category = if normalized.is_empty() {
            ALL_CATEGORIES.to_string()
        } else {
            normalized
        };
        self.page = 1;
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Moves to `page`. Out-of-range values are not clamped here; callers
    /// clamp to `1..=total_pages()`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// All fetched products; empty unless `Ready`.
    pub fn products(&self) -> &[Product] {
        match &self.state {
            CatalogState::Ready { products } => products,
            _ => &[],
        }
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(self.products())
    }

    pub fn filtered(&self) -> Vec<&Product> {
        filter_products(self.products(), &self.filter)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len())
    }

    /// The current page slice of the filtered catalog.
    pub fn visible(&self) -> Paginated<&Product> {
        let filtered = self.filtered();
        let total_pages = total_pages(filtered.len());
        let start = self.page.saturating_sub(1).saturating_mul(ITEMS_PER_PAGE);
        let items = filtered
            .into_iter()
            .skip(start)
            .take(ITEMS_PER_PAGE)
            .collect();
        Paginated::new(items, self.page, total_pages)
    }

    /// Writes the filter and view mode back as query parameters, omitting
    /// the `all` sentinel.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.filter.category != ALL_CATEGORIES {
            pairs.push(("category", self.filter.category.clone()));
        }
        pairs.push(("view", self.view_mode.as_str().to_string()));
        pairs
    }
}
