//! Query-parameter seeds for the products listing.
//!
//! The crate does not own routing; it reads `category`, `view`, `q`, and
//! `page` off the URL as filter/view-mode seeds and writes them back on
//! change (see `CatalogController::query_pairs`).

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::ViewMode;
use crate::services::catalog::ALL_CATEGORIES;

/// Raw query parameters accepted by the products listing page.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CatalogQueryForm {
    pub category: Option<String>,
    pub view: Option<String>,
    pub q: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u64>,
}

/// Validated listing seed derived from [`CatalogQueryForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSeed {
    /// Lowercased category filter, [`ALL_CATEGORIES`] when absent.
    pub category: String,
    /// Display density; unknown values degrade to the default rather than
    /// failing, matching how the original URLs behaved.
    pub view: ViewMode,
    pub search: String,
    pub page: usize,
}

impl Default for CatalogSeed {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            view: ViewMode::default(),
            search: String::new(),
            page: 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogFormError {
    #[error("catalog query validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for CatalogFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<CatalogQueryForm> for CatalogSeed {
    type Error = CatalogFormError;

    fn try_from(value: CatalogQueryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let category = value
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| ALL_CATEGORIES.to_string());
        let view = value
            .view
            .as_deref()
            .and_then(|v| ViewMode::try_from(v).ok())
            .unwrap_or_default();
        let search = value.q.unwrap_or_default().trim().to_string();
        let page = value.page.unwrap_or(1) as usize;

        Ok(Self {
            category,
            view,
            search,
            page,
        })
    }
}
