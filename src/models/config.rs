use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::feed::DEFAULT_TIMEOUT;
use crate::services::CATALOG_FETCH_LIMIT;

/// Runtime configuration for the storefront, read from `SHOPFRONT_*`
/// environment variables after loading a `.env` file when one is present.
#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontConfig {
    /// Base URL of the product feed. Required: a missing endpoint is a
    /// startup-time configuration failure, not a per-request one.
    pub products_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bulk-fetch ceiling for the catalog mount.
    #[serde(default = "default_catalog_limit")]
    pub catalog_limit: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_catalog_limit() -> u64 {
    CATALOG_FETCH_LIMIT
}

impl StorefrontConfig {
    /// Loads configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Config::builder()
            .add_source(Environment::with_prefix("SHOPFRONT").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
