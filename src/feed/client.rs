//! `reqwest`-backed implementation of [`ProductSource`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use url::Url;

use crate::domain::product::{Product, ProductsPage};
use crate::domain::types::ProductId;
use crate::feed::envelope::{self, Envelope};
use crate::feed::{
    Cancellation, DEFAULT_TIMEOUT, FeedError, FeedQuery, FeedResult, ProductSource, excerpt,
};
use crate::models::config::StorefrontConfig;

/// HTTP client for the remote product feed.
///
/// Stateless per invocation: each call builds one GET request against the
/// configured endpoint, bounded by the client-wide timeout and raced against
/// the caller's cancellation token. The underlying `reqwest::Client` pools
/// connections and is cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    endpoint: Url,
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpFeedClient {
    /// Creates a client for the given endpoint URL.
    ///
    /// Fails fast with [`FeedError::Configuration`] when the endpoint is
    /// empty or unparseable — a deployment problem, not a per-request one.
    pub fn new(endpoint: &str) -> FeedResult<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Same as [`Self::new`] with an explicit request timeout.
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> FeedResult<Self> {
        let trimmed = endpoint.trim();
        if trimmed.is_empty() {
            return Err(FeedError::Configuration(
                "set SHOPFRONT_PRODUCTS_URL to the feed endpoint".to_string(),
            ));
        }
        let endpoint = Url::parse(trimmed)
            .map_err(|e| FeedError::Configuration(format!("invalid feed endpoint: {e}")))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("shopfront/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint,
            http,
            timeout,
        })
    }

    /// Builds a client from loaded configuration.
    pub fn from_config(config: &StorefrontConfig) -> FeedResult<Self> {
        Self::with_timeout(
            &config.products_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Issues one GET against the endpoint and decodes the envelope.
    ///
    /// The whole request/decode is raced against the cancellation token so a
    /// torn-down view neither waits on nor observes the response.
    async fn fetch_envelope(
        &self,
        params: &[(&str, String)],
        cancel: &Cancellation,
    ) -> FeedResult<Envelope> {
        if cancel.is_cancelled() {
            return Err(FeedError::Cancelled);
        }

        let mut url = self.endpoint.clone();
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }

        let request = async {
            log::debug!("GET {url}");
            let response = self
                .http
                .get(url.clone())
                .header(ACCEPT, "application/json")
                .header(CACHE_CONTROL, "no-store")
                .send()
                .await
                .map_err(|e| self.map_send_error(e))?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let body = response
                .text()
                .await
                .map_err(|e| self.map_send_error(e))?;

            if !status.is_success() {
                return Err(FeedError::Transport {
                    status: Some(status.as_u16()),
                    detail: format!(
                        "HTTP {} {}\n{}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("unknown"),
                        excerpt(&body)
                    ),
                });
            }
            if !content_type.contains("application/json") {
                return Err(FeedError::Transport {
                    status: Some(status.as_u16()),
                    detail: format!("expected JSON, got {content_type}\n{}", excerpt(&body)),
                });
            }

            let payload = serde_json::from_str(&body).map_err(|e| FeedError::Transport {
                status: Some(status.as_u16()),
                detail: format!("undecodable JSON payload ({e})\n{}", excerpt(&body)),
            })?;
            Ok(Envelope::from_value(payload))
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(FeedError::Cancelled),
            outcome = request => outcome,
        }
    }

    fn map_send_error(&self, error: reqwest::Error) -> FeedError {
        if error.is_timeout() {
            return FeedError::Timeout(self.timeout);
        }
        FeedError::Transport {
            status: error.status().map(|s| s.as_u16()),
            detail: error.to_string(),
        }
    }
}

#[async_trait]
impl ProductSource for HttpFeedClient {
    async fn list_products(
        &self,
        query: FeedQuery,
        cancel: &Cancellation,
    ) -> FeedResult<ProductsPage> {
        let mut params = Vec::new();
        if let Some(search) = query.search.as_deref().filter(|q| !q.is_empty()) {
            params.push(("q", search.to_string()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        let data = self.fetch_envelope(&params, cancel).await?.into_data()?;
        Ok(envelope::decode_list(data))
    }

    async fn get_product_by_id(
        &self,
        id: &ProductId,
        cancel: &Cancellation,
    ) -> FeedResult<Option<Product>> {
        let params = [("id", id.to_string())];
        let data = self.fetch_envelope(&params, cancel).await?.into_data()?;
        Ok(envelope::decode_item(data))
    }
}
