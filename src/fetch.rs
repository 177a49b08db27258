//! Page fetching
//!
//! [`PageFetcher`] is the one capability the loader needs from the outside
//! world: turn a [`StoriesQuery`] into a [`StoriesPage`]. [`CdnFetcher`]
//! implements it against the Storyblok CDN API.

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::query::StoriesQuery;
use crate::story::StoriesPage;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Path of the stories listing endpoint, relative to the API base
pub const STORIES_PATH: &str = "cdn/stories";

/// Fetches one page of the stories listing
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page described by `query`
    async fn fetch_page(&self, query: &StoriesQuery) -> Result<StoriesPage>;
}

/// Fetcher backed by the CDN API
#[derive(Debug)]
pub struct CdnFetcher {
    client: HttpClient,
}

impl CdnFetcher {
    /// Build a fetcher with its own HTTP client from the loader config
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        let http = HttpClientConfig::builder()
            .base_url(config.api_base_url())
            .token(config.access_token.as_str())
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .max_retries(config.http.max_retries)
            .max_backoff(Duration::from_secs(config.http.max_backoff_secs))
            .rate_limit(config.http.requests_per_second)
            .build();

        let client = HttpClient::with_config(http)?;
        debug!(
            base_url = client.config().base_url.as_deref(),
            rate_limit = ?client.rate_limit(),
            "Built CDN client"
        );
        Ok(Self::new(client))
    }

    /// Wrap an existing HTTP client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for CdnFetcher {
    async fn fetch_page(&self, query: &StoriesQuery) -> Result<StoriesPage> {
        debug!(page = ?query.page(), "Requesting {STORIES_PATH}");
        self.client
            .get_json(STORIES_PATH, &query.to_pairs())
            .await
    }
}
