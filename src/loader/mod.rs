//! Story loader
//!
//! The loader is built once from a [`LoaderConfig`] and can then be run any
//! number of times. Every run builds its own fetcher, walks the stories
//! listing page by page and maps each story into a [`Story`].
//!
//! # Overview
//!
//! - [`StoryLoader::load`] never fails: any error is reported once through
//!   the error sink and the run returns an empty list.
//! - [`StoryLoader::try_load`] returns the error instead, for callers that
//!   need to tell "no content" apart from "fetch failed".
//! - Partial results are never returned.

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::fetch::{CdnFetcher, PageFetcher};
use crate::pagination::{NextPage, PagePaginator, PER_PAGE};
use crate::query::StoriesQuery;
use crate::story::{RawStory, Story};
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Prefix of the line reported when a run fails
pub const ERROR_PREFIX: &str = "Error fetching Storyblok content:";

/// Receives the failure line of a run
pub type ErrorSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Builds a fresh fetcher for each run
pub type FetcherFactory =
    Arc<dyn Fn(&LoaderConfig) -> Result<Box<dyn PageFetcher>> + Send + Sync>;

/// Create a loader for the given configuration
///
/// Nothing is validated or fetched here; an unusable token shows up as an
/// authentication failure when the loader runs.
pub fn storyblok_loader(config: LoaderConfig) -> StoryLoader {
    StoryLoader::new(config)
}

/// Reusable, stateless story loader
#[derive(Clone)]
pub struct StoryLoader {
    config: Arc<LoaderConfig>,
    fetchers: FetcherFactory,
    sink: ErrorSink,
}

impl StoryLoader {
    /// Create a loader reading from the CDN API and logging through `tracing`
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config: Arc::new(config),
            fetchers: Arc::new(cdn_fetcher),
            sink: Arc::new(log_error),
        }
    }

    /// Replace the fetcher factory
    #[must_use]
    pub fn with_fetcher_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&LoaderConfig) -> Result<Box<dyn PageFetcher>> + Send + Sync + 'static,
    {
        self.fetchers = Arc::new(factory);
        self
    }

    /// Replace the error sink
    #[must_use]
    pub fn with_error_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.sink = Arc::new(sink);
        self
    }

    /// The loader's configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Fetch and normalize every story, or report why that failed
    pub async fn try_load(&self) -> Result<Vec<Story>> {
        let fetcher = (self.fetchers)(&self.config)?;
        let stories = fetch_all(fetcher.as_ref(), &self.config).await?;
        Ok(stories.into_iter().map(Story::from).collect())
    }

    /// Fetch and normalize every story; any failure yields an empty list
    pub async fn load(&self) -> Vec<Story> {
        match self.try_load().await {
            Ok(stories) => stories,
            Err(e) => {
                (self.sink)(&format!("{ERROR_PREFIX} {e}"));
                Vec::new()
            }
        }
    }

    /// Turn the loader into a zero-argument operation
    pub fn into_operation(
        self,
    ) -> impl Fn() -> BoxFuture<'static, Vec<Story>> + Clone + Send + Sync {
        move || {
            let loader = self.clone();
            async move { loader.load().await }.boxed()
        }
    }
}

fn cdn_fetcher(config: &LoaderConfig) -> Result<Box<dyn PageFetcher>> {
    Ok(Box::new(CdnFetcher::from_config(config)?))
}

fn log_error(line: &str) {
    error!("{line}");
}

impl fmt::Debug for StoryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoryLoader")
            .field("version", &self.config.version)
            .field("region", &self.config.region)
            .field("content_type", &self.config.content_type)
            .finish_non_exhaustive()
    }
}

/// Walk the listing until an empty or short page and collect every story
///
/// Pages are requested strictly one after another; the first failing page
/// aborts the walk and the stories gathered so far are dropped.
pub async fn fetch_all(
    fetcher: &dyn PageFetcher,
    config: &LoaderConfig,
) -> Result<Vec<RawStory>> {
    let paginator = PagePaginator::new(PER_PAGE).with_max_pages(config.max_pages);
    let mut state = paginator.start();
    let mut stories = Vec::new();

    loop {
        let query = StoriesQuery::for_page(config, state.page, paginator.page_size);
        let page = fetcher.fetch_page(&query).await?;
        let count = page.stories.len();
        debug!(page = state.page, count, "Fetched stories page");
        stories.extend(page.stories);

        match paginator.process_page(count, &mut state)? {
            NextPage::Continue { .. } => {}
            NextPage::Done(reason) => {
                debug!(?reason, "Pagination finished");
                break;
            }
        }
    }

    info!(
        "Loaded {} stories in {} pages",
        stories.len(),
        state.pages_fetched
    );
    Ok(stories)
}
