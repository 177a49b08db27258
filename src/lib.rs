//! # Storyblok Loader
//!
//! Pulls every story of a Storyblok space from the CDN API and reshapes it
//! into a flat list of content records for a static-site build.
//!
//! ## Features
//!
//! - **Page-Number Pagination**: Walks `cdn/stories` 100 stories at a time
//! - **Query Mapping**: Content type, language, sorting, filters, relation and link resolution
//! - **Failure Containment**: `load()` never fails, `try_load()` tells you why it did
//! - **Pagination Ceiling**: A backend that never ends a listing cannot loop forever
//! - **Retrying Transport**: Backoff on 429/5xx and a client-side rate limit
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storyblok_loader::{storyblok_loader, LoaderConfig, ResolveLinks};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = LoaderConfig::builder(std::env::var("STORYBLOK_TOKEN").unwrap_or_default())
//!         .language("en")
//!         .content_type("blog")
//!         .sort_by("content.published_date:desc")
//!         .resolve_relation("author.posts")
//!         .resolve_links(ResolveLinks::Url)
//!         .build();
//!
//!     let loader = storyblok_loader(config);
//!
//!     // Can be run again on every rebuild
//!     let stories = loader.load().await;
//!     println!("{} stories", stories.len());
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! LoaderConfig ──► StoryLoader::load()
//!                      │
//!                      ▼
//!        ┌──────── fetch_all ─────────┐
//!        │ StoriesQuery ─► PageFetcher │──► HttpClient (retry, rate limit)
//!        │ PagePaginator ◄─ StoriesPage│
//!        └─────────────┬──────────────┘
//!                      ▼
//!           RawStory ─► Story (normalized)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Loader configuration
pub mod config;

/// Raw and normalized story records
pub mod story;

/// Listing query parameters
pub mod query;

/// Page-number pagination
pub mod pagination;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page fetcher trait and CDN implementation
pub mod fetch;

/// Story loader
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{HttpSettings, LoaderConfig, LoaderConfigBuilder};
pub use error::{Error, Result};
pub use fetch::{CdnFetcher, PageFetcher};
pub use loader::{fetch_all, storyblok_loader, StoryLoader};
pub use query::StoriesQuery;
pub use story::{RawStory, StoriesPage, Story, TranslatedSlug};
pub use types::{Region, ResolveLinks, Version};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
