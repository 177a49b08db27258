//! Loader configuration
//!
//! `LoaderConfig` is supplied once when a loader is built and never changes
//! afterwards. It can be assembled in code through [`LoaderConfig::builder`]
//! or read from a YAML/JSON file.

use crate::error::{Error, Result};
use crate::types::{JsonObject, Region, ResolveLinks, Version};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default pagination safety ceiling
pub const DEFAULT_MAX_PAGES: u32 = 1000;

// ============================================================================
// Loader Config
// ============================================================================

/// Configuration of a story loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoaderConfig {
    /// Storyblok API token (public or preview)
    #[serde(default, alias = "access_token")]
    pub access_token: String,

    /// Content version to read
    #[serde(default)]
    pub version: Version,

    /// Region of the space
    #[serde(default)]
    pub region: Region,

    /// Language/locale code (e.g. "en", "de")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Only return stories of this content type
    #[serde(
        default,
        alias = "content_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,

    /// Sort expression, `field[:asc|desc]`
    #[serde(default, alias = "sort_by", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// Field filters, forwarded to the API unchanged
    #[serde(
        default,
        alias = "filter_query",
        skip_serializing_if = "Option::is_none"
    )]
    pub filter_query: Option<JsonObject>,

    /// Relation paths to resolve inline
    #[serde(
        default,
        alias = "resolve_relations",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolve_relations: Option<Vec<String>>,

    /// Link resolution mode
    #[serde(
        default,
        alias = "resolve_links",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolve_links: Option<ResolveLinks>,

    /// Overrides the region's API base URL
    #[serde(default, alias = "base_url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Pagination safety ceiling (0 = unbounded)
    ///
    /// A full page numbered `max_pages` fails the run without requesting the
    /// next page, so a space holding `max_pages * 100` stories or more loads
    /// nothing. Raise the ceiling for spaces that large.
    #[serde(default = "default_max_pages", alias = "max_pages")]
    pub max_pages: u32,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            version: Version::default(),
            region: Region::default(),
            language: None,
            content_type: None,
            sort_by: None,
            filter_query: None,
            resolve_relations: None,
            resolve_links: None,
            base_url: None,
            max_pages: DEFAULT_MAX_PAGES,
            http: HttpSettings::default(),
        }
    }
}

impl LoaderConfig {
    /// Create a config with the given token and defaults for everything else
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    /// Create a new config builder
    pub fn builder(access_token: impl Into<String>) -> LoaderConfigBuilder {
        LoaderConfigBuilder {
            config: Self::new(access_token),
        }
    }

    /// API base URL, honoring the override before the region
    pub fn api_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.region.base_url())
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a config from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a config file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }
}

/// Builder for [`LoaderConfig`]
#[derive(Debug, Clone)]
pub struct LoaderConfigBuilder {
    config: LoaderConfig,
}

impl LoaderConfigBuilder {
    /// Set the content version
    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.config.version = version;
        self
    }

    /// Set the region
    #[must_use]
    pub fn region(mut self, region: Region) -> Self {
        self.config.region = region;
        self
    }

    /// Set the language
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = Some(language.into());
        self
    }

    /// Set the content type filter
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.config.content_type = Some(content_type.into());
        self
    }

    /// Set the sort expression
    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.config.sort_by = Some(sort_by.into());
        self
    }

    /// Set the field filters
    #[must_use]
    pub fn filter_query(mut self, filter_query: JsonObject) -> Self {
        self.config.filter_query = Some(filter_query);
        self
    }

    /// Add a relation path to resolve
    #[must_use]
    pub fn resolve_relation(mut self, relation: impl Into<String>) -> Self {
        self.config
            .resolve_relations
            .get_or_insert_with(Vec::new)
            .push(relation.into());
        self
    }

    /// Set the link resolution mode
    #[must_use]
    pub fn resolve_links(mut self, mode: ResolveLinks) -> Self {
        self.config.resolve_links = Some(mode);
        self
    }

    /// Override the API base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the pagination safety ceiling (0 = unbounded)
    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the HTTP settings
    #[must_use]
    pub fn http(mut self, http: HttpSettings) -> Self {
        self.config.http = http;
        self
    }

    /// Build the config
    pub fn build(self) -> LoaderConfig {
        self.config
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// Transport settings for the CDN client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs", alias = "timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on rate limiting, server errors and timeouts
    #[serde(default = "default_max_retries", alias = "max_retries")]
    pub max_retries: u32,

    /// Client-side rate limit (0 = disabled)
    #[serde(default = "default_requests_per_second", alias = "requests_per_second")]
    pub requests_per_second: u32,

    /// Upper bound in seconds for any wait between retries, including a
    /// server-sent `Retry-After`
    #[serde(default = "default_max_backoff_secs", alias = "max_backoff_secs")]
    pub max_backoff_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_max_backoff_secs() -> u64 {
    2
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            requests_per_second: default_requests_per_second(),
            max_backoff_secs: default_max_backoff_secs(),
        }
    }
}
