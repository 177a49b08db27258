//! HTTP transport for the CDN API
//!
//! One GET path with retries. Rate-limit and server-error responses,
//! timeouts and refused connections are retried with exponential backoff.
//! Every wait between attempts, a server-sent `Retry-After` included, is
//! capped at `max_backoff` so a run always finishes in bounded time.

use super::rate_limit::RateLimiter;
use crate::error::{Error, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Query parameter carrying the access token
pub const TOKEN_PARAM: &str = "token";

/// Configuration for the HTTP client
#[derive(Clone)]
pub struct HttpClientConfig {
    /// Base URL that request paths are joined onto
    pub base_url: Option<String>,
    /// Access token appended to every request
    pub token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each further retry
    pub initial_backoff: Duration,
    /// Longest wait between two attempts
    pub max_backoff: Duration,
    /// Client-side rate limit, `None` when disabled
    pub requests_per_second: Option<NonZeroU32>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
            requests_per_second: NonZeroU32::new(10),
            user_agent: format!("storyblok-loader/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl fmt::Debug for HttpClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("initial_backoff", &self.initial_backoff)
            .field("max_backoff", &self.max_backoff)
            .field("requests_per_second", &self.requests_per_second)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the access token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Cap every wait between attempts
    pub fn max_backoff(mut self, max: Duration) -> Self {
        self.config.max_backoff = max;
        self
    }

    /// Limit requests per second; `0` disables the limit
    pub fn rate_limit(mut self, requests_per_second: u32) -> Self {
        self.config.requests_per_second = NonZeroU32::new(requests_per_second);
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with retry and rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client from its configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.requests_per_second.map(RateLimiter::per_second);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Requests per second allowed by the client-side limit, if any
    pub fn rate_limit(&self) -> Option<u32> {
        self.rate_limiter.as_ref().map(RateLimiter::rate)
    }

    /// GET `path` with `query` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = self.build_url(path)?;
        let response = self.send(&url, query).await?;
        let body = response.text().await.map_err(|e| {
            Error::decode(format!("Failed to read response body: {}", e.without_url()))
        })?;
        serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("Unexpected response shape: {e}")))
    }

    async fn send(&self, url: &Url, query: &[(String, String)]) -> Result<Response> {
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.wait().await;
            }

            let mut request = self.client.get(url.clone()).query(query);
            if let Some(token) = &self.config.token {
                request = request.query(&[(TOKEN_PARAM, token.as_str())]);
            }

            let (error, delay) = match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(
                        status = response.status().as_u16(),
                        path = url.path(),
                        "Request succeeded"
                    );
                    return Ok(response);
                }
                Ok(response) => {
                    let status = response.status();
                    if !is_retryable_status(status) {
                        return Err(status_error(response).await);
                    }
                    let delay = self.retry_delay(&response, attempt);
                    let error = if status == StatusCode::TOO_MANY_REQUESTS {
                        Error::RateLimited {
                            retry_after_seconds: delay.as_secs(),
                        }
                    } else {
                        status_error(response).await
                    };
                    (error, delay)
                }
                Err(e) if e.is_timeout() => (
                    Error::Timeout {
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    },
                    self.backoff(attempt),
                ),
                Err(e) if e.is_connect() => (Error::Http(e.without_url()), self.backoff(attempt)),
                Err(e) => return Err(Error::Http(e.without_url())),
            };

            if attempt >= max_retries {
                return Err(error);
            }

            warn!(
                "{error}, attempt {}/{}, retrying in {delay:?}",
                attempt + 1,
                max_retries + 1
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let joined = match &self.config.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        };
        Ok(Url::parse(&joined)?)
    }

    /// Exponential backoff for a retry, capped at `max_backoff`
    pub(super) fn backoff(&self, attempt: u32) -> Duration {
        let delay = self.config.initial_backoff * 2u32.saturating_pow(attempt);
        delay.min(self.config.max_backoff)
    }

    /// Wait before retrying a throttled or failed response
    ///
    /// A numeric `Retry-After` is honored up to `max_backoff`; a missing or
    /// HTTP-date value falls back to the computed backoff.
    fn retry_delay(&self, response: &Response, attempt: u32) -> Duration {
        retry_after(response).map_or_else(
            || self.backoff(attempt),
            |wait| wait.min(self.config.max_backoff),
        )
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("rate_limit", &self.rate_limit())
            .finish_non_exhaustive()
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .map(Duration::from_secs)
}

async fn status_error(response: Response) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Error::http_status(status, body)
}
