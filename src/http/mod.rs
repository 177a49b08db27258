//! HTTP client module
//!
//! Transport for the CDN fetcher.
//!
//! # Features
//!
//! - **Token Auth**: Access token sent as a query parameter, redacted from debug output
//! - **Automatic Retries**: 429, 5xx, timeouts and refused connections, with exponential backoff
//! - **Bounded Waits**: `Retry-After` and backoff are both capped at `max_backoff`
//! - **Rate Limiting**: Token bucket rate limiter using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, TOKEN_PARAM};
pub use rate_limit::RateLimiter;

#[cfg(test)]
mod tests;
