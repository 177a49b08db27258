//! Client-side request throttle
//!
//! A governor token bucket refilled at `requests_per_second`, with a burst
//! of the same size.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

type DirectLimiter = Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Token bucket shared by every request of one client
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DirectLimiter>,
    per_second: NonZeroU32,
}

impl RateLimiter {
    /// Allow `per_second` requests per second
    pub fn per_second(per_second: NonZeroU32) -> Self {
        Self {
            limiter: Arc::new(Governor::direct(Quota::per_second(per_second))),
            per_second,
        }
    }

    /// Requests allowed per second
    pub fn rate(&self) -> u32 {
        self.per_second.get()
    }

    /// Wait for the next permit
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("per_second", &self.per_second)
            .finish_non_exhaustive()
    }
}
