//! Client-side request pacing
//!
//! The enterprise APIs enforce per-minute request quotas (Search allows 60
//! data or counts requests a minute per account). A long `--next` run or a
//! Historical download with hundreds of files can exceed that, so the client
//! can pace itself with a governor token bucket.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

/// Window a request quota applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotaWindow {
    #[default]
    Second,
    Minute,
}

/// Request quota for one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Requests allowed per window
    pub requests: u32,
    pub window: QuotaWindow,
    /// Requests that may go out back to back before pacing starts
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    /// The Search API quota
    fn default() -> Self {
        Self::per_minute(60)
    }
}

impl RateLimiterConfig {
    /// Steady rate, one request at a time
    pub fn per_second(requests: u32) -> Self {
        Self {
            requests,
            window: QuotaWindow::Second,
            burst_size: 1,
        }
    }

    /// Per-minute quota; the whole minute's allowance may burst
    pub fn per_minute(requests: u32) -> Self {
        Self {
            requests,
            window: QuotaWindow::Minute,
            burst_size: requests,
        }
    }

    #[must_use]
    pub fn burst(mut self, burst_size: u32) -> Self {
        self.burst_size = burst_size;
        self
    }

    fn quota(&self) -> Quota {
        let requests = NonZeroU32::new(self.requests).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        let quota = match self.window {
            QuotaWindow::Second => Quota::per_second(requests),
            QuotaWindow::Minute => Quota::per_minute(requests),
        };
        quota.allow_burst(burst)
    }
}

/// Shared token bucket; clones draw from the same quota
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Zero requests or burst are raised to one
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            config: config.clone(),
            limiter: Arc::new(Governor::direct(config.quota())),
        }
    }

    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Wait for the next request slot
    pub async fn wait(&self) {
        if self.limiter.check().is_ok() {
            return;
        }
        debug!(
            requests = self.config.requests,
            window = ?self.config.window,
            "Request quota reached, pacing"
        );
        self.limiter.until_ready().await;
    }

    /// Take a slot if one is free right now
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
