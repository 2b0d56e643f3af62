//! HTTP client module
//!
//! Provides the single-call HTTP client and the [`Transport`] trait the
//! pagination driver is written against.
//!
//! # Features
//!
//! - **One call per send**: no hidden retries; network failures are errors,
//!   HTTP error statuses are data
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Streaming**: A connection for long-lived PowerTrack streams
//! - **Authentication**: Integration with auth module

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{QuotaWindow, RateLimiter, RateLimiterConfig};
pub use transport::{HttpTransport, Transport};
