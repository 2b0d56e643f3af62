//! Authentication module
//!
//! Supports: Basic, Bearer, OAuth 1.0a (HMAC-SHA1)
//!
//! Gnip products (PowerTrack, Search, Historical) use Basic auth; the
//! Engagement API uses OAuth1 user context, or a bearer token for totals on
//! Tweets the caller does not own.

mod authenticator;
pub mod oauth1;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;

#[cfg(test)]
mod tests;
