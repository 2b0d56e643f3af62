//! Auth configuration types

use std::fmt;

/// Authentication configuration
///
/// Credential values are opaque to the rest of the crate; they are only
/// read when a request is signed.
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication (Gnip PowerTrack, Search, Historical)
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication (app-only)
    Bearer {
        /// The bearer token
        token: String,
    },

    /// OAuth 1.0a user context, HMAC-SHA1 signed
    OAuth1 {
        /// Consumer (API) key
        consumer_key: String,
        /// Consumer (API) secret
        consumer_secret: String,
        /// User access token
        token: String,
        /// User access token secret
        token_secret: String,
    },
}

impl AuthConfig {
    /// Short name of the scheme, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::OAuth1 { .. } => "oauth1",
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConfig::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            other => f.write_str(other.scheme()),
        }
    }
}
