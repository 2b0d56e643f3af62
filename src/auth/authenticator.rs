//! Authenticator implementation
//!
//! Applies the configured credentials to outgoing requests.

use super::oauth1::{self, OAuth1Credentials, OAuth1Nonce};
use super::types::AuthConfig;
use crate::error::Result;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use url::Url;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// The configured auth scheme
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder.
    ///
    /// OAuth1 signs over the method and full URL, so both are passed in
    /// alongside the builder.
    pub fn apply(&self, method: &Method, url: &Url, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Basic { username, password } => {
                Ok(req.basic_auth(username, Some(password)))
            }

            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),

            AuthConfig::OAuth1 {
                consumer_key,
                consumer_secret,
                token,
                token_secret,
            } => {
                let credentials = OAuth1Credentials {
                    consumer_key,
                    consumer_secret,
                    token,
                    token_secret,
                };
                let header = oauth1::authorization_header(
                    method,
                    url,
                    &[],
                    credentials,
                    &OAuth1Nonce::generate(),
                )?;
                Ok(req.header(AUTHORIZATION, header))
            }
        }
    }
}
