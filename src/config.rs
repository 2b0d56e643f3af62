//! Runtime settings and credentials
//!
//! Settings are read once at process start, from the environment and an
//! optional `.env` file, and then passed by reference to whatever needs them.
//! Nothing in the crate reads environment variables after this point.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use std::fmt;
use std::path::Path;
use tracing::debug;

// ============================================================================
// Environment Variable Names
// ============================================================================

pub const ENV_USERNAME: &str = "USERNAME";
pub const ENV_PASSWORD: &str = "PASSWORD";
pub const ENV_ACCOUNT_NAME: &str = "ACCOUNT_NAME";
pub const ENV_POWERTRACK_LABEL: &str = "POWERTRACK_LABEL";
pub const ENV_SEARCH_LABEL: &str = "SEARCH_LABEL";
pub const ENV_SEARCH_ARCHIVE: &str = "SEARCH_ARCHIVE";
pub const ENV_CONSUMER_KEY: &str = "TWITTER_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "TWITTER_CONSUMER_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
pub const ENV_ACCESS_TOKEN_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";
pub const ENV_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";

// ============================================================================
// Settings
// ============================================================================

/// Account settings and credentials
///
/// Every field is optional; commands ask for the ones they need and get a
/// [`Error::MissingConfigField`] naming the variable when it is absent.
#[derive(Clone, Default)]
pub struct Settings {
    pub username: Option<String>,
    pub password: Option<String>,
    pub account_name: Option<String>,
    pub powertrack_label: Option<String>,
    pub search_label: Option<String>,
    /// `30day` or `fullarchive`
    pub search_archive: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
    pub bearer_token: Option<String>,
}

impl Settings {
    /// Load settings, reading a `.env` file first.
    ///
    /// An explicit `env_file` must exist. Without one, a `.env` in the
    /// working directory is used if present.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    Error::config(format!("Failed to load env file {}: {e}", path.display()))
                })?;
                debug!("Loaded environment from {}", path.display());
            }
            None => match dotenvy::dotenv() {
                Ok(path) => debug!("Loaded environment from {}", path.display()),
                Err(e) => debug!("No .env file loaded: {e}"),
            },
        }
        Ok(Self::from_env())
    }

    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).none_if_empty();
        Self {
            username: get(ENV_USERNAME),
            password: get(ENV_PASSWORD),
            account_name: get(ENV_ACCOUNT_NAME),
            powertrack_label: get(ENV_POWERTRACK_LABEL),
            search_label: get(ENV_SEARCH_LABEL),
            search_archive: get(ENV_SEARCH_ARCHIVE),
            consumer_key: get(ENV_CONSUMER_KEY),
            consumer_secret: get(ENV_CONSUMER_SECRET),
            access_token: get(ENV_ACCESS_TOKEN),
            access_token_secret: get(ENV_ACCESS_TOKEN_SECRET),
            bearer_token: get(ENV_BEARER_TOKEN),
        }
    }

    pub fn account_name(&self) -> Result<&str> {
        require(self.account_name.as_ref(), ENV_ACCOUNT_NAME)
    }

    pub fn powertrack_label(&self) -> Result<&str> {
        require(self.powertrack_label.as_ref(), ENV_POWERTRACK_LABEL)
    }

    pub fn search_label(&self) -> Result<&str> {
        require(self.search_label.as_ref(), ENV_SEARCH_LABEL)
    }

    pub fn search_archive(&self) -> Result<&str> {
        require(self.search_archive.as_ref(), ENV_SEARCH_ARCHIVE)
    }

    /// Basic auth from `USERNAME` / `PASSWORD` (Gnip APIs)
    pub fn basic_auth(&self) -> Result<AuthConfig> {
        Ok(AuthConfig::Basic {
            username: require(self.username.as_ref(), ENV_USERNAME)?.to_string(),
            password: require(self.password.as_ref(), ENV_PASSWORD)?.to_string(),
        })
    }

    /// OAuth 1.0a user-context auth (Engagement API)
    pub fn oauth1_auth(&self) -> Result<AuthConfig> {
        Ok(AuthConfig::OAuth1 {
            consumer_key: require(self.consumer_key.as_ref(), ENV_CONSUMER_KEY)?.to_string(),
            consumer_secret: require(self.consumer_secret.as_ref(), ENV_CONSUMER_SECRET)?
                .to_string(),
            token: require(self.access_token.as_ref(), ENV_ACCESS_TOKEN)?.to_string(),
            token_secret: require(self.access_token_secret.as_ref(), ENV_ACCESS_TOKEN_SECRET)?
                .to_string(),
        })
    }

    /// App-only bearer auth (Engagement totals for unowned Tweets)
    pub fn bearer_auth(&self) -> Result<AuthConfig> {
        Ok(AuthConfig::Bearer {
            token: require(self.bearer_token.as_ref(), ENV_BEARER_TOKEN)?.to_string(),
        })
    }
}

fn require<'a>(value: Option<&'a String>, field: &str) -> Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| Error::missing_field(field))
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("account_name", &self.account_name)
            .field("powertrack_label", &self.powertrack_label)
            .field("search_label", &self.search_label)
            .field("search_archive", &self.search_archive)
            .field("consumer_key", &redact(&self.consumer_key))
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("access_token", &redact(&self.access_token))
            .field("access_token_secret", &redact(&self.access_token_secret))
            .field("bearer_token", &redact(&self.bearer_token))
            .finish()
    }
}
