//! HTTP client with rate limiting
//!
//! Issues exactly one network call per `send`. There is no retry here:
//! a network failure surfaces as [`Error::Transport`] and a non-2xx status
//! is returned to the caller as an ordinary [`PageResult`].

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method, PageResult};
use bytes::Bytes;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout (connect + full response) for non-streaming calls
    pub timeout: Duration,
    /// Connect timeout, also used for the streaming connection
    pub connect_timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            rate_limit: None,
            user_agent: format!("gnip-cli/{}", env!("CARGO_PKG_VERSION")),
        }
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
    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connect timeout
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set rate limiter
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client shared by every command.
///
/// Cloning is cheap: the reqwest clients and rate limiter are reference
/// counted.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    stream_client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        // A stream stays open indefinitely, so it only gets a connect timeout
        let stream_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            stream_client,
            config,
            rate_limiter,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Send one request and read the whole body.
    ///
    /// `body` is serialized as JSON when present. Any status code is a
    /// successful return; only a network failure is an error.
    pub async fn send(
        &self,
        method: Method,
        url: &Url,
        auth: &Authenticator,
        body: Option<&JsonValue>,
    ) -> Result<PageResult> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let reqwest_method: reqwest::Method = method.into();
        let mut req = self.client.request(reqwest_method.clone(), url.clone());

        if let Some(body) = body {
            req = req.json(body);
        }

        req = auth.apply(&reqwest_method, url, req)?;

        debug!("{} {}", method, url);
        let response = req.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if (200..300).contains(&status) {
            debug!("{} {} -> {}", method, url, status);
        } else {
            warn!("{} {} returned HTTP {}", method, url, status);
        }

        Ok(PageResult::new(status, text))
    }

    /// Open a long-lived GET connection and return the response with its
    /// body unread.
    ///
    /// Unlike [`HttpClient::send`], a non-2xx status here is an
    /// [`Error::HttpStatus`] since there is no page to hand back.
    pub async fn open_stream(
        &self,
        url: &Url,
        auth: &Authenticator,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let mut req = self.stream_client.get(url.clone());
        for (key, value) in headers {
            req = req.header(*key, *value);
        }

        req = auth.apply(&reqwest::Method::GET, url, req)?;

        debug!("Connecting to stream {}", url);
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(response)
    }

    /// Fetch a file's bytes without authentication.
    ///
    /// Historical data files are pre-signed URLs.
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Bytes> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(response.bytes().await?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
