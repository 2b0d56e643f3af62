//! Transport seam between the pagination driver and the network
//!
//! The driver only sees [`Transport`], so tests can swap in scripted
//! responses without a server.

use super::client::HttpClient;
use crate::auth::Authenticator;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::types::{Method, PageResult};
use async_trait::async_trait;
use url::Url;

/// Sends one request for one page
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `spec` and return the response.
    ///
    /// Any HTTP status is `Ok`; `Err` means no response was received.
    async fn send(&self, spec: &RequestSpec) -> Result<PageResult>;
}

/// A fixed endpoint reached through [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: HttpClient,
    method: Method,
    url: Url,
    auth: Authenticator,
}

impl HttpTransport {
    pub fn new(client: HttpClient, method: Method, url: Url, auth: Authenticator) -> Self {
        Self {
            client,
            method,
            url,
            auth,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, spec: &RequestSpec) -> Result<PageResult> {
        // GET carries no body
        let body = match self.method {
            Method::GET => None,
            Method::POST | Method::PUT => Some(spec.to_json()),
        };
        self.client
            .send(self.method, &self.url, &self.auth, body.as_ref())
            .await
    }
}
