//! Endpoint URLs for each API family
//!
//! Hosts default to the production domains and can all be pointed at one
//! base URL, which is how the integration tests reach a mock server.

use crate::error::Result;
use crate::types::{EngagementKind, SearchKind};
use url::Url;

/// Search and PowerTrack rules host
pub const GNIP_API: &str = "https://gnip-api.twitter.com";

/// PowerTrack stream host
pub const GNIP_STREAM: &str = "https://gnip-stream.twitter.com";

/// Historical PowerTrack host
pub const GNIP_HISTORICAL: &str = "https://gnip-api.gnip.com";

/// Engagement API host
pub const DATA_API: &str = "https://data-api.twitter.com";

/// Hosts for every API family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api: String,
    stream: String,
    historical: String,
    data: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api: GNIP_API.to_string(),
            stream: GNIP_STREAM.to_string(),
            historical: GNIP_HISTORICAL.to_string(),
            data: DATA_API.to_string(),
        }
    }
}

impl Endpoints {
    /// Production hosts
    pub fn new() -> Self {
        Self::default()
    }

    /// Send every family to `base`
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            api: base.clone(),
            stream: base.clone(),
            historical: base.clone(),
            data: base,
        }
    }

    /// `{api}/search/{archive}/accounts/{account}/{label}[/counts].json`
    pub fn search(
        &self,
        archive: &str,
        account: &str,
        label: &str,
        kind: SearchKind,
    ) -> Result<Url> {
        let suffix = match kind {
            SearchKind::Data => "",
            SearchKind::Counts => "/counts",
        };
        parse(format!(
            "{}/search/{archive}/accounts/{account}/{label}{suffix}.json",
            self.api
        ))
    }

    /// PowerTrack rules for a stream label
    pub fn rules(&self, account: &str, label: &str) -> Result<Url> {
        parse(format!(
            "{}/rules/powertrack/accounts/{account}/publishers/twitter/{label}.json",
            self.api
        ))
    }

    /// Rules deletion is a POST with `_method=delete`
    pub fn rules_delete(&self, account: &str, label: &str) -> Result<Url> {
        let mut url = self.rules(account, label)?;
        url.query_pairs_mut().append_pair("_method", "delete");
        Ok(url)
    }

    /// PowerTrack stream
    pub fn stream(&self, account: &str, label: &str) -> Result<Url> {
        parse(format!(
            "{}/stream/powertrack/accounts/{account}/publishers/twitter/{label}.json",
            self.stream
        ))
    }

    /// Historical PowerTrack job collection; create (POST) and list (GET)
    pub fn historical_jobs(&self, account: &str) -> Result<Url> {
        parse(format!(
            "{}/historical/powertrack/accounts/{account}/publishers/twitter/jobs.json",
            self.historical
        ))
    }

    /// `{data}/insights/engagement/{totals|28hr|historical}`
    pub fn engagement(&self, kind: EngagementKind) -> Result<Url> {
        parse(format!("{}/insights/engagement/{}", self.data, kind.path()))
    }
}

fn parse(url: String) -> Result<Url> {
    Ok(Url::parse(&url)?)
}
