//! Common types used throughout gnip-cli
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Opaque continuation token returned under the top-level `next` key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One HTTP response: status, raw body, and the body parsed as JSON
/// when it is valid JSON
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub status: u16,
    pub body: String,
    pub json: Option<JsonValue>,
}

impl PageResult {
    /// Build from status and body text, parsing the body when possible
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let json = serde_json::from_str(&body).ok();
        Self { status, body, json }
    }

    /// Build from an already-parsed JSON body
    pub fn from_json(status: u16, json: JsonValue) -> Self {
        Self {
            status,
            body: json.to_string(),
            json: Some(json),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `next` token, if present and non-empty
    pub fn next_token(&self) -> Option<ContinuationToken> {
        self.json
            .as_ref()?
            .get("next")?
            .as_str()
            .filter(|s| !s.is_empty())
            .map(ContinuationToken::new)
    }

    /// Counts responses carry `totalCount`
    pub fn total_count(&self) -> Option<u64> {
        self.json.as_ref()?.get("totalCount")?.as_u64()
    }

    /// Data responses carry a `results` array
    pub fn results(&self) -> Option<&Vec<JsonValue>> {
        self.json.as_ref()?.get("results")?.as_array()
    }
}

// ============================================================================
// Search Types
// ============================================================================

/// Unit of time for counts buckets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    #[default]
    Day,
    Hour,
    Minute,
}

impl Bucket {
    /// Wire name of the bucket
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Day => "day",
            Bucket::Hour => "hour",
            Bucket::Minute => "minute",
        }
    }
}

/// Search product: data or counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    /// Tweet payloads
    #[default]
    Data,
    /// Time-bucketed counts
    Counts,
}

// ============================================================================
// Engagement Types
// ============================================================================

/// Engagement API endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementKind {
    /// Lifetime totals
    Totals,
    /// Last 28 hours
    TwentyEightHour,
    /// Custom date range
    Historical,
}

impl EngagementKind {
    /// Path segment used in the endpoint URL
    pub fn path(&self) -> &'static str {
        match self {
            EngagementKind::Totals => "totals",
            EngagementKind::TwentyEightHour => "28hr",
            EngagementKind::Historical => "historical",
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff between stream reconnects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between reconnects
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
