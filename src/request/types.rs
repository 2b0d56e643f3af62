//! Request types
//!
//! `RequestSpec` is the JSON body sent to an endpoint. It is immutable once
//! built; pagination derives a fresh spec per page instead of editing the
//! original.

use crate::error::{Error, Result};
use crate::types::{Bucket, ContinuationToken, JsonObject, JsonValue};
use serde::Serialize;
use std::path::Path;

/// Key the APIs use for the continuation token, in requests and responses
pub const NEXT_KEY: &str = "next";

/// Immutable JSON request body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestSpec {
    body: JsonObject,
}

impl RequestSpec {
    /// Create a spec from a JSON object
    pub fn new(body: JsonObject) -> Self {
        Self { body }
    }

    /// Create a spec from any JSON value; only objects are accepted
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(body) => Ok(Self { body }),
            other => Err(Error::config(format!(
                "Request body must be a JSON object, got: {other}"
            ))),
        }
    }

    /// Load a spec from a JSON file.
    ///
    /// The file replaces any CLI-derived fields entirely; nothing is merged.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Err(Error::config(format!(
                "Request file is empty: {}",
                path.display()
            )));
        }
        let value: JsonValue = serde_json::from_str(&contents)?;
        Self::from_value(value)
    }

    /// The body as a JSON object
    pub fn body(&self) -> &JsonObject {
        &self.body
    }

    /// The body as a JSON value
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.body.clone())
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.body.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The continuation token carried by this spec, if any
    pub fn token(&self) -> Option<&str> {
        self.body.get(NEXT_KEY).and_then(JsonValue::as_str)
    }

    /// Derive a new spec with `token` injected under `next`.
    ///
    /// `None` yields a copy with any previous token removed, so a token from
    /// one page can never leak into an unrelated request.
    #[must_use]
    pub fn with_token(&self, token: Option<&ContinuationToken>) -> Self {
        let mut body = self.body.clone();
        match token {
            Some(token) => {
                body.insert(
                    NEXT_KEY.to_string(),
                    JsonValue::String(token.as_str().to_string()),
                );
            }
            None => {
                body.remove(NEXT_KEY);
            }
        }
        Self { body }
    }
}

// ============================================================================
// Option Sets
// ============================================================================

/// Fields for a Search data or counts request
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// PowerTrack query, up to 2,048 characters
    pub query: Option<String>,
    /// Oldest date, `YYYYMMDDhhmm`
    pub from_date: Option<String>,
    /// Most recent date, `YYYYMMDDhhmm`
    pub to_date: Option<String>,
    /// Results per page (10-500)
    pub max_results: Option<u32>,
    /// Counts bucket
    pub bucket: Option<Bucket>,
}

/// Fields for an Engagement API request
#[derive(Debug, Clone, Default)]
pub struct EngagementOptions {
    pub tweet_ids: Vec<String>,
    /// Overrides the default engagement types
    pub metrics: Option<Vec<String>>,
    /// Request owned-Tweet metrics (totals only)
    pub owned: bool,
    /// Historical start, e.g. `2019-01-01T12:00:00Z`
    pub start_date: Option<String>,
    /// Historical end
    pub end_date: Option<String>,
}

/// Decision for a quoted Historical PowerTrack job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobDecision {
    Accept,
    Reject,
}

impl JobDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobDecision::Accept => "accept",
            JobDecision::Reject => "reject",
        }
    }
}
