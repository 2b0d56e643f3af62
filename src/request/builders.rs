//! Request body builders for each API
//!
//! All builders are pure: options in, `RequestSpec` out.

use super::types::{EngagementOptions, JobDecision, RequestSpec, SearchOptions};
use crate::error::{Error, Result};
use crate::types::{ContinuationToken, EngagementKind, JsonObject, JsonValue};
use serde_json::json;

/// Longest query the Search API accepts
pub const MAX_QUERY_LEN: usize = 2048;

/// Accepted `maxResults` range for Search
pub const MAX_RESULTS_RANGE: std::ops::RangeInclusive<u32> = 10..=500;

/// Engagement types requested by `28hr` and `historical` unless overridden
pub const DEFAULT_ENGAGEMENT_TYPES: &[&str] = &[
    "impressions",
    "engagements",
    "favorites",
    "retweets",
    "replies",
    "video_views",
    "media_views",
    "media_engagements",
    "url_clicks",
    "hashtag_clicks",
    "detail_expands",
    "permalink_clicks",
    "app_install_attempts",
    "app_opens",
    "email_tweet",
    "user_follows",
    "user_profile_clicks",
];

/// Public metrics available from `totals` for any Tweet
pub const UNOWNED_TOTALS_TYPES: &[&str] = &["favorites", "replies", "retweets", "video_views"];

/// `totals` metrics for Tweets owned by the authenticating user
pub const OWNED_TOTALS_TYPES: &[&str] = &[
    "impressions",
    "engagements",
    "favorites",
    "replies",
    "retweets",
    "video_views",
];

/// Derive the request for one page: `base` with `token` merged in.
///
/// Never mutates `base`.
pub fn build(base: &RequestSpec, token: Option<&ContinuationToken>) -> RequestSpec {
    base.with_token(token)
}

// ============================================================================
// Search
// ============================================================================

/// Build a Search request body from CLI options.
///
/// Only supplied fields are included.
pub fn search_request(options: &SearchOptions) -> Result<RequestSpec> {
    let mut body = JsonObject::new();

    if let Some(query) = &options.query {
        if query.chars().count() > MAX_QUERY_LEN {
            return Err(Error::invalid_value(
                "query",
                format!("must be at most {MAX_QUERY_LEN} characters"),
            ));
        }
        body.insert("query".to_string(), json!(query));
    }
    if let Some(from) = &options.from_date {
        body.insert("fromDate".to_string(), json!(from));
    }
    if let Some(to) = &options.to_date {
        body.insert("toDate".to_string(), json!(to));
    }
    if let Some(max) = options.max_results {
        if !MAX_RESULTS_RANGE.contains(&max) {
            return Err(Error::invalid_value(
                "max_results",
                format!(
                    "must be between {} and {}",
                    MAX_RESULTS_RANGE.start(),
                    MAX_RESULTS_RANGE.end()
                ),
            ));
        }
        body.insert("maxResults".to_string(), json!(max));
    }
    if let Some(bucket) = options.bucket {
        body.insert("bucket".to_string(), json!(bucket.as_str()));
    }

    Ok(RequestSpec::new(body))
}

// ============================================================================
// Engagement
// ============================================================================

/// Maximum Tweet IDs per request for each Engagement endpoint
pub fn max_tweet_ids(kind: EngagementKind) -> usize {
    match kind {
        EngagementKind::Totals => 250,
        EngagementKind::TwentyEightHour | EngagementKind::Historical => 25,
    }
}

/// Build an Engagement API request body
pub fn engagement_request(kind: EngagementKind, options: &EngagementOptions) -> Result<RequestSpec> {
    if options.tweet_ids.is_empty() {
        return Err(Error::missing_field("tweet_ids"));
    }
    let limit = max_tweet_ids(kind);
    if options.tweet_ids.len() > limit {
        return Err(Error::invalid_value(
            "tweet_ids",
            format!("{} accepts at most {limit} Tweet IDs", kind.path()),
        ));
    }

    let engagement_types: Vec<String> = match (&options.metrics, kind) {
        (Some(metrics), _) => metrics.clone(),
        (None, EngagementKind::Totals) if options.owned => to_strings(OWNED_TOTALS_TYPES),
        (None, EngagementKind::Totals) => to_strings(UNOWNED_TOTALS_TYPES),
        (None, _) => to_strings(DEFAULT_ENGAGEMENT_TYPES),
    };

    let grouping_name = match kind {
        EngagementKind::Totals => "per-tweet-metrics",
        EngagementKind::TwentyEightHour | EngagementKind::Historical => "my_grouping",
    };

    let mut body = JsonObject::new();
    body.insert("tweet_ids".to_string(), json!(options.tweet_ids));
    body.insert("engagement_types".to_string(), json!(engagement_types));
    body.insert(
        "groupings".to_string(),
        json!({ grouping_name: { "group_by": ["tweet.id", "engagement.type"] } }),
    );

    if kind == EngagementKind::Historical {
        if let Some(start) = &options.start_date {
            body.insert("start".to_string(), json!(start));
        }
        if let Some(end) = &options.end_date {
            body.insert("end".to_string(), json!(end));
        }
    }

    Ok(RequestSpec::new(body))
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

// ============================================================================
// PowerTrack Rules
// ============================================================================

/// Body for adding a single rule
pub fn add_rule_request(value: &str, tag: Option<&str>) -> Result<RequestSpec> {
    if value.trim().is_empty() {
        return Err(Error::invalid_value("rule_value", "must not be empty"));
    }
    let mut rule = JsonObject::new();
    rule.insert("value".to_string(), json!(value));
    if let Some(tag) = tag {
        rule.insert("tag".to_string(), json!(tag));
    }
    RequestSpec::from_value(json!({ "rules": [JsonValue::Object(rule)] }))
}

/// Body for deleting rules by ID
pub fn delete_rules_request(ids: &[String]) -> Result<RequestSpec> {
    if ids.is_empty() {
        return Err(Error::missing_field("rule_ids"));
    }
    let ids: Vec<JsonValue> = ids
        .iter()
        .map(|id| match id.parse::<u64>() {
            Ok(n) => json!(n),
            Err(_) => json!(id),
        })
        .collect();
    RequestSpec::from_value(json!({ "rule_ids": ids }))
}

// ============================================================================
// Historical PowerTrack
// ============================================================================

/// Body for accepting or rejecting a quoted job
pub fn job_decision_request(decision: JobDecision) -> RequestSpec {
    let mut body = JsonObject::new();
    body.insert("status".to_string(), json!(decision.as_str()));
    RequestSpec::new(body)
}

/// Job UUID from a job URL such as `.../jobs/<uuid>.json`
pub fn job_uuid_from_job_url(job_url: &str) -> Option<&str> {
    let last = job_url.trim_end_matches('/').rsplit('/').next()?;
    let uuid = last.split('.').next()?;
    (!uuid.is_empty()).then_some(uuid)
}

/// Job UUID from a data URL such as `.../jobs/<uuid>/results.json`
pub fn job_uuid_from_data_url(data_url: &str) -> Option<&str> {
    let mut parts = data_url.trim_end_matches('/').rsplit('/');
    parts.next()?;
    parts.next().filter(|s| !s.is_empty())
}
