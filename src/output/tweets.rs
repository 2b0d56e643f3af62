//! Tweet helpers for Search output
//!
//! Field projection, Tweet type classification and the parsed summary view.

use crate::types::{JsonObject, JsonValue};
use serde::Serialize;
use std::fmt;

/// Permalink prefix; Twitter redirects `/twitter/status/<id>` to the author
pub const STATUS_URL_PREFIX: &str = "https://twitter.com/twitter/status/";

/// Kind of Tweet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TweetType {
    #[serde(rename = "Reply Tweet")]
    Reply,
    #[serde(rename = "Quote Tweet")]
    Quote,
    #[serde(rename = "Retweet")]
    Retweet,
    #[serde(rename = "Original Tweet")]
    Original,
}

impl TweetType {
    pub fn label(&self) -> &'static str {
        match self {
            TweetType::Reply => "Reply Tweet",
            TweetType::Quote => "Quote Tweet",
            TweetType::Retweet => "Retweet",
            TweetType::Original => "Original Tweet",
        }
    }

    /// Classify a Tweet payload.
    ///
    /// Checked in order: reply, quote (a Retweet of a Quote Tweet is not a
    /// quote), retweet, original.
    pub fn classify(tweet: &JsonValue) -> Self {
        let text = tweet.get("text").and_then(JsonValue::as_str).unwrap_or("");
        let is_retweet_text = text.starts_with("RT");

        let in_reply_to = tweet
            .get("in_reply_to_status_id")
            .is_some_and(|v| !v.is_null());
        if in_reply_to {
            return TweetType::Reply;
        }

        let is_quote = tweet.get("is_quote_status").and_then(JsonValue::as_bool) == Some(true);
        if is_quote && !is_retweet_text {
            return TweetType::Quote;
        }

        let has_retweeted_status = tweet.get("retweeted_status").is_some_and(|v| !v.is_null());
        if is_retweet_text && has_retweeted_status {
            return TweetType::Retweet;
        }

        TweetType::Original
    }
}

impl fmt::Display for TweetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Object selector
// ============================================================================

/// Project a Tweet onto root-level `keys`; missing keys become `null`
pub fn select_fields(tweet: &JsonValue, keys: &[String], with_type: bool) -> JsonValue {
    let mut selected = JsonObject::new();
    for key in keys {
        let value = tweet.get(key).cloned().unwrap_or(JsonValue::Null);
        selected.insert(key.clone(), value);
    }
    if with_type {
        selected.insert(
            "tweet_type".to_string(),
            JsonValue::String(TweetType::classify(tweet).label().to_string()),
        );
    }
    JsonValue::Object(selected)
}

/// Apply [`select_fields`] to every Tweet in `results`
pub fn select_results(results: &[JsonValue], keys: &[String], with_type: bool) -> JsonValue {
    JsonValue::Array(
        results
            .iter()
            .map(|tweet| select_fields(tweet, keys, with_type))
            .collect(),
    )
}

// ============================================================================
// Parsed summary
// ============================================================================

/// Condensed view of one Tweet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTweet {
    pub tweet_id: String,
    pub text: String,
    pub tweet_type: TweetType,
    pub hyperlink: String,
}

impl ParsedTweet {
    /// Build from a Tweet payload; `None` without an `id_str`.
    ///
    /// The text prefers `extended_tweet.full_text` over the truncated `text`.
    pub fn from_tweet(tweet: &JsonValue) -> Option<Self> {
        let id = tweet.get("id_str")?.as_str()?;
        let text = tweet
            .get("extended_tweet")
            .and_then(|ext| ext.get("full_text"))
            .or_else(|| tweet.get("text"))
            .and_then(JsonValue::as_str)
            .unwrap_or("");

        Some(Self {
            tweet_id: id.to_string(),
            text: text.to_string(),
            tweet_type: TweetType::classify(tweet),
            hyperlink: format!("{STATUS_URL_PREFIX}{id}"),
        })
    }
}

/// `{"parsed_results": [...]}` for a page of results
pub fn parsed_results(results: &[JsonValue]) -> JsonValue {
    let parsed: Vec<ParsedTweet> = results.iter().filter_map(ParsedTweet::from_tweet).collect();
    serde_json::json!({ "parsed_results": parsed })
}
