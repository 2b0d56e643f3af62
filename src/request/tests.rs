//! Tests for the request module

use super::*;
use crate::error::Error;
use crate::types::{Bucket, ContinuationToken, EngagementKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;

fn engagement(ids: &[&str]) -> EngagementOptions {
    EngagementOptions {
        tweet_ids: ids.iter().map(|s| (*s).to_string()).collect(),
        ..Default::default()
    }
}

// ============================================================================
// RequestSpec / build
// ============================================================================

#[test]
fn test_build_does_not_mutate_base() {
    let base = search_request(&SearchOptions {
        query: Some("from:TwitterDev".to_string()),
        ..Default::default()
    })
    .unwrap();
    let snapshot = base.clone();

    let page2 = build(&base, Some(&ContinuationToken::new("tok-1")));
    let page3 = build(&page2, Some(&ContinuationToken::new("tok-2")));

    assert_eq!(base, snapshot);
    assert_eq!(base.token(), None);
    assert_eq!(page2.token(), Some("tok-1"));
    assert_eq!(page3.token(), Some("tok-2"));
    assert_eq!(page3.get("query"), Some(&json!("from:TwitterDev")));
}

#[test]
fn test_build_without_token_clears_previous() {
    let with_token = build(&RequestSpec::default(), Some(&ContinuationToken::new("a")));
    let cleared = build(&with_token, None);
    assert_eq!(cleared.token(), None);
    assert_eq!(with_token.token(), Some("a"));
}

#[test]
fn test_from_value_rejects_non_object() {
    assert!(RequestSpec::from_value(json!({"query": "x"})).is_ok());
    assert!(matches!(
        RequestSpec::from_value(json!(["query"])),
        Err(Error::Config { .. })
    ));
}

#[test]
fn test_from_file_replaces_cli_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"query": "from file", "maxResults": 500}}"#).unwrap();

    let spec = RequestSpec::from_file(file.path()).unwrap();
    assert_eq!(
        spec.to_json(),
        json!({"query": "from file", "maxResults": 500})
    );
}

#[test]
fn test_from_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("request.json");
    assert!(matches!(
        RequestSpec::from_file(&missing),
        Err(Error::FileNotFound { .. })
    ));

    std::fs::write(&missing, "  \n").unwrap();
    assert!(matches!(
        RequestSpec::from_file(&missing),
        Err(Error::Config { .. })
    ));

    std::fs::write(&missing, "{not json").unwrap();
    assert!(matches!(
        RequestSpec::from_file(&missing),
        Err(Error::JsonParse(_))
    ));
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_request_only_supplied_fields() {
    let spec = search_request(&SearchOptions {
        query: Some("snow has:media".to_string()),
        from_date: Some("201901010000".to_string()),
        to_date: None,
        max_results: Some(100),
        bucket: Some(Bucket::Hour),
    })
    .unwrap();

    assert_eq!(
        spec.to_json(),
        json!({
            "query": "snow has:media",
            "fromDate": "201901010000",
            "maxResults": 100,
            "bucket": "hour"
        })
    );
}

#[test]
fn test_search_request_empty() {
    let spec = search_request(&SearchOptions::default()).unwrap();
    assert!(spec.is_empty());
}

#[test]
fn test_search_request_validation() {
    let too_long = SearchOptions {
        query: Some("a".repeat(MAX_QUERY_LEN + 1)),
        ..Default::default()
    };
    assert!(matches!(
        search_request(&too_long),
        Err(Error::InvalidConfigValue { .. })
    ));

    let too_many = SearchOptions {
        max_results: Some(501),
        ..Default::default()
    };
    assert!(search_request(&too_many).is_err());

    let too_few = SearchOptions {
        max_results: Some(9),
        ..Default::default()
    };
    assert!(search_request(&too_few).is_err());
}

// ============================================================================
// Engagement
// ============================================================================

#[test]
fn test_engagement_totals_unowned_defaults() {
    let spec = engagement_request(EngagementKind::Totals, &engagement(&["123", "456"])).unwrap();
    assert_eq!(
        spec.to_json(),
        json!({
            "tweet_ids": ["123", "456"],
            "engagement_types": ["favorites", "replies", "retweets", "video_views"],
            "groupings": {
                "per-tweet-metrics": {"group_by": ["tweet.id", "engagement.type"]}
            }
        })
    );
}

#[test]
fn test_engagement_totals_owned_defaults() {
    let mut options = engagement(&["123"]);
    options.owned = true;
    let spec = engagement_request(EngagementKind::Totals, &options).unwrap();
    assert_eq!(spec.get("engagement_types"), Some(&json!(OWNED_TOTALS_TYPES)));
}

#[test]
fn test_engagement_metrics_override() {
    let mut options = engagement(&["123"]);
    options.owned = true;
    options.metrics = Some(vec!["impressions".to_string()]);

    for kind in [
        EngagementKind::Totals,
        EngagementKind::TwentyEightHour,
        EngagementKind::Historical,
    ] {
        let spec = engagement_request(kind, &options).unwrap();
        assert_eq!(spec.get("engagement_types"), Some(&json!(["impressions"])));
    }
}

#[test]
fn test_engagement_28hr_defaults() {
    let spec =
        engagement_request(EngagementKind::TwentyEightHour, &engagement(&["123"])).unwrap();
    let types = spec.get("engagement_types").unwrap().as_array().unwrap();
    assert_eq!(types.len(), DEFAULT_ENGAGEMENT_TYPES.len());
    assert!(spec.get("groupings").unwrap().get("my_grouping").is_some());
    assert!(spec.get("start").is_none());
}

#[test]
fn test_engagement_historical_dates() {
    let mut options = engagement(&["123"]);
    options.start_date = Some("2019-01-01T12:00:00Z".to_string());
    options.end_date = Some("2019-02-01T12:00:00Z".to_string());

    let spec = engagement_request(EngagementKind::Historical, &options).unwrap();
    assert_eq!(spec.get("start"), Some(&json!("2019-01-01T12:00:00Z")));
    assert_eq!(spec.get("end"), Some(&json!("2019-02-01T12:00:00Z")));

    // Dates are only meaningful for the historical endpoint
    let spec = engagement_request(EngagementKind::TwentyEightHour, &options).unwrap();
    assert!(spec.get("start").is_none());
}

#[test]
fn test_engagement_id_limits() {
    assert!(matches!(
        engagement_request(EngagementKind::Totals, &engagement(&[])),
        Err(Error::MissingConfigField { .. })
    ));

    let ids: Vec<String> = (0..26).map(|i| i.to_string()).collect();
    let options = EngagementOptions {
        tweet_ids: ids,
        ..Default::default()
    };
    assert!(engagement_request(EngagementKind::TwentyEightHour, &options).is_err());
    assert!(engagement_request(EngagementKind::Totals, &options).is_ok());
}

// ============================================================================
// Rules / Historical
// ============================================================================

#[test]
fn test_add_rule_request() {
    let spec = add_rule_request("snow has:media", Some("weather")).unwrap();
    assert_eq!(
        spec.to_json(),
        json!({"rules": [{"value": "snow has:media", "tag": "weather"}]})
    );

    let spec = add_rule_request("snow", None).unwrap();
    assert_eq!(spec.to_json(), json!({"rules": [{"value": "snow"}]}));

    assert!(add_rule_request("   ", None).is_err());
}

#[test]
fn test_delete_rules_request() {
    let spec =
        delete_rules_request(&["1234567890".to_string(), "not-numeric".to_string()]).unwrap();
    assert_eq!(
        spec.to_json(),
        json!({"rule_ids": [1_234_567_890_u64, "not-numeric"]})
    );
    assert!(delete_rules_request(&[]).is_err());
}

#[test]
fn test_job_decision_request() {
    assert_eq!(
        job_decision_request(JobDecision::Accept).to_json(),
        json!({"status": "accept"})
    );
    assert_eq!(
        job_decision_request(JobDecision::Reject).to_json(),
        json!({"status": "reject"})
    );
}

#[test]
fn test_job_uuid_parsing() {
    assert_eq!(
        job_uuid_from_job_url(
            "https://gnip-api.gnip.com/historical/powertrack/accounts/acme/publishers/twitter/jobs/abc123.json"
        ),
        Some("abc123")
    );
    assert_eq!(
        job_uuid_from_data_url(
            "https://gnip-api.gnip.com/historical/powertrack/accounts/acme/publishers/twitter/jobs/abc123/results.json"
        ),
        Some("abc123")
    );
    assert_eq!(job_uuid_from_data_url("results.json"), None);
}
