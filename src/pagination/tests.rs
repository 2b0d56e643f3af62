//! Tests for pagination module

use super::*;
use crate::error::{Error, Result, EXIT_TRANSPORT};
use crate::http::Transport;
use crate::request::RequestSpec;
use crate::types::PageResult;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

/// Transport that replays a script, recording every request it receives
struct ScriptedTransport {
    script: Box<dyn Fn(usize) -> Result<PageResult> + Send + Sync>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl ScriptedTransport {
    fn new(script: impl Fn(usize) -> Result<PageResult> + Send + Sync + 'static) -> Self {
        Self {
            script: Box::new(script),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Responds with the given bodies in order
    fn pages(bodies: Vec<serde_json::Value>) -> Self {
        Self::new(move |call| Ok(PageResult::from_json(200, bodies[call].clone())))
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn tokens(&self) -> Vec<Option<String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.token().map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, spec: &RequestSpec) -> Result<PageResult> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(spec.clone());
            requests.len() - 1
        };
        (self.script)(call)
    }
}

fn base() -> RequestSpec {
    RequestSpec::from_value(json!({"query": "snow", "maxResults": 100})).unwrap()
}

/// A genuine reqwest error, built without touching the network
fn transport_error() -> Error {
    let err = reqwest::Client::new().get("not a url").build().unwrap_err();
    Error::Transport(err)
}

// ============================================================================
// PaginationConfig / PaginationState
// ============================================================================

#[test]
fn test_pagination_config_defaults() {
    let config = PaginationConfig::default();
    assert!(!config.paginate);
    assert_eq!(config.max_pages, DEFAULT_MAX_PAGES);

    let config = PaginationConfig::follow().max_pages(0);
    assert!(config.paginate);
    assert_eq!(config.max_pages, 1);
}

#[test]
fn test_state_done_without_token() {
    let mut state = PaginationState::new();
    state.record_page();
    let page = PageResult::from_json(200, json!({"results": []}));

    let next = state.next(&page, &PaginationConfig::follow()).unwrap();
    assert!(next.is_done());
    assert_eq!(state.state, DriverState::Done);
}

#[test]
fn test_state_repeated_token_fails() {
    let mut state = PaginationState::new();
    let config = PaginationConfig::follow();
    let page = PageResult::from_json(200, json!({"next": "x"}));

    state.record_page();
    assert!(matches!(
        state.next(&page, &config).unwrap(),
        NextPage::Continue(_)
    ));
    state.record_page();
    assert!(matches!(
        state.next(&page, &config),
        Err(Error::InfiniteLoopDetected { pages: 2, .. })
    ));
}

// ============================================================================
// Driver
// ============================================================================

#[tokio::test]
async fn test_paginate_false_makes_one_call() {
    let transport = ScriptedTransport::pages(vec![json!({"results": [1], "next": "a"})]);

    let outcome = PaginationDriver::new(PaginationConfig::single())
        .run(&transport, &base(), ConcatAggregator::new())
        .await
        .unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.aggregate.results(), &[json!(1)]);
}

#[tokio::test]
async fn test_follows_tokens_until_absent() {
    let transport = ScriptedTransport::pages(vec![
        json!({"results": [1], "next": "a"}),
        json!({"results": [2], "next": "b"}),
        json!({"results": [3]}),
    ]);

    let outcome = PaginationDriver::new(PaginationConfig::follow())
        .run(&transport, &base(), ConcatAggregator::new())
        .await
        .unwrap();

    assert_eq!(transport.calls(), 3);
    assert_eq!(
        transport.tokens(),
        vec![None, Some("a".to_string()), Some("b".to_string())]
    );
    assert_eq!(outcome.pages, 3);
    assert_eq!(
        outcome.aggregate.into_results(),
        vec![json!(1), json!(2), json!(3)]
    );
}

#[tokio::test]
async fn test_every_page_keeps_base_fields() {
    let transport = ScriptedTransport::pages(vec![
        json!({"next": "a"}),
        json!({"results": []}),
    ]);
    let base = base();

    PaginationDriver::new(PaginationConfig::follow())
        .run(&transport, &base, CountsAggregator::new())
        .await
        .unwrap();

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests[1].get("query"), Some(&json!("snow")));
    assert_eq!(requests[1].get("maxResults"), Some(&json!(100)));
    // The base request is untouched by the run
    assert_eq!(base.token(), None);
}

#[tokio::test]
async fn test_counts_are_summed() {
    let transport = ScriptedTransport::pages(vec![
        json!({"totalCount": 10, "next": "a"}),
        json!({"totalCount": 20, "next": "b"}),
        json!({"totalCount": 7}),
    ]);

    let outcome = PaginationDriver::new(PaginationConfig::follow())
        .run(&transport, &base(), CountsAggregator::new())
        .await
        .unwrap();

    assert_eq!(outcome.aggregate.total(), 37);
    assert_eq!(outcome.pages, 3);
    assert!(outcome.is_complete());
}

#[tokio::test]
async fn test_repeating_token_is_bounded() {
    let transport = ScriptedTransport::new(|_| Ok(PageResult::from_json(200, json!({"next": "x"}))));

    let err = PaginationDriver::new(PaginationConfig::follow())
        .run(&transport, &base(), CountsAggregator::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InfiniteLoopDetected { .. }));
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_page_ceiling_is_bounded() {
    let transport = ScriptedTransport::new(|call| {
        Ok(PageResult::from_json(200, json!({"next": format!("t{call}")})))
    });

    let err = PaginationDriver::new(PaginationConfig::follow().max_pages(5))
        .run(&transport, &base(), CountsAggregator::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InfiniteLoopDetected { pages: 5, .. }));
    assert_eq!(transport.calls(), 5);
}

#[tokio::test]
async fn test_transport_failure_on_second_page() {
    let transport = ScriptedTransport::new(|call| match call {
        0 => Ok(PageResult::from_json(200, json!({"totalCount": 10, "next": "a"}))),
        _ => Err(transport_error()),
    });

    let result = PaginationDriver::new(PaginationConfig::follow())
        .run(&transport, &base(), CountsAggregator::new())
        .await;

    let err = result.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.exit_code(), EXIT_TRANSPORT);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_error_page_ends_run() {
    let transport = ScriptedTransport::new(|_| {
        Ok(PageResult::new(401, r#"{"error": {"message": "Unauthorized"}}"#))
    });

    let outcome = PaginationDriver::new(PaginationConfig::follow())
        .run(&transport, &base(), CountsAggregator::new())
        .await
        .unwrap();

    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.aggregate.total(), 0);
    assert_eq!(outcome.last_status, 401);
    assert!(!outcome.is_complete());
}

#[tokio::test]
async fn test_error_after_good_page_marks_outcome_incomplete() {
    let transport = ScriptedTransport::new(|call| match call {
        0 => Ok(PageResult::from_json(
            200,
            json!({"results": [{"id_str": "1"}], "next": "t1"}),
        )),
        _ => Ok(PageResult::new(503, r#"{"error": {"message": "Service Unavailable"}}"#)),
    });

    let outcome = PaginationDriver::new(PaginationConfig::follow())
        .run(&transport, &base(), ConcatAggregator::new())
        .await
        .unwrap();

    assert_eq!(outcome.pages, 2);
    assert_eq!(outcome.last_status, 503);
    assert!(!outcome.is_complete());
    assert_eq!(outcome.aggregate.results().len(), 1);
}

#[tokio::test]
async fn test_emit_aggregator_sees_every_page() {
    let transport = ScriptedTransport::pages(vec![
        json!({"totalCount": 1, "next": "a"}),
        json!({"totalCount": 2}),
    ]);
    let mut statuses = Vec::new();

    let outcome = PaginationDriver::new(PaginationConfig::follow())
        .run(
            &transport,
            &base(),
            Both::new(
                CountsAggregator::new(),
                EmitAggregator::new(|page: &PageResult| {
                    statuses.push(page.total_count());
                    Ok(())
                }),
            ),
        )
        .await
        .unwrap();

    assert_eq!(outcome.aggregate.first.total(), 3);
    assert_eq!(outcome.aggregate.second.emitted(), 2);
    drop(outcome);
    assert_eq!(statuses, vec![Some(1), Some(2)]);
}

#[tokio::test]
async fn test_emit_error_aborts_run() {
    let transport = ScriptedTransport::pages(vec![json!({"next": "a"}), json!({})]);

    let err = PaginationDriver::new(PaginationConfig::follow())
        .run(
            &transport,
            &base(),
            EmitAggregator::new(|_: &PageResult| Err(Error::Other("stdout closed".to_string()))),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Other(_)));
    assert_eq!(transport.calls(), 1);
}
