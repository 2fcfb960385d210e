// ABOUTME: Tests for the lazy page-cursor streamer
// ABOUTME: Validates ordering across pages, laziness, failure surfacing and page/item limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use canvas_client::models::{Assignment, TodoItem, TodoPayload};
use canvas_client::resources::assignments::list_assignments;
use canvas_client::resources::todo::list_todo;
use canvas_client::stream::{
    collect_all, StreamConfig, DEFAULT_PER_PAGE, MAX_PER_PAGE, MIN_PER_PAGE,
};
use canvas_core::{CanvasError, CanvasResult, ErrorKind};
use common::{
    assignment_json, assignment_todo_json, next_url, page, quiz_todo_json, scripted_context,
    ScriptedTransport,
};
use futures_util::StreamExt;
use serde_json::json;

const PATH: &str = "/api/v1/courses/1/assignments";

fn three_pages() -> Arc<ScriptedTransport> {
    ScriptedTransport::new([
        page(
            json!([assignment_json(1, 1), assignment_json(2, 1)]),
            Some(&next_url(PATH, 2)),
        ),
        page(
            json!([assignment_json(3, 1), assignment_json(4, 1)]),
            Some(&next_url(PATH, 3)),
        ),
        page(json!([assignment_json(5, 1)]), None),
    ])
}

#[test]
fn test_stream_config_default() {
    let config = StreamConfig::default();
    assert!(config.per_page.is_none());
    assert!(config.max_pages.is_none());
    assert!(config.max_items.is_none());
}

#[test]
fn test_stream_config_per_page_clamping() {
    assert_eq!(StreamConfig::with_per_page(0).per_page, Some(MIN_PER_PAGE));
    assert_eq!(StreamConfig::with_per_page(500).per_page, Some(MAX_PER_PAGE));
    assert_eq!(StreamConfig::with_per_page(20).per_page, Some(20));
}

#[test]
fn test_stream_config_builder_chain() {
    let config = StreamConfig::with_per_page(30)
        .with_max_pages(2)
        .with_max_items(45);
    assert_eq!(config.per_page, Some(30));
    assert_eq!(config.max_pages, Some(2));
    assert_eq!(config.max_items, Some(45));
}

#[tokio::test]
async fn test_items_arrive_in_order_across_pages() {
    let transport = three_pages();
    let context = scripted_context(&transport);

    let items = collect_all(list_assignments(&context, 1, StreamConfig::default()))
        .await
        .unwrap();

    let ids: Vec<u64> = items.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn test_first_request_carries_page_size_and_cursors_are_followed_verbatim() {
    let transport = three_pages();
    let context = scripted_context(&transport);

    collect_all(list_assignments(&context, 1, StreamConfig::default()))
        .await
        .unwrap();

    let first = transport.url(0);
    assert_eq!(first.path(), PATH);
    assert_eq!(
        transport.query_value(0, "per_page"),
        Some(DEFAULT_PER_PAGE.to_string())
    );
    assert_eq!(transport.url(1).as_str(), next_url(PATH, 2));
    assert_eq!(transport.url(2).as_str(), next_url(PATH, 3));
}

#[tokio::test]
async fn test_stream_is_lazy_until_polled() {
    let transport = three_pages();
    let context = scripted_context(&transport);

    let mut stream = list_assignments(&context, 1, StreamConfig::default());
    assert_eq!(transport.calls(), 0);

    // Both items of the first page come from one request
    stream.next().await.unwrap().unwrap();
    assert_eq!(transport.calls(), 1);
    stream.next().await.unwrap().unwrap();
    assert_eq!(transport.calls(), 1);

    // The third item needs the second page
    let third: Assignment = stream.next().await.unwrap().unwrap();
    assert_eq!(third.id, 3);
    assert_eq!(transport.calls(), 2);

    // The last page is fetched only once the second one is drained
    let fourth = stream.next().await.unwrap().unwrap();
    assert_eq!(fourth.id, 4);
    assert_eq!(transport.calls(), 2);
    let fifth = stream.next().await.unwrap().unwrap();
    assert_eq!(fifth.id, 5);
    assert_eq!(transport.calls(), 3);

    assert!(stream.next().await.is_none());
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn test_take_never_fetches_unneeded_pages() {
    let transport = three_pages();
    let context = scripted_context(&transport);

    let taken: Vec<_> = list_assignments(&context, 1, StreamConfig::default())
        .take(2)
        .collect()
        .await;

    assert_eq!(taken.len(), 2);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_max_items_stops_without_extra_requests() {
    let transport = three_pages();
    let context = scripted_context(&transport);

    let config = StreamConfig::default().with_max_items(3);
    let items = collect_all(list_assignments(&context, 1, config))
        .await
        .unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_max_pages_caps_requests() {
    let transport = three_pages();
    let context = scripted_context(&transport);

    let config = StreamConfig::default().with_max_pages(2);
    let items = collect_all(list_assignments(&context, 1, config))
        .await
        .unwrap();

    assert_eq!(items.len(), 4);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_failure_mid_stream_keeps_earlier_items_and_ends_stream() {
    let transport = ScriptedTransport::new([
        page(
            json!([assignment_json(1, 1), assignment_json(2, 1)]),
            Some(&next_url(PATH, 2)),
        ),
        Err(CanvasError::from_status(500, next_url(PATH, 2), "boom")),
    ]);
    let context = scripted_context(&transport);

    let mut stream = list_assignments(&context, 1, StreamConfig::default());
    let first = stream.next().await.unwrap().unwrap();
    let second = stream.next().await.unwrap().unwrap();
    let failure = stream.next().await.unwrap().unwrap_err();

    assert_eq!((first.id, second.id), (1, 2));
    assert_eq!(failure.kind(), ErrorKind::Communication);
    assert_eq!(failure.status(), Some(500));
    assert!(stream.next().await.is_none());
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_empty_listing_yields_nothing() {
    let transport = ScriptedTransport::new([page(json!([]), None)]);
    let context = scripted_context(&transport);

    let items = collect_all(list_assignments(&context, 1, StreamConfig::default()))
        .await
        .unwrap();

    assert!(items.is_empty());
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_empty_page_with_cursor_continues_to_next_page() {
    let transport = ScriptedTransport::new([
        page(json!([]), Some(&next_url(PATH, 2))),
        page(json!([assignment_json(9, 1)]), None),
    ]);
    let context = scripted_context(&transport);

    let items = collect_all(list_assignments(&context, 1, StreamConfig::default()))
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 9);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_non_array_page_is_malformed() {
    let transport = ScriptedTransport::new([page(json!({"errors": []}), None)]);
    let context = scripted_context(&transport);

    let error = collect_all(list_assignments(&context, 1, StreamConfig::default()))
        .await
        .unwrap_err();

    assert!(matches!(error, CanvasError::MalformedPayload { .. }));
    assert_eq!(error.kind(), ErrorKind::Communication);
}

#[tokio::test]
async fn test_explicit_per_page_is_sent() {
    let transport = ScriptedTransport::new([page(json!([]), None)]);
    let context = scripted_context(&transport);

    collect_all(list_assignments(&context, 1, StreamConfig::with_per_page(7)))
        .await
        .unwrap();

    assert_eq!(transport.query_value(0, "per_page"), Some("7".to_owned()));
}

fn describe(item: Option<CanvasResult<TodoItem>>) -> String {
    match item {
        Some(Ok(item)) => match item.payload {
            TodoPayload::Assignment(assignment) => format!("assignment:{}", assignment.id),
            TodoPayload::Quiz(quiz) => format!("quiz:{}", quiz.id),
        },
        Some(Err(error)) => format!("err:{}", error.kind()),
        None => "end".to_owned(),
    }
}

#[tokio::test]
async fn test_bad_record_fails_at_its_own_position() {
    let transport = ScriptedTransport::new([page(
        json!([assignment_todo_json(1), quiz_todo_json(2), { "type": "grading" }]),
        None,
    )]);
    let context = scripted_context(&transport);

    let mut stream = list_todo(&context, StreamConfig::default());
    let mut pulled = Vec::new();
    for _ in 0..4 {
        pulled.push(describe(stream.next().await));
    }

    assert_eq!(
        pulled,
        vec!["assignment:1", "quiz:2", "err:bad_api_state", "end"]
    );
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_max_items_stops_before_a_bad_record() {
    let transport = ScriptedTransport::new([page(
        json!([assignment_todo_json(1), { "type": "grading" }]),
        None,
    )]);
    let context = scripted_context(&transport);

    let items = collect_all(list_todo(&context, StreamConfig::default().with_max_items(1)))
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert!(matches!(&items[0].payload, TodoPayload::Assignment(a) if a.id == 1));
}

#[tokio::test]
async fn test_undeclared_token_fails_after_earlier_items() {
    let mut drifted = assignment_json(2, 1);
    drifted["grading_type"] = json!("vibes");
    let transport = ScriptedTransport::new([page(json!([assignment_json(1, 1), drifted]), None)]);
    let context = scripted_context(&transport);

    let mut stream = list_assignments(&context, 1, StreamConfig::default());
    let first = stream.next().await.unwrap().unwrap();
    let error = stream.next().await.unwrap().unwrap_err();

    assert_eq!(first.id, 1);
    assert!(matches!(error, CanvasError::UndeclaredEnumValue { .. }));
    assert!(stream.next().await.is_none());
}
