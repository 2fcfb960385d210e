// ABOUTME: Shared test utilities for Canvas client integration tests
// ABOUTME: Scripted in-memory transport, context builders and JSON fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `canvas_client`

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use canvas_client::config::ClientConfig;
use canvas_client::context::CanvasContext;
use canvas_client::transport::{PreparedRequest, RawResponse, Transport};
use canvas_core::{CanvasError, CanvasResult, Cursor};
use serde_json::{json, Value};

/// Base URL every scripted context is configured with
pub const BASE_URL: &str = "https://canvas.test";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Transport replaying a fixed script of responses and recording every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<CanvasResult<RawResponse>>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = CanvasResult<RawResponse>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Number of requests executed so far
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every executed request, in order
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// URL of the n-th executed request
    pub fn url(&self, index: usize) -> url::Url {
        self.requests.lock().unwrap()[index].url.clone()
    }

    /// Value of a query parameter on the n-th executed request
    pub fn query_value(&self, index: usize, key: &str) -> Option<String> {
        self.url(index)
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: PreparedRequest) -> CanvasResult<RawResponse> {
        let url = request.url.to_string();
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CanvasError::network(url, "scripted transport exhausted")))
    }
}

/// Context over a scripted transport
pub fn scripted_context(transport: &Arc<ScriptedTransport>) -> CanvasContext {
    init_test_logging();
    let config = ClientConfig::new(BASE_URL, "test-token").unwrap();
    CanvasContext::with_transport(&config, Arc::clone(transport) as Arc<dyn Transport>).unwrap()
}

/// One page response, optionally pointing at a continuation
pub fn page(items: Value, next: Option<&str>) -> CanvasResult<RawResponse> {
    let response = RawResponse::ok(items);
    Ok(match next {
        Some(next) => response.with_next(Cursor::from_string(next.to_owned())),
        None => response,
    })
}

/// Continuation URL for a page number on the scripted base URL
pub fn next_url(path: &str, page: u32) -> String {
    format!("{BASE_URL}{path}?page={page}&per_page=2")
}

pub fn user_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "sortable_name": name,
        "short_name": name,
        "login_id": format!("user{id}"),
    })
}

pub fn course_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "course_code": format!("C-{id}"),
        "workflow_state": "available",
        "start_at": "2025-01-13T08:00:00Z",
        "end_at": null,
        "enrollments": [
            { "type": "student", "role": "StudentEnrollment", "user_id": 7, "enrollment_state": "active" }
        ],
    })
}

pub fn assignment_json(id: u64, course_id: u64) -> Value {
    json!({
        "id": id,
        "course_id": course_id,
        "name": format!("Assignment {id}"),
        "description": "<p>Read chapter 3</p>",
        "due_at": "2025-02-01T23:59:00Z",
        "points_possible": 10.0,
        "grading_type": "points",
        "submission_types": ["online_upload", "online_text_entry"],
        "html_url": format!("{BASE_URL}/courses/{course_id}/assignments/{id}"),
        "published": true,
    })
}

pub fn quiz_json(id: u64) -> Value {
    json!({
        "id": id,
        "title": format!("Quiz {id}"),
        "quiz_type": "assignment",
        "due_at": null,
        "points_possible": 5.0,
        "question_count": 4,
        "assignment_id": 900 + id,
        "published": true,
    })
}

pub fn assignment_todo_json(id: u64) -> Value {
    json!({
        "type": "grading",
        "assignment": assignment_json(id, 1),
        "ignore": format!("{BASE_URL}/api/v1/users/self/todo/assignment_{id}/grading?permanent=0"),
        "ignore_permanently": format!("{BASE_URL}/api/v1/users/self/todo/assignment_{id}/grading?permanent=1"),
        "html_url": format!("{BASE_URL}/courses/1/gradebook/speed_grader?assignment_id={id}"),
        "needs_grading_count": 3,
        "context_type": "Course",
        "course_id": 1,
    })
}

pub fn quiz_todo_json(id: u64) -> Value {
    json!({
        "type": "submitting",
        "quiz": quiz_json(id),
        "ignore": format!("{BASE_URL}/api/v1/users/self/todo/quiz_{id}/submitting?permanent=0"),
        "ignore_permanently": format!("{BASE_URL}/api/v1/users/self/todo/quiz_{id}/submitting?permanent=1"),
        "context_type": "Course",
        "course_id": 1,
    })
}
