// ABOUTME: Request descriptors, raw responses and the transport seam of the Canvas client
// ABOUTME: Transports execute fully prepared requests; contexts decide URL, identity and credential
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Transport Layer
//!
//! A request travels through two shapes:
//!
//! - [`ApiRequest`]: what a resource wants (method, relative path or absolute
//!   follow-up URL, query pairs, JSON body). Built by resource functions and the
//!   page streamer.
//! - [`PreparedRequest`]: what goes on the wire (absolute URL with the identity
//!   override applied, bearer credential). Built by the context.
//!
//! The [`Transport`] trait executes a prepared request and returns a
//! [`RawResponse`] or a classified failure. [`HttpTransport`] is the `reqwest`
//! implementation; tests substitute scripted transports.

mod http;

pub use http::HttpTransport;

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use canvas_core::constants::JSON_HIJACK_PREFIX;
use canvas_core::{CanvasError, CanvasResult, Cursor, Page};
use serde_json::Value;
use url::Url;

use crate::config::AccessToken;

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read
    Get,
    /// Create
    Post,
    /// Update
    Put,
    /// Delete or dismiss
    Delete,
}

impl Method {
    /// Upper-case method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a request is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    /// Path relative to the configured base URL, e.g. `/api/v1/courses`
    Path(String),
    /// Absolute URL handed out by the service (pagination cursor, follow-up link)
    Absolute(String),
}

/// Resource-level request descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path or absolute URL
    pub target: RequestTarget,
    /// Query pairs appended in order (repeated keys allowed, e.g. `include[]`)
    pub query: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Request with no query or body
    #[must_use]
    pub fn new(method: Method, target: RequestTarget) -> Self {
        Self {
            method,
            target,
            query: Vec::new(),
            body: None,
        }
    }

    /// GET a path
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, RequestTarget::Path(path.into()))
    }

    /// POST a JSON body to a path
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, RequestTarget::Path(path.into())).with_body(body)
    }

    /// PUT a JSON body to a path
    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, RequestTarget::Path(path.into())).with_body(body)
    }

    /// DELETE a path
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, RequestTarget::Path(path.into()))
    }

    /// GET the page a cursor points at
    #[must_use]
    pub fn follow(cursor: Cursor) -> Self {
        Self::new(Method::Get, RequestTarget::Absolute(cursor.into_string()))
    }

    /// Append a query pair
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append several query pairs
    #[must_use]
    pub fn query_pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    /// Attach a JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Whether a query key is already present
    #[must_use]
    pub fn has_query(&self, key: &str) -> bool {
        self.query.iter().any(|(k, _)| k == key)
    }
}

/// Fully resolved request handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including query and identity override
    pub url: Url,
    /// JSON body
    pub body: Option<Value>,
    /// Bearer credential
    pub bearer: AccessToken,
}

/// Successful exchange: status, decoded body and continuation
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status (2xx)
    pub status: u16,
    /// Decoded JSON body, `Null` when the body is empty
    pub body: Value,
    /// `rel="next"` cursor from the `Link` header
    pub next: Option<Cursor>,
}

impl RawResponse {
    /// Response carrying a body and no continuation
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            next: None,
        }
    }

    /// Attach a continuation cursor
    #[must_use]
    pub fn with_next(mut self, next: Cursor) -> Self {
        self.next = Some(next);
        self
    }

    /// Split a listing response into its raw records and continuation
    ///
    /// A `null` body is an empty page. Records are left undecoded.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::MalformedPayload`] if the body is not a JSON array
    pub fn into_page(self, record: &str) -> CanvasResult<Page<Value>> {
        let items = match self.body {
            Value::Array(records) => records,
            Value::Null => Vec::new(),
            other => {
                return Err(CanvasError::malformed(
                    record,
                    format!("expected a JSON array page, found {}", json_type(&other)),
                ))
            }
        };
        Ok(Page::new(items, self.next))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One network exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a prepared request
    ///
    /// Non-success statuses, undecodable bodies and connection failures are
    /// returned as classified [`CanvasError`]s.
    async fn execute(&self, request: PreparedRequest) -> CanvasResult<RawResponse>;
}

/// Decode a response body, tolerating the `while(1);` guard and empty bodies
///
/// # Errors
///
/// Returns [`CanvasError::MalformedPayload`] if the body is not JSON
pub fn decode_body(text: &str, url: &str) -> CanvasResult<Value> {
    let trimmed = text.trim_start();
    let json = trimmed
        .strip_prefix(JSON_HIJACK_PREFIX)
        .unwrap_or(trimmed)
        .trim();
    if json.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(json).map_err(|e| CanvasError::malformed(format!("response from {url}"), e))
}
