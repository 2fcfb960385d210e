// ABOUTME: Closed error taxonomy for Canvas API calls with HTTP status classification
// ABOUTME: Every failure maps to exactly one of Communication, DoesNotExist or BadApiState
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Taxonomy
//!
//! Failures are classified once, at the transport or decode boundary, and then
//! surfaced unchanged. There is no retry and no silent recovery anywhere in the
//! pipeline: every [`CanvasError`] is terminal for the call that produced it.
//!
//! Variants carry enough detail (status, URL, body excerpt, observed token) to
//! tell a local fault from a contract violation by the remote service, while
//! [`CanvasError::kind`] collapses them onto the three [`ErrorKind`]s callers
//! branch on.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::constants::BODY_EXCERPT_LIMIT;

/// The three kinds of failure a caller can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure, non-success status, malformed payload or undeclared enum token
    Communication,
    /// The referenced entity is confirmed absent by the remote service
    DoesNotExist,
    /// The response contradicts a documented invariant of the API
    BadApiState,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Communication => "communication",
            Self::DoesNotExist => "does_not_exist",
            Self::BadApiState => "bad_api_state",
        };
        f.write_str(label)
    }
}

/// Failure of a Canvas API operation
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Connection, TLS or timeout failure before a response was received
    #[error("network error calling {url}: {message}")]
    Network {
        /// Request URL, when known
        url: String,
        /// Underlying transport message
        message: String,
    },

    /// Non-success HTTP status other than not-found
    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
        /// Response body excerpt
        body: String,
    },

    /// The service reported the entity as absent
    #[error("resource not found at {url}: {body}")]
    NotFound {
        /// Request URL identifying the missing entity
        url: String,
        /// Response body excerpt
        body: String,
    },

    /// Payload could not be decoded into the expected wire record
    #[error("malformed {record} payload: {message}")]
    MalformedPayload {
        /// Wire record being decoded
        record: String,
        /// Decoder message
        message: String,
    },

    /// Enumeration token outside the declared closed set
    #[error(
        "server returned undeclared value {observed:?} for enumeration {enumeration}; expected one of [{}]",
        .expected.join(", ")
    )]
    UndeclaredEnumValue {
        /// Enumeration name
        enumeration: &'static str,
        /// Token received from the service
        observed: String,
        /// Tokens declared for the enumeration
        expected: Vec<&'static str>,
    },

    /// A request URL could not be built
    #[error("invalid request URL {url}: {message}")]
    InvalidUrl {
        /// Offending URL or path
        url: String,
        /// Parser message
        message: String,
    },

    /// Absolute URL (cursor or follow-up link) outside the configured origin
    #[error("refusing to follow {url}: origin differs from {origin}")]
    ForeignUrl {
        /// URL supplied by the service
        url: String,
        /// Configured base origin
        origin: String,
    },

    /// Follow-up attempted after the owning context was dropped
    #[error("transport context has been dropped; {operation} needs a live context")]
    ContextDropped {
        /// Follow-up operation that was attempted
        operation: &'static str,
    },

    /// Response inconsistent with a documented invariant
    #[error("inconsistent {record} from API: {message}")]
    BadApiState {
        /// Wire record that broke the invariant
        record: String,
        /// Description of the violated invariant
        message: String,
    },
}

impl CanvasError {
    /// Classify this failure onto the closed taxonomy
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::DoesNotExist,
            Self::BadApiState { .. } => ErrorKind::BadApiState,
            Self::Network { .. }
            | Self::HttpStatus { .. }
            | Self::MalformedPayload { .. }
            | Self::UndeclaredEnumValue { .. }
            | Self::InvalidUrl { .. }
            | Self::ForeignUrl { .. }
            | Self::ContextDropped { .. } => ErrorKind::Communication,
        }
    }

    /// Classify a non-success HTTP status
    ///
    /// 404 is the only status treated as confirmed absence; everything else is
    /// a communication failure. The body is truncated to a short excerpt.
    #[must_use]
    pub fn from_status(status: u16, url: impl Into<String>, body: &str) -> Self {
        let url = url.into();
        let body = excerpt(body);
        if status == 404 {
            Self::NotFound { url, body }
        } else {
            Self::HttpStatus { status, url, body }
        }
    }

    /// Create a network error
    #[must_use]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed payload error for the named record
    #[must_use]
    pub fn malformed(record: impl Into<String>, message: impl Display) -> Self {
        Self::MalformedPayload {
            record: record.into(),
            message: message.to_string(),
        }
    }

    /// Create a bad API state error for the named record
    #[must_use]
    pub fn bad_api_state(record: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadApiState {
            record: record.into(),
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Result alias for Canvas API operations
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Truncate a response body for inclusion in an error message
#[must_use]
pub fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_owned(),
    }
}

#[cfg(feature = "transport-errors")]
impl From<reqwest::Error> for CanvasError {
    fn from(error: reqwest::Error) -> Self {
        let url = error.url().map(ToString::to_string).unwrap_or_default();
        if error.is_decode() {
            return Self::MalformedPayload {
                record: url,
                message: error.to_string(),
            };
        }
        if let Some(status) = error.status() {
            return Self::from_status(status.as_u16(), url, &error.to_string());
        }
        Self::Network {
            url,
            message: error.to_string(),
        }
    }
}
