// ABOUTME: Resource functions mapping Canvas REST endpoints onto domain objects
// ABOUTME: Each function builds an ApiRequest and hands it to the domain factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Typed access to the REST endpoints the client covers.
//!
//! Single-object reads and writes are `async fn`s returning the domain object.
//! Listings return a lazy [`ItemStream`](crate::stream::ItemStream); nothing is
//! fetched until the stream is polled.

/// Assignment listing, lookup, creation and update
pub mod assignments;
/// Course listing and lookup
pub mod courses;
/// Quiz lookup
pub mod quizzes;
/// Current user's todo feed
pub mod todo;
/// User profiles
pub mod users;

use canvas_core::constants::API_PREFIX;

/// Path under the API prefix, e.g. `api_path("courses/1")` is `/api/v1/courses/1`
pub(crate) fn api_path(suffix: &str) -> String {
    format!("{API_PREFIX}/{}", suffix.trim_start_matches('/'))
}
