// ABOUTME: Todo feed of the user the context acts as
// ABOUTME: Streams polymorphic todo items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::context::CanvasContext;
use crate::factory::DomainFactory;
use crate::models::TodoItem;
use crate::resources::api_path;
use crate::stream::{ItemStream, StreamConfig};
use crate::transport::ApiRequest;

/// Stream the todo list of the user the context acts as
///
/// Items that break the one-payload rule end the stream with `BadApiState`.
#[must_use]
pub fn list_todo(context: &CanvasContext, config: StreamConfig) -> ItemStream<TodoItem> {
    DomainFactory::stream(context, ApiRequest::get(api_path("users/self/todo")), config)
}
