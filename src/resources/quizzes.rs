// ABOUTME: Quiz endpoints of a course
// ABOUTME: Single quiz lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use canvas_core::CanvasResult;

use crate::context::CanvasContext;
use crate::factory::DomainFactory;
use crate::models::Quiz;
use crate::resources::api_path;
use crate::transport::ApiRequest;

/// Fetch one quiz
///
/// # Errors
///
/// Returns `DoesNotExist` for unknown ids, or the request or decode failure
pub async fn get_quiz(context: &CanvasContext, course_id: u64, quiz_id: u64) -> CanvasResult<Quiz> {
    DomainFactory::fetch(
        context,
        ApiRequest::get(api_path(&format!("courses/{course_id}/quizzes/{quiz_id}"))),
    )
    .await
}
