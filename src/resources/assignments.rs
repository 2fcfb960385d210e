// ABOUTME: Assignment endpoints of a course
// ABOUTME: Lazy listing, lookup, creation and partial update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use canvas_core::CanvasResult;
use tracing::info;

use crate::context::CanvasContext;
use crate::factory::DomainFactory;
use crate::models::{Assignment, AssignmentParams};
use crate::resources::api_path;
use crate::stream::{ItemStream, StreamConfig};
use crate::transport::ApiRequest;

fn assignments_path(course_id: u64) -> String {
    api_path(&format!("courses/{course_id}/assignments"))
}

/// Stream the assignments of a course
#[must_use]
pub fn list_assignments(
    context: &CanvasContext,
    course_id: u64,
    config: StreamConfig,
) -> ItemStream<Assignment> {
    DomainFactory::stream(
        context,
        ApiRequest::get(assignments_path(course_id)),
        config,
    )
}

/// Fetch one assignment
///
/// # Errors
///
/// Returns `DoesNotExist` for unknown ids, or the request or decode failure
pub async fn get_assignment(
    context: &CanvasContext,
    course_id: u64,
    assignment_id: u64,
) -> CanvasResult<Assignment> {
    let path = format!("{}/{assignment_id}", assignments_path(course_id));
    DomainFactory::fetch(context, ApiRequest::get(path)).await
}

/// Create an assignment and return it as stored
///
/// # Errors
///
/// Returns the request or decode failure
pub async fn create_assignment(
    context: &CanvasContext,
    course_id: u64,
    params: &AssignmentParams,
) -> CanvasResult<Assignment> {
    let assignment: Assignment = DomainFactory::fetch(
        context,
        ApiRequest::post(assignments_path(course_id), params.to_body()),
    )
    .await?;
    info!(course_id, assignment_id = assignment.id, "assignment created");
    Ok(assignment)
}

/// Update the fields set in `params` and return the stored assignment
///
/// # Errors
///
/// Returns `DoesNotExist` for unknown ids, or the request or decode failure
pub async fn update_assignment(
    context: &CanvasContext,
    course_id: u64,
    assignment_id: u64,
    params: &AssignmentParams,
) -> CanvasResult<Assignment> {
    let path = format!("{}/{assignment_id}", assignments_path(course_id));
    let assignment = DomainFactory::fetch(context, ApiRequest::put(path, params.to_body())).await?;
    info!(course_id, assignment_id, "assignment updated");
    Ok(assignment)
}
