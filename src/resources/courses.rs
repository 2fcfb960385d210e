// ABOUTME: Course endpoints with enrollment filters and optional includes
// ABOUTME: Lists the caller's courses lazily and fetches single courses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use canvas_core::{CanvasResult, WireEnum};

use crate::context::CanvasContext;
use crate::factory::DomainFactory;
use crate::models::{Course, EnrollmentState, EnrollmentType};
use crate::resources::api_path;
use crate::stream::{ItemStream, StreamConfig};
use crate::transport::ApiRequest;

/// Filters for [`list_courses`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Only courses where the caller has this role
    pub enrollment_type: Option<EnrollmentType>,
    /// Only enrollments in this state
    pub enrollment_state: Option<EnrollmentState>,
    /// Extra data to embed, sent as `include[]` (e.g. `total_students`)
    pub include: Vec<String>,
}

impl CourseFilter {
    /// Courses where the caller has the given role
    #[must_use]
    pub fn enrolled_as(role: EnrollmentType) -> Self {
        Self {
            enrollment_type: Some(role),
            ..Self::default()
        }
    }

    /// Restrict to enrollments in a state
    #[must_use]
    pub const fn in_state(mut self, state: EnrollmentState) -> Self {
        self.enrollment_state = Some(state);
        self
    }

    /// Ask for an extra `include[]` field
    #[must_use]
    pub fn include(mut self, field: impl Into<String>) -> Self {
        self.include.push(field.into());
        self
    }

    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(role) = self.enrollment_type {
            request = request.query("enrollment_type", role.to_token());
        }
        if let Some(state) = self.enrollment_state {
            request = request.query("enrollment_state", state.to_token());
        }
        request.query_pairs(self.include.iter().map(|field| ("include[]", field)))
    }
}

/// Stream the courses of the user the context acts as
#[must_use]
pub fn list_courses(
    context: &CanvasContext,
    filter: &CourseFilter,
    config: StreamConfig,
) -> ItemStream<Course> {
    let request = filter.apply(ApiRequest::get(api_path("courses")));
    DomainFactory::stream(context, request, config)
}

/// Fetch one course
///
/// # Errors
///
/// Returns `DoesNotExist` for unknown or inaccessible ids, or the request or decode failure
pub async fn get_course(context: &CanvasContext, course_id: u64) -> CanvasResult<Course> {
    DomainFactory::fetch(
        context,
        ApiRequest::get(api_path(&format!("courses/{course_id}"))),
    )
    .await
}
