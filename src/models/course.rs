// ABOUTME: Course domain object with its enrollment summaries and follow-up listings
// ABOUTME: Workflow state tolerates unknown tokens; enrollment roles must be declared
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use canvas_core::{CanvasResult, WireEnum};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::context::{CanvasContext, WeakContext};
use crate::factory::{empty_if_null, parse_optional, tolerate_unknown, FromWire};
use crate::models::assignment::Assignment;
use crate::models::enums::{CourseWorkflowState, EnrollmentState, EnrollmentType};
use crate::resources::assignments::list_assignments;
use crate::stream::{ItemStream, StreamConfig};

/// Enrollment summary embedded in a course record
#[derive(Debug, Deserialize)]
pub struct EnrollmentRecord {
    #[serde(rename = "type")]
    enrollment_type: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    user_id: Option<u64>,
    #[serde(default)]
    enrollment_state: Option<String>,
}

/// Course record as sent by the API
#[derive(Debug, Deserialize)]
pub struct CourseRecord {
    id: u64,
    name: String,
    #[serde(default)]
    course_code: Option<String>,
    #[serde(default)]
    workflow_state: Option<String>,
    #[serde(default)]
    start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    total_students: Option<u32>,
    #[serde(default, deserialize_with = "empty_if_null")]
    enrollments: Vec<EnrollmentRecord>,
}

/// Caller's enrollment in a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// Base role
    pub enrollment_type: EnrollmentType,
    /// Custom role name, when the account defines one
    pub role: Option<String>,
    /// Enrolled user
    pub user_id: Option<u64>,
    /// Enrollment state, when included
    pub state: Option<EnrollmentState>,
}

/// Canvas course
#[derive(Debug, Clone)]
pub struct Course {
    /// Course id
    pub id: u64,
    /// Full name
    pub name: String,
    /// Short code, e.g. `BIO-101`
    pub course_code: Option<String>,
    /// Publication state; `None` when absent or not a declared token
    pub workflow_state: Option<CourseWorkflowState>,
    /// Start date
    pub start_at: Option<DateTime<Utc>>,
    /// End date
    pub end_at: Option<DateTime<Utc>>,
    /// Student count, when requested with `include[]=total_students`
    pub total_students: Option<u32>,
    /// Caller's enrollments; empty when not included
    pub enrollments: Vec<Enrollment>,
    context: WeakContext,
}

impl Course {
    /// Whether the caller is enrolled with the given role
    #[must_use]
    pub fn has_role(&self, role: EnrollmentType) -> bool {
        self.enrollments
            .iter()
            .any(|enrollment| enrollment.enrollment_type == role)
    }

    /// Stream this course's assignments through the context that listed the course
    ///
    /// # Errors
    ///
    /// Returns `ContextDropped` if that context no longer exists
    pub fn assignments(&self, config: StreamConfig) -> CanvasResult<ItemStream<Assignment>> {
        let context = self.context.upgrade("course assignments")?;
        Ok(self.assignments_with(&context, config))
    }

    /// Stream this course's assignments through an explicit context
    #[must_use]
    pub fn assignments_with(
        &self,
        context: &CanvasContext,
        config: StreamConfig,
    ) -> ItemStream<Assignment> {
        list_assignments(context, self.id, config)
    }
}

impl FromWire for Enrollment {
    type Wire = EnrollmentRecord;
    const RECORD: &'static str = "enrollment";

    fn from_wire(wire: EnrollmentRecord, _context: &WeakContext) -> CanvasResult<Self> {
        Ok(Self {
            enrollment_type: EnrollmentType::parse_token(&wire.enrollment_type)?,
            role: wire.role,
            user_id: wire.user_id,
            state: parse_optional(wire.enrollment_state.as_deref())?,
        })
    }
}

impl FromWire for Course {
    type Wire = CourseRecord;
    const RECORD: &'static str = "course";

    fn from_wire(wire: CourseRecord, context: &WeakContext) -> CanvasResult<Self> {
        let enrollments = wire
            .enrollments
            .into_iter()
            .map(|record| Enrollment::from_wire(record, context))
            .collect::<CanvasResult<Vec<_>>>()?;

        Ok(Self {
            id: wire.id,
            name: wire.name,
            course_code: wire.course_code,
            workflow_state: tolerate_unknown(Self::RECORD, wire.workflow_state.as_deref()),
            start_at: wire.start_at,
            end_at: wire.end_at,
            total_students: wire.total_students,
            enrollments,
            context: context.clone(),
        })
    }
}
