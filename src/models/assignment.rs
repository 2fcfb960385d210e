// ABOUTME: Assignment domain object, its wire record and create/update parameters
// ABOUTME: Grading and submission types resolve through the wire enumeration tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use canvas_core::{CanvasResult, WireEnum};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::WeakContext;
use crate::factory::{empty_if_null, parse_all, FromWire};
use crate::models::enums::{GradingType, SubmissionType};

/// Assignment record as sent by the API
#[derive(Debug, Deserialize)]
pub struct AssignmentRecord {
    id: u64,
    course_id: u64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    points_possible: Option<f64>,
    grading_type: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    submission_types: Vec<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    published: bool,
    #[serde(default)]
    quiz_id: Option<u64>,
}

/// Canvas assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Assignment id
    pub id: u64,
    /// Owning course
    pub course_id: u64,
    /// Title
    pub name: String,
    /// HTML description
    pub description: Option<String>,
    /// Due date, `None` when undated
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum score
    pub points_possible: Option<f64>,
    /// Grading scheme
    pub grading_type: GradingType,
    /// Accepted submission types; may be empty
    pub submission_types: Vec<SubmissionType>,
    /// Browser URL
    pub html_url: Option<String>,
    /// Whether students can see it
    pub published: bool,
    /// Backing quiz, for quiz assignments
    pub quiz_id: Option<u64>,
}

impl Assignment {
    /// Whether a submission of this type is accepted
    #[must_use]
    pub fn accepts(&self, submission_type: SubmissionType) -> bool {
        self.submission_types.contains(&submission_type)
    }
}

impl FromWire for Assignment {
    type Wire = AssignmentRecord;
    const RECORD: &'static str = "assignment";

    fn from_wire(wire: AssignmentRecord, _context: &WeakContext) -> CanvasResult<Self> {
        Ok(Self {
            id: wire.id,
            course_id: wire.course_id,
            name: wire.name,
            description: wire.description,
            due_at: wire.due_at,
            points_possible: wire.points_possible,
            grading_type: GradingType::parse_token(&wire.grading_type)?,
            submission_types: parse_all(&wire.submission_types)?,
            html_url: wire.html_url,
            published: wire.published,
            quiz_id: wire.quiz_id,
        })
    }
}

/// Fields for creating or updating an assignment
///
/// Unset fields are omitted from the request, so an update only touches
/// what was set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssignmentParams {
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// HTML description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_possible: Option<f64>,
    /// Grading scheme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grading_type: Option<GradingType>,
    /// Accepted submission types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_types: Option<Vec<SubmissionType>>,
    /// Publication flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl AssignmentParams {
    /// Parameters with a title
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the due date
    #[must_use]
    pub const fn due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Set the maximum score
    #[must_use]
    pub const fn points_possible(mut self, points: f64) -> Self {
        self.points_possible = Some(points);
        self
    }

    /// Set the grading scheme
    #[must_use]
    pub const fn grading_type(mut self, grading_type: GradingType) -> Self {
        self.grading_type = Some(grading_type);
        self
    }

    /// Set the accepted submission types
    #[must_use]
    pub fn submission_types(mut self, types: impl IntoIterator<Item = SubmissionType>) -> Self {
        self.submission_types = Some(types.into_iter().collect());
        self
    }

    /// Set the publication flag
    #[must_use]
    pub const fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    /// Request body, wrapped the way the API expects: `{"assignment": {...}}`
    #[must_use]
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({ "assignment": self })
    }
}
