// ABOUTME: Polymorphic todo feed items carrying either an assignment or a quiz payload
// ABOUTME: Resolves the payload discriminant once and offers ignore follow-ups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Todo feed items.
//!
//! The wire record has two mutually exclusive optional payloads, `assignment`
//! and `quiz`. Exactly one must be present; anything else is reported as
//! `BadApiState` rather than guessed at.

use canvas_core::{CanvasError, CanvasResult, WireEnum};
use serde::Deserialize;
use tracing::debug;

use crate::context::{CanvasContext, WeakContext};
use crate::factory::FromWire;
use crate::models::assignment::{Assignment, AssignmentRecord};
use crate::models::enums::TodoType;
use crate::models::quiz::{Quiz, QuizRecord};
use crate::transport::{ApiRequest, Method, RequestTarget};

/// Todo record as sent by the API
#[derive(Debug, Deserialize)]
pub struct TodoRecord {
    #[serde(rename = "type")]
    todo_type: String,
    #[serde(default)]
    assignment: Option<AssignmentRecord>,
    #[serde(default)]
    quiz: Option<QuizRecord>,
    #[serde(default)]
    ignore: Option<String>,
    #[serde(default)]
    ignore_permanently: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    needs_grading_count: Option<u32>,
    #[serde(default)]
    context_type: Option<String>,
    #[serde(default)]
    course_id: Option<u64>,
    #[serde(default)]
    group_id: Option<u64>,
}

/// The work item a todo entry refers to
#[derive(Debug, Clone, PartialEq)]
pub enum TodoPayload {
    /// An assignment to submit or grade
    Assignment(Assignment),
    /// A quiz to take
    Quiz(Quiz),
}

impl TodoPayload {
    /// Title of the underlying item
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Assignment(assignment) => &assignment.name,
            Self::Quiz(quiz) => &quiz.title,
        }
    }
}

/// Entry of the current user's todo list
#[derive(Debug, Clone)]
pub struct TodoItem {
    /// Why the item is listed
    pub todo_type: TodoType,
    /// Assignment or quiz
    pub payload: TodoPayload,
    /// Browser URL
    pub html_url: Option<String>,
    /// Submissions awaiting grading, for `grading` items
    pub needs_grading_count: Option<u32>,
    /// `Course` or `Group`
    pub context_type: Option<String>,
    /// Owning course
    pub course_id: Option<u64>,
    /// Owning group
    pub group_id: Option<u64>,
    ignore_url: Option<String>,
    ignore_permanently_url: Option<String>,
    context: WeakContext,
}

impl TodoItem {
    /// Hide this item until it changes
    ///
    /// # Errors
    ///
    /// Returns `ContextDropped` if the listing context is gone, `BadApiState`
    /// if the record carried no ignore URL, or the request failure
    pub async fn ignore(&self) -> CanvasResult<()> {
        let context = self.context.upgrade("todo ignore")?;
        self.ignore_with(&context).await
    }

    /// Hide this item for good
    ///
    /// # Errors
    ///
    /// Same as [`TodoItem::ignore`]
    pub async fn ignore_permanently(&self) -> CanvasResult<()> {
        let context = self.context.upgrade("todo ignore_permanently")?;
        self.ignore_permanently_with(&context).await
    }

    /// [`TodoItem::ignore`] through an explicit context
    ///
    /// # Errors
    ///
    /// Same as [`TodoItem::ignore`]
    pub async fn ignore_with(&self, context: &CanvasContext) -> CanvasResult<()> {
        dismiss(context, "ignore", self.ignore_url.as_deref()).await
    }

    /// [`TodoItem::ignore_permanently`] through an explicit context
    ///
    /// # Errors
    ///
    /// Same as [`TodoItem::ignore`]
    pub async fn ignore_permanently_with(&self, context: &CanvasContext) -> CanvasResult<()> {
        dismiss(
            context,
            "ignore_permanently",
            self.ignore_permanently_url.as_deref(),
        )
        .await
    }
}

async fn dismiss(context: &CanvasContext, field: &str, url: Option<&str>) -> CanvasResult<()> {
    let url = url.ok_or_else(|| {
        CanvasError::bad_api_state(TodoItem::RECORD, format!("todo item has no {field} URL"))
    })?;
    let target = if url.starts_with('/') {
        RequestTarget::Path(url.to_owned())
    } else {
        RequestTarget::Absolute(url.to_owned())
    };
    context.send(ApiRequest::new(Method::Delete, target)).await?;
    debug!(field, "todo item dismissed");
    Ok(())
}

impl FromWire for TodoItem {
    type Wire = TodoRecord;
    const RECORD: &'static str = "todo item";

    fn from_wire(wire: TodoRecord, context: &WeakContext) -> CanvasResult<Self> {
        let todo_type = TodoType::parse_token(&wire.todo_type)?;
        let payload = match (wire.assignment, wire.quiz) {
            (Some(assignment), None) => {
                TodoPayload::Assignment(Assignment::from_wire(assignment, context)?)
            }
            (None, Some(quiz)) => TodoPayload::Quiz(Quiz::from_wire(quiz, context)?),
            (None, None) => {
                return Err(CanvasError::bad_api_state(
                    Self::RECORD,
                    "neither an assignment nor a quiz payload is present",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(CanvasError::bad_api_state(
                    Self::RECORD,
                    "both an assignment and a quiz payload are present",
                ))
            }
        };

        Ok(Self {
            todo_type,
            payload,
            html_url: wire.html_url,
            needs_grading_count: wire.needs_grading_count,
            context_type: wire.context_type,
            course_id: wire.course_id,
            group_id: wire.group_id,
            ignore_url: wire.ignore,
            ignore_permanently_url: wire.ignore_permanently,
            context: context.clone(),
        })
    }
}
