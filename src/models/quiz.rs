// ABOUTME: Quiz domain object and its wire record
// ABOUTME: Quiz kind resolves through the wire enumeration tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use canvas_core::{CanvasResult, WireEnum};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::context::WeakContext;
use crate::factory::FromWire;
use crate::models::enums::QuizType;

/// Quiz record as sent by the API
#[derive(Debug, Deserialize)]
pub struct QuizRecord {
    id: u64,
    title: String,
    quiz_type: String,
    #[serde(default)]
    due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    points_possible: Option<f64>,
    #[serde(default)]
    question_count: Option<u32>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    assignment_id: Option<u64>,
    #[serde(default)]
    published: bool,
}

/// Canvas quiz
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    /// Quiz id
    pub id: u64,
    /// Title
    pub title: String,
    /// Kind of quiz
    pub quiz_type: QuizType,
    /// Due date
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum score
    pub points_possible: Option<f64>,
    /// Number of questions
    pub question_count: Option<u32>,
    /// Browser URL
    pub html_url: Option<String>,
    /// Backing assignment, for graded quizzes
    pub assignment_id: Option<u64>,
    /// Whether students can see it
    pub published: bool,
}

impl FromWire for Quiz {
    type Wire = QuizRecord;
    const RECORD: &'static str = "quiz";

    fn from_wire(wire: QuizRecord, _context: &WeakContext) -> CanvasResult<Self> {
        Ok(Self {
            id: wire.id,
            title: wire.title,
            quiz_type: QuizType::parse_token(&wire.quiz_type)?,
            due_at: wire.due_at,
            points_possible: wire.points_possible,
            question_count: wire.question_count,
            html_url: wire.html_url,
            assignment_id: wire.assignment_id,
            published: wire.published,
        })
    }
}
