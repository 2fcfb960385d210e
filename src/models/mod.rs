// ABOUTME: Domain objects built from Canvas wire records and the protocol enumerations
// ABOUTME: Users, courses, assignments, quizzes and the polymorphic todo feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models.
//!
//! Each type pairs a `*Record` wire struct (what the API sends, decoded by
//! `serde`) with an immutable domain object built through
//! [`FromWire`](crate::factory::FromWire). Field coverage is limited to what
//! the client needs; unknown wire fields are ignored.

/// Assignments and the parameters to create or update them
pub mod assignment;
/// Courses and their enrollment summaries
pub mod course;
/// Protocol enumerations and the wire registry
pub mod enums;
/// Quizzes
pub mod quiz;
/// Polymorphic todo feed items
pub mod todo;
/// Users
pub mod user;

pub use assignment::{Assignment, AssignmentParams, AssignmentRecord};
pub use course::{Course, CourseRecord, Enrollment, EnrollmentRecord};
pub use enums::{
    wire_registry, CourseWorkflowState, EnrollmentState, EnrollmentType, GradingType, QuizType,
    SubmissionType, TodoType,
};
pub use quiz::{Quiz, QuizRecord};
pub use todo::{TodoItem, TodoPayload, TodoRecord};
pub use user::{User, UserRecord};
