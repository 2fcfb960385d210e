// ABOUTME: Closed enumerations of the Canvas protocol declared as wire-token tables
// ABOUTME: Registers every enumeration in the process-wide validated registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::OnceLock;

use canvas_core::wire_enum;
use canvas_core::{WireEnumRegistry, WireTableError};

wire_enum! {
    /// Why an item is on the user's todo list
    pub enum TodoType as "TodoType" {
        /// Submissions waiting to be graded
        Grading => "grading",
        /// Work the user still has to submit
        Submitting => "submitting",
    }
}

wire_enum! {
    /// Publication state of a course
    pub enum CourseWorkflowState as "CourseWorkflowState" {
        /// Not yet visible to students
        Unpublished => "unpublished",
        /// Published and active
        Available => "available",
        /// Concluded
        Completed => "completed",
        /// Soft-deleted
        Deleted => "deleted",
    }
}

wire_enum! {
    /// Role of an enrollment in a course
    pub enum EnrollmentType as "EnrollmentType" {
        /// Student
        Student => "student",
        /// Teacher
        Teacher => "teacher",
        /// Teaching assistant
        Ta => "ta",
        /// Observer (e.g. a parent)
        Observer => "observer",
        /// Course designer
        Designer => "designer",
    }
}

wire_enum! {
    /// State of an enrollment
    pub enum EnrollmentState as "EnrollmentState" {
        /// Active enrollment
        Active => "active",
        /// Invitation not yet accepted, or course not yet started
        InvitedOrPending => "invited_or_pending",
        /// Enrollment concluded
        Completed => "completed",
    }
}

wire_enum! {
    /// Accepted ways of submitting an assignment
    pub enum SubmissionType as "SubmissionType" {
        /// No submission
        None => "none",
        /// Handed in on paper
        OnPaper => "on_paper",
        /// Submitted through a quiz
        OnlineQuiz => "online_quiz",
        /// Submitted through a discussion
        DiscussionTopic => "discussion_topic",
        /// Submitted through an external tool
        ExternalTool => "external_tool",
        /// File upload
        OnlineUpload => "online_upload",
        /// Text entry
        OnlineTextEntry => "online_text_entry",
        /// Website URL
        OnlineUrl => "online_url",
        /// Media recording
        MediaRecording => "media_recording",
        /// Annotated document
        StudentAnnotation => "student_annotation",
    }
}

wire_enum! {
    /// How an assignment is graded
    pub enum GradingType as "GradingType" {
        /// Complete / incomplete
        PassFail => "pass_fail",
        /// Percentage
        Percent => "percent",
        /// Letter grade
        LetterGrade => "letter_grade",
        /// GPA scale
        GpaScale => "gpa_scale",
        /// Raw points
        Points => "points",
        /// Not graded
        NotGraded => "not_graded",
    }
}

wire_enum! {
    /// Kind of quiz
    pub enum QuizType as "QuizType" {
        /// Ungraded practice quiz
        PracticeQuiz => "practice_quiz",
        /// Graded quiz
        Assignment => "assignment",
        /// Graded survey
        GradedSurvey => "graded_survey",
        /// Ungraded survey
        Survey => "survey",
    }
}

static REGISTRY: OnceLock<Result<WireEnumRegistry, WireTableError>> = OnceLock::new();

/// Validated registry of every protocol enumeration, built on first use
///
/// # Errors
///
/// Returns the bijection violation found when the tables were built
pub fn wire_registry() -> Result<&'static WireEnumRegistry, WireTableError> {
    REGISTRY
        .get_or_init(|| {
            WireEnumRegistry::builder()
                .register::<TodoType>()
                .register::<CourseWorkflowState>()
                .register::<EnrollmentType>()
                .register::<EnrollmentState>()
                .register::<SubmissionType>()
                .register::<GradingType>()
                .register::<QuizType>()
                .build()
        })
        .as_ref()
        .map_err(Clone::clone)
}
