// ABOUTME: Tests for the domain factory and the domain models it builds
// ABOUTME: Covers polymorphic dispatch, nullable fields, enum strictness and follow-up calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use canvas_client::factory::DomainFactory;
use canvas_client::models::{
    Assignment, Course, CourseWorkflowState, EnrollmentState, EnrollmentType, GradingType, Quiz,
    QuizType, SubmissionType, TodoItem, TodoPayload, TodoType, User,
};
use canvas_client::resources::courses::get_course;
use canvas_client::resources::todo::list_todo;
use canvas_client::stream::{collect_all, StreamConfig};
use canvas_client::transport::Method;
use canvas_core::{CanvasError, ErrorKind};
use common::{
    assignment_json, assignment_todo_json, course_json, page, quiz_json, quiz_todo_json,
    scripted_context, ScriptedTransport,
};
use futures_util::StreamExt;
use serde_json::{json, Value};

fn with_field(mut record: Value, key: &str, value: Value) -> Value {
    record[key] = value;
    record
}

fn without_field(mut record: Value, key: &str) -> Value {
    record.as_object_mut().unwrap().remove(key);
    record
}

#[test]
fn test_user_optional_fields_stay_absent() {
    let user: User = DomainFactory::detached()
        .build(json!({ "id": 3, "name": "Ada" }))
        .unwrap();

    assert_eq!(user.id, 3);
    assert_eq!(user.name, "Ada");
    assert!(user.email.is_none());
    assert!(user.login_id.is_none());
}

#[test]
fn test_user_missing_required_field_is_malformed() {
    let error = DomainFactory::detached()
        .build::<User>(json!({ "name": "No id" }))
        .unwrap_err();

    assert!(matches!(error, CanvasError::MalformedPayload { .. }));
    assert_eq!(error.kind(), ErrorKind::Communication);
}

#[test]
fn test_assignment_resolves_enums() {
    let assignment: Assignment = DomainFactory::detached()
        .build(assignment_json(4, 2))
        .unwrap();

    assert_eq!(assignment.grading_type, GradingType::Points);
    assert_eq!(
        assignment.submission_types,
        vec![SubmissionType::OnlineUpload, SubmissionType::OnlineTextEntry]
    );
    assert!(assignment.accepts(SubmissionType::OnlineUpload));
    assert!(!assignment.accepts(SubmissionType::OnPaper));
    assert!(assignment.due_at.is_some());
}

#[test]
fn test_null_and_absent_lists_become_empty() {
    let factory = DomainFactory::detached();

    let null_list: Assignment = factory
        .build(with_field(assignment_json(1, 1), "submission_types", Value::Null))
        .unwrap();
    let absent_list: Assignment = factory
        .build(without_field(assignment_json(2, 1), "submission_types"))
        .unwrap();
    let course: Course = factory
        .build(with_field(course_json(1, "Biology"), "enrollments", Value::Null))
        .unwrap();

    assert!(null_list.submission_types.is_empty());
    assert!(absent_list.submission_types.is_empty());
    assert!(course.enrollments.is_empty());
}

#[test]
fn test_undeclared_token_on_strict_field_is_communication() {
    let error = DomainFactory::detached()
        .build::<Assignment>(with_field(
            assignment_json(1, 1),
            "grading_type",
            json!("vibes"),
        ))
        .unwrap_err();

    match &error {
        CanvasError::UndeclaredEnumValue {
            enumeration,
            observed,
            expected,
        } => {
            assert_eq!(*enumeration, "GradingType");
            assert_eq!(observed, "vibes");
            assert!(expected.contains(&"points"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(error.kind(), ErrorKind::Communication);
}

#[test]
fn test_undeclared_token_in_list_is_communication() {
    let error = DomainFactory::detached()
        .build::<Assignment>(with_field(
            assignment_json(1, 1),
            "submission_types",
            json!(["online_upload", "carrier_pigeon"]),
        ))
        .unwrap_err();

    assert!(matches!(error, CanvasError::UndeclaredEnumValue { .. }));
}

#[test]
fn test_tolerant_field_maps_unknown_token_to_none() {
    let course: Course = DomainFactory::detached()
        .build(with_field(
            course_json(1, "Biology"),
            "workflow_state",
            json!("archived_someday"),
        ))
        .unwrap();

    assert!(course.workflow_state.is_none());
}

#[test]
fn test_course_enrollments_decode() {
    let course: Course = DomainFactory::detached()
        .build(course_json(5, "Chemistry"))
        .unwrap();

    assert_eq!(course.workflow_state, Some(CourseWorkflowState::Available));
    assert_eq!(course.enrollments.len(), 1);
    assert_eq!(course.enrollments[0].enrollment_type, EnrollmentType::Student);
    assert_eq!(course.enrollments[0].state, Some(EnrollmentState::Active));
    assert!(course.has_role(EnrollmentType::Student));
    assert!(!course.has_role(EnrollmentType::Teacher));
}

#[test]
fn test_quiz_decodes() {
    let quiz: Quiz = DomainFactory::detached().build(quiz_json(3)).unwrap();

    assert_eq!(quiz.quiz_type, QuizType::Assignment);
    assert_eq!(quiz.question_count, Some(4));
    assert!(quiz.due_at.is_none());
}

#[test]
fn test_todo_dispatches_assignment_payload() {
    let item: TodoItem = DomainFactory::detached()
        .build(assignment_todo_json(12))
        .unwrap();

    assert_eq!(item.todo_type, TodoType::Grading);
    assert_eq!(item.needs_grading_count, Some(3));
    match &item.payload {
        TodoPayload::Assignment(assignment) => assert_eq!(assignment.id, 12),
        TodoPayload::Quiz(_) => panic!("expected an assignment payload"),
    }
    assert_eq!(item.payload.title(), "Assignment 12");
}

#[test]
fn test_todo_dispatches_quiz_payload() {
    let item: TodoItem = DomainFactory::detached()
        .build(quiz_todo_json(6))
        .unwrap();

    assert_eq!(item.todo_type, TodoType::Submitting);
    assert!(matches!(&item.payload, TodoPayload::Quiz(quiz) if quiz.id == 6));
}

#[test]
fn test_todo_without_payload_is_bad_api_state() {
    let record = without_field(assignment_todo_json(1), "assignment");
    let error = DomainFactory::detached()
        .build::<TodoItem>(record)
        .unwrap_err();

    assert!(matches!(error, CanvasError::BadApiState { .. }));
    assert_eq!(error.kind(), ErrorKind::BadApiState);
}

#[test]
fn test_todo_with_null_payloads_is_bad_api_state() {
    let record = with_field(
        with_field(assignment_todo_json(1), "assignment", Value::Null),
        "quiz",
        Value::Null,
    );
    let error = DomainFactory::detached()
        .build::<TodoItem>(record)
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::BadApiState);
}

#[test]
fn test_todo_with_both_payloads_is_bad_api_state() {
    let record = with_field(assignment_todo_json(1), "quiz", quiz_json(1));
    let error = DomainFactory::detached()
        .build::<TodoItem>(record)
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::BadApiState);
}

#[test]
fn test_todo_with_undeclared_type_is_communication() {
    let record = with_field(assignment_todo_json(1), "type", json!("reviewing"));
    let error = DomainFactory::detached()
        .build::<TodoItem>(record)
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Communication);
}

#[tokio::test]
async fn test_todo_ignore_follows_up_through_weak_context() {
    let transport = ScriptedTransport::new([
        page(json!([assignment_todo_json(12)]), None),
        page(Value::Null, None),
    ]);
    let context = scripted_context(&transport).as_user(77_u64);

    let items = collect_all(list_todo(&context, StreamConfig::default()))
        .await
        .unwrap();
    items[0].ignore().await.unwrap();

    let follow_up = &transport.requests()[1];
    assert_eq!(follow_up.method, Method::Delete);
    assert_eq!(
        follow_up.url.path(),
        "/api/v1/users/self/todo/assignment_12/grading"
    );
    assert_eq!(transport.query_value(1, "permanent"), Some("0".to_owned()));
    // Follow-ups keep the identity of the listing handle
    assert_eq!(transport.query_value(1, "as_user_id"), Some("77".to_owned()));
}

#[tokio::test]
async fn test_todo_ignore_permanently_uses_its_own_url() {
    let transport = ScriptedTransport::new([
        page(json!([quiz_todo_json(4)]), None),
        page(Value::Null, None),
    ]);
    let context = scripted_context(&transport);

    let mut items = list_todo(&context, StreamConfig::default());
    let item = items.next().await.unwrap().unwrap();
    item.ignore_permanently().await.unwrap();

    assert_eq!(transport.query_value(1, "permanent"), Some("1".to_owned()));
}

#[tokio::test]
async fn test_follow_up_after_context_dropped_fails() {
    let transport = ScriptedTransport::new([page(json!([assignment_todo_json(1)]), None)]);
    let context = scripted_context(&transport);

    let items = collect_all(list_todo(&context, StreamConfig::default()))
        .await
        .unwrap();
    drop(context);

    let error = items[0].ignore().await.unwrap_err();
    assert!(matches!(error, CanvasError::ContextDropped { .. }));
    assert_eq!(error.kind(), ErrorKind::Communication);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_explicit_context_follow_up_works_after_owner_dropped() {
    let transport = ScriptedTransport::new([
        page(json!([assignment_todo_json(1)]), None),
        page(Value::Null, None),
    ]);
    let context = scripted_context(&transport);
    let items = collect_all(list_todo(&context, StreamConfig::default()))
        .await
        .unwrap();
    drop(context);

    let fresh = scripted_context(&transport);
    items[0].ignore_with(&fresh).await.unwrap();
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_todo_without_ignore_url_is_bad_api_state() {
    let transport = ScriptedTransport::new([page(
        json!([without_field(assignment_todo_json(1), "ignore")]),
        None,
    )]);
    let context = scripted_context(&transport);

    let items = collect_all(list_todo(&context, StreamConfig::default()))
        .await
        .unwrap();
    let error = items[0].ignore().await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::BadApiState);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_course_assignments_follow_up() {
    let transport = ScriptedTransport::new([
        page(course_json(31, "Physics"), None),
        page(json!([assignment_json(1, 31), assignment_json(2, 31)]), None),
    ]);
    let context = scripted_context(&transport);

    let course = get_course(&context, 31)
        .await
        .unwrap();
    let assignments = collect_all(course.assignments(StreamConfig::default()).unwrap())
        .await
        .unwrap();

    assert_eq!(assignments.len(), 2);
    assert_eq!(transport.url(1).path(), "/api/v1/courses/31/assignments");
}
