// ABOUTME: Command implementations for canvas-cli
// ABOUTME: Each command prints to stdout and reports failures through anyhow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use canvas_client::context::CanvasContext;
use canvas_client::models::{EnrollmentType, TodoPayload};
use canvas_client::resources::courses::{list_courses, CourseFilter};
use canvas_client::resources::todo::list_todo;
use canvas_client::resources::users::get_self;
use canvas_client::stream::StreamConfig;
use canvas_client::WireEnum;
use futures_util::StreamExt;
use tracing::warn;

fn limited(limit: Option<usize>) -> StreamConfig {
    limit.map_or_else(StreamConfig::default, |max| {
        StreamConfig::default().with_max_items(max)
    })
}

/// Print the user the context acts as
pub async fn whoami(context: &CanvasContext) -> Result<()> {
    let user = get_self(context).await.context("failed to fetch current user")?;
    println!("{} (id {})", user.name, user.id);
    if let Some(login) = &user.login_id {
        println!("  login: {login}");
    }
    if let Some(email) = &user.email {
        println!("  email: {email}");
    }
    Ok(())
}

/// Print the user's courses, one per line
pub async fn courses(context: &CanvasContext, limit: Option<usize>, teacher: bool) -> Result<()> {
    let filter = if teacher {
        CourseFilter::enrolled_as(EnrollmentType::Teacher)
    } else {
        CourseFilter::default()
    };

    let mut stream = list_courses(context, &filter, limited(limit));
    let mut count = 0_usize;
    while let Some(course) = stream.next().await {
        let course = course.context("failed to list courses")?;
        let state = course.workflow_state.map_or("-", WireEnum::to_token);
        println!(
            "{:>8}  {:<12}  {:<10}  {}",
            course.id,
            course.course_code.as_deref().unwrap_or("-"),
            state,
            course.name
        );
        count += 1;
    }
    println!("{count} course(s)");
    Ok(())
}

/// Print the todo feed, optionally ignoring each item
pub async fn todo(context: &CanvasContext, limit: Option<usize>, ignore: bool) -> Result<()> {
    let mut stream = list_todo(context, limited(limit));
    let mut count = 0_usize;
    while let Some(item) = stream.next().await {
        let item = item.context("failed to list todo items")?;
        let kind = match &item.payload {
            TodoPayload::Assignment(_) => "assignment",
            TodoPayload::Quiz(_) => "quiz",
        };
        println!(
            "{:<10}  {:<10}  {}",
            item.todo_type,
            kind,
            item.payload.title()
        );
        count += 1;

        if ignore {
            if let Err(e) = item.ignore_with(context).await {
                warn!(error = %e, "failed to ignore todo item");
            }
        }
    }
    println!("{count} item(s)");
    Ok(())
}
