// ABOUTME: User profile endpoints
// ABOUTME: Fetches the authenticated (or masqueraded) user and users by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use canvas_core::CanvasResult;

use crate::context::CanvasContext;
use crate::factory::DomainFactory;
use crate::models::User;
use crate::resources::api_path;
use crate::transport::ApiRequest;

/// Profile of the user the context acts as
///
/// With an identity override this is the masqueraded user.
///
/// # Errors
///
/// Returns the request or decode failure
pub async fn get_self(context: &CanvasContext) -> CanvasResult<User> {
    DomainFactory::fetch(context, ApiRequest::get(api_path("users/self"))).await
}

/// Profile of a user by id
///
/// # Errors
///
/// Returns `DoesNotExist` for unknown ids, or the request or decode failure
pub async fn get_user(context: &CanvasContext, user_id: u64) -> CanvasResult<User> {
    DomainFactory::fetch(context, ApiRequest::get(api_path(&format!("users/{user_id}")))).await
}
