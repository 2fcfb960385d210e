// ABOUTME: Protocol constants for the Canvas LMS REST API
// ABOUTME: Query parameter names, path prefixes, payload guards and diagnostic limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Path prefix of every versioned REST endpoint
pub const API_PREFIX: &str = "/api/v1";

/// Query parameter instructing the service to act as another user
pub const MASQUERADE_PARAM: &str = "as_user_id";

/// Query parameter controlling page size on list endpoints
pub const PER_PAGE_PARAM: &str = "per_page";

/// Response header carrying pagination relations
pub const LINK_HEADER: &str = "link";

/// Link relation naming the continuation page
pub const NEXT_RELATION: &str = "next";

/// Anti JSON-hijacking guard some deployments prepend to JSON bodies
pub const JSON_HIJACK_PREFIX: &str = "while(1);";

/// Maximum number of characters of a response body kept in error messages
pub const BODY_EXCERPT_LIMIT: usize = 512;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("canvas-client/", env!("CARGO_PKG_VERSION"));
