// ABOUTME: Canvas user profile domain object and its wire record
// ABOUTME: Optional profile fields stay optional; nothing is defaulted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use canvas_core::CanvasResult;
use serde::Deserialize;

use crate::context::WeakContext;
use crate::factory::FromWire;

/// User record as sent by the API
#[derive(Debug, Deserialize)]
pub struct UserRecord {
    id: u64,
    name: String,
    #[serde(default)]
    sortable_name: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    login_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

/// Canvas user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Name for sorting ("Last, First")
    pub sortable_name: Option<String>,
    /// Short display name
    pub short_name: Option<String>,
    /// Login, visible to admins and the user
    pub login_id: Option<String>,
    /// Primary email, visible to admins and the user
    pub email: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
}

impl FromWire for User {
    type Wire = UserRecord;
    const RECORD: &'static str = "user";

    fn from_wire(wire: UserRecord, _context: &WeakContext) -> CanvasResult<Self> {
        Ok(Self {
            id: wire.id,
            name: wire.name,
            sortable_name: wire.sortable_name,
            short_name: wire.short_name,
            login_id: wire.login_id,
            email: wire.email,
            avatar_url: wire.avatar_url,
        })
    }
}
