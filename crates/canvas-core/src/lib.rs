// ABOUTME: Core types shared by every layer of the Canvas LMS API client
// ABOUTME: Foundation crate with the error taxonomy, wire-token enums, pagination and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Canvas Core
//!
//! Foundation crate for the Canvas LMS client. It holds the pieces of the
//! request/response pipeline that have no network dependency, so they change
//! rarely and compile once for the whole workspace.
//!
//! ## Modules
//!
//! - **errors**: The closed `Communication` / `DoesNotExist` / `BadApiState` taxonomy
//! - **wire_enum**: Bidirectional variant ↔ wire-token tables and their registry
//! - **pagination**: Opaque cursors, pages and `Link` header parsing
//! - **constants**: Protocol constants (header names, query parameters, limits)

/// Error taxonomy and HTTP status classification
pub mod errors;

/// Wire-token enumerations and the process-wide registry
pub mod wire_enum;

/// Cursor-based pagination primitives
pub mod pagination;

/// Protocol constants
pub mod constants;

pub use errors::{CanvasError, CanvasResult, ErrorKind};
pub use pagination::{Cursor, Page};
pub use wire_enum::{WireEnum, WireEnumRegistry, WireEnumRegistryBuilder, WireTableError};

#[doc(hidden)]
pub use serde as __serde;
