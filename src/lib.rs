// ABOUTME: Main library entry point for the Canvas LMS API client
// ABOUTME: Transport context, lazy pagination, domain factory and typed resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Canvas Client
//!
//! An asynchronous client core for the Canvas LMS REST API.
//!
//! ## Architecture
//!
//! - **context**: One handle per credential / base-URL pair, with a per-handle
//!   identity override (masquerading)
//! - **transport**: Request descriptors and the `reqwest` transport behind a trait seam
//! - **stream**: Lazy page-cursor streaming over `Link: rel="next"` pagination
//! - **factory**: Wire record to domain object conversion, with weak follow-up handles
//! - **models**: Domain objects and the protocol enumerations
//! - **resources**: Typed endpoint functions
//! - **config** / **logging**: Environment-driven setup for applications
//!
//! Errors are [`CanvasError`]s, each classified into exactly one
//! [`ErrorKind`]: `Communication`, `DoesNotExist` or `BadApiState`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use canvas_client::config::ClientConfig;
//! use canvas_client::context::CanvasContext;
//! use canvas_client::resources::users::get_self;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let context = CanvasContext::new(&ClientConfig::from_env()?)?;
//!     let me = get_self(&context).await?;
//!     let student = get_self(&context.as_user(42_u64)).await?;
//!     println!("{} is looking at {}'s account", me.name, student.name);
//!     Ok(())
//! }
//! ```

/// Environment-driven client configuration
pub mod config;

/// Transport context and identity override
pub mod context;

/// Wire record to domain object conversion
pub mod factory;

/// Logging setup for applications
pub mod logging;

/// Domain objects and protocol enumerations
pub mod models;

/// Typed endpoint functions
pub mod resources;

/// Lazy page-cursor streaming
pub mod stream;

/// Request descriptors and the HTTP transport
pub mod transport;

pub use canvas_core::{
    CanvasError, CanvasResult, Cursor, ErrorKind, Page, WireEnum, WireEnumRegistry, WireTableError,
};
pub use config::{ClientConfig, ConfigError};
pub use context::{CanvasContext, IdentityOverride, OverrideGuard, WeakContext};
pub use factory::{DomainFactory, FromWire};
pub use stream::{ItemStream, StreamConfig};
