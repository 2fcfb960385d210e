// ABOUTME: Canvas CLI - command-line front end for the Canvas LMS client
// ABOUTME: Shows the current user, lists courses and works through the todo feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! export CANVAS_BASE_URL=https://school.instructure.com
//! export CANVAS_ACCESS_TOKEN=...
//!
//! # Show the authenticated user
//! canvas-cli whoami
//!
//! # List the first 10 courses taught by user 42
//! canvas-cli --as-user 42 courses --limit 10 --teacher
//!
//! # Show the todo feed and ignore every item on it
//! canvas-cli todo --ignore
//! ```

mod commands;

use anyhow::{Context, Result};
use canvas_client::config::ClientConfig;
use canvas_client::context::CanvasContext;
use canvas_client::logging::LoggingConfig;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "canvas-cli",
    about = "Canvas LMS command-line client",
    long_about = "Command-line client for the Canvas LMS API. Configuration is read from CANVAS_BASE_URL and CANVAS_ACCESS_TOKEN."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Act as another user (numeric id or `sis_user_id:...`)
    #[arg(long, global = true)]
    as_user: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show the user the client acts as
    Whoami,

    /// List courses
    Courses {
        /// Stop after this many courses
        #[arg(long)]
        limit: Option<usize>,

        /// Only courses taught by the user
        #[arg(long)]
        teacher: bool,
    },

    /// Show the todo feed
    Todo {
        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,

        /// Ignore every listed item
        #[arg(long)]
        ignore: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init().context("failed to initialize logging")?;

    let config = ClientConfig::from_env().context("failed to load Canvas configuration")?;
    let base = CanvasContext::new(&config).context("failed to create Canvas context")?;
    let context = match cli.as_user {
        Some(user) => {
            info!(as_user = %user, "acting as another user");
            base.as_user(user)
        }
        None => base,
    };

    match cli.command {
        Command::Whoami => commands::whoami(&context).await?,
        Command::Courses { limit, teacher } => {
            commands::courses(&context, limit, teacher).await?;
        }
        Command::Todo { limit, ignore } => commands::todo(&context, limit, ignore).await?,
    }

    Ok(())
}
