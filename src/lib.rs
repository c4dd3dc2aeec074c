//! # taiga-sync
//!
//! Pushes a plain-text work log into Taiga as closed tasks under one user
//! story, and renders the monthly created-tasks logs as activity reports.
//!
//! ## Features
//!
//! - **Sync**: one task per work entry, with activity date, start time and
//!   time spent written to the task's custom attributes
//! - **Deduplication**: per-month created-tasks logs keep reruns from
//!   creating the same task twice
//! - **Reports**: PDF by default, Excel and CSV on request
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clap::Parser;
//! use taiga_sync::commands::{normalize_args, Cli};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::parse_from(normalize_args(std::env::args_os())).menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
