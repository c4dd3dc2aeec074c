//! Core library modules for taiga-sync.
//!
//! - **Input**: work-log parsing ([`entry`]) and the created-tasks logs ([`dedup`])
//! - **Sync**: the run orchestrator ([`sync`]) over the [`crate::api`] client
//! - **Reports**: report data ([`report`]) and its renderers ([`render`])
//! - **Infrastructure**: configuration, the run journal, console messages, formatting

pub mod config;
pub mod dedup;
pub mod entry;
pub mod formatter;
pub mod journal;
pub mod messages;
pub mod render;
pub mod report;
pub mod sync;
