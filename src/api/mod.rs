//! Remote task service integration.
//!
//! The sync pipeline talks to the project-management service only through
//! the [`TaskTracker`] trait. [`Taiga`] is the production implementation over
//! the Taiga REST API; tests drive the pipeline with their own trackers.
//!
//! ## Session Handling
//!
//! Authentication returns an immutable [`Session`] that the caller passes to
//! every later operation. Nothing about the session is stored on the client
//! and nothing is written to disk.
//!
//! ```rust,no_run
//! use taiga_sync::api::{Taiga, TaigaConfig, TaskTracker};
//!
//! # async fn run() -> Result<(), taiga_sync::api::ApiError> {
//! let taiga = Taiga::new(&TaigaConfig::new("https://tree.taiga.io"))?;
//! let session = taiga.authenticate("jane", "secret").await?;
//! let project_id = taiga.resolve_project_id(&session, "jane-demo").await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;

pub mod error;
pub mod taiga;

pub use error::ApiError;
pub use taiga::{Taiga, TaigaConfig};

/// Status name given to every created task.
pub const DONE_STATUS: &str = "Done";

/// Authenticated identity, valid for the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub auth_token: String,
    pub user_id: i64,
    pub display_name: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("auth_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Identifiers resolved once per sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectContext {
    pub project_id: i64,
    pub done_status_id: i64,
    pub story_id: i64,
}

/// Values written to a task's custom attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityFields<'a> {
    pub date: &'a str,
    pub start_time: &'a str,
    pub spent: &'a str,
}

/// Operations the sync pipeline needs from the remote service.
#[allow(async_fn_in_trait)]
pub trait TaskTracker {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Session, ApiError>;

    async fn resolve_project_id(&self, session: &Session, slug: &str) -> Result<i64, ApiError>;

    async fn resolve_story_id(&self, session: &Session, reference: &str, project_id: i64) -> Result<i64, ApiError>;

    /// Looks the status up by exact name among the project's task statuses.
    async fn resolve_status_id(&self, session: &Session, project_id: i64, name: &str) -> Result<i64, ApiError>;

    /// Creates a closed, unblocked task assigned to the session's user.
    async fn create_task(&self, session: &Session, subject: &str, context: &ProjectContext) -> Result<i64, ApiError>;

    /// Writes the activity values into the task's custom attributes.
    ///
    /// Only valid on a task that was just created: the update is submitted
    /// with a fixed version stamp of `1`.
    async fn update_custom_fields(
        &self,
        session: &Session,
        task_id: i64,
        project_id: i64,
        fields: &ActivityFields<'_>,
    ) -> Result<(), ApiError>;
}
