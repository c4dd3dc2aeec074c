//! Work-log to Taiga synchronization.
//!
//! A run authenticates, resolves the project, the "Done" status and the
//! user story named on the first input line, then walks the remaining lines
//! once. Each valid entry not yet present in its month's created-tasks log
//! becomes a closed task under the story with its activity date, start time
//! and spent time written to the task's custom attributes.
//!
//! Anything that prevents the run from starting is returned as a
//! [`SyncError`]. Problems with a single line are reported to the
//! [`Journal`] and counted in the [`SyncSummary`]; the run moves on.

use super::config::Config;
use super::dedup::DedupStore;
use super::entry::{EntryReader, ParseError, WorkEntry};
use super::journal::Journal;
use super::messages::Message;
use crate::api::{ApiError, ProjectContext, Session, TaskTracker, DONE_STATUS};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conditions that end a run before any entry is processed.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Authentication failed. Please check your credentials: {0}")]
    Auth(#[source] ApiError),
    #[error("Failed to fetch Project ID from Project Slug {slug}: {source}")]
    Project { slug: String, source: ApiError },
    #[error("Failed to fetch Status for {name} ID: {source}")]
    Status { name: String, source: ApiError },
    #[error("Failed to fetch Story ID for Story Reference ID {reference}: {source}")]
    Story { reference: String, source: ApiError },
    #[error("Error: Input file '{}' not found!", .0.display())]
    InputNotFound(PathBuf),
    #[error("Error: Input file '{}' could not be read: {source}", path.display())]
    InputUnreadable { path: PathBuf, source: io::Error },
    #[error("Error: Input file is empty")]
    EmptyInput,
    #[error("Error: Input file could not be read: {0}")]
    Parse(ParseError),
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub created: usize,
    /// Entries already present in the created-tasks log.
    pub skipped: usize,
    /// Entries whose create or attribute update failed.
    pub failed: usize,
    pub invalid: usize,
}

impl From<SyncSummary> for Message {
    fn from(summary: SyncSummary) -> Self {
        Message::SyncSummary {
            created: summary.created,
            skipped: summary.skipped,
            failed: summary.failed,
            invalid: summary.invalid,
        }
    }
}

pub struct Syncer<'a, T> {
    tracker: &'a T,
    journal: &'a dyn Journal,
    store: DedupStore,
}

impl<'a, T: TaskTracker> Syncer<'a, T> {
    pub fn new(tracker: &'a T, journal: &'a dyn Journal, store: DedupStore) -> Self {
        Self { tracker, journal, store }
    }

    /// Runs one full pass over `input`.
    pub async fn run(&self, config: &Config, input: &Path) -> Result<SyncSummary, SyncError> {
        let session = self
            .tracker
            .authenticate(&config.username, &config.password)
            .await
            .map_err(SyncError::Auth)?;
        self.journal.info(Message::AuthSuccess);

        let project_id = self
            .tracker
            .resolve_project_id(&session, &config.project_slug)
            .await
            .map_err(|source| SyncError::Project {
                slug: config.project_slug.clone(),
                source,
            })?;
        let done_status_id = self
            .tracker
            .resolve_status_id(&session, project_id, DONE_STATUS)
            .await
            .map_err(|source| SyncError::Status {
                name: DONE_STATUS.to_string(),
                source,
            })?;

        let mut reader = EntryReader::new(open_input(input)?);
        let reference = reader.story_ref().map_err(|e| match e {
            ParseError::MissingStoryRef => SyncError::EmptyInput,
            other => SyncError::Parse(other),
        })?;
        let story_id = self
            .tracker
            .resolve_story_id(&session, &reference, project_id)
            .await
            .map_err(|source| SyncError::Story {
                reference: reference.clone(),
                source,
            })?;

        let context = ProjectContext {
            project_id,
            done_status_id,
            story_id,
        };
        let summary = self.sync_entries(&session, &context, reader).await;

        self.journal.info(summary.into());
        self.journal.success(Message::SyncCompleted);
        Ok(summary)
    }

    /// Processes every remaining line of `reader`. Never fails as a whole.
    pub async fn sync_entries<R: BufRead>(
        &self,
        session: &Session,
        context: &ProjectContext,
        reader: EntryReader<R>,
    ) -> SyncSummary {
        let mut summary = SyncSummary::default();

        for result in reader {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    let line = e.line().map(str::to_owned).unwrap_or_else(|| e.to_string());
                    self.journal.error(Message::InvalidLine(line));
                    summary.invalid += 1;
                    continue;
                }
            };

            match self.sync_entry(session, context, &entry).await {
                Outcome::Created => summary.created += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }

        summary
    }

    async fn sync_entry(&self, session: &Session, context: &ProjectContext, entry: &WorkEntry) -> Outcome {
        match self.store.contains(entry) {
            Ok(true) => {
                self.journal.info(Message::TaskAlreadyCreated(entry.subject.clone()));
                return Outcome::Skipped;
            }
            Ok(false) => {}
            Err(e) => {
                self.journal.error(Message::DedupReadFailed(entry.subject.clone(), e.to_string()));
                return Outcome::Failed;
            }
        }

        let task_id = match self.tracker.create_task(session, &entry.subject, context).await {
            Ok(id) => id,
            Err(e) => {
                self.journal.error(Message::TaskCreateFailed(entry.subject.clone(), e.to_string()));
                return Outcome::Failed;
            }
        };

        if let Err(e) = self
            .tracker
            .update_custom_fields(session, task_id, context.project_id, &entry.activity_fields())
            .await
        {
            self.journal.error(Message::CustomFieldsUpdateFailed(task_id, e.to_string()));
            return Outcome::Failed;
        }

        if let Err(e) = self.store.record(entry) {
            self.journal.error(Message::DedupRecordFailed(entry.subject.clone(), e.to_string()));
        }
        self.journal.success(Message::TaskSynced(entry.subject.clone()));
        Outcome::Created
    }
}

enum Outcome {
    Created,
    Skipped,
    Failed,
}

fn open_input(path: &Path) -> Result<BufReader<File>, SyncError> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SyncError::InputNotFound(path.to_path_buf())),
        Err(source) => Err(SyncError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}
