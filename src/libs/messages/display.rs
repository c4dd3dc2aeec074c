//! Display implementation for taiga-sync messages.
//!
//! All user-facing text lives here so that the sync and report paths, the
//! error log and the console share one wording. Messages carrying context
//! (a subject, a task id, an upstream error) interpolate it in place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::AuthSuccess => "Authentication successful".to_string(),
            Message::AuthFailed(error) => format!("Authentication failed. Please check your credentials: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigLoadFailed(error) => format!("Error: configuration could not be loaded: {}", error),
            Message::NoInputFile => "Error: No input file provided".to_string(),
            Message::Usage => "Usage: taiga-sync <input_file> | taiga-sync --pdf <log_file>".to_string(),

            // === SYNC MESSAGES ===
            Message::InvalidLine(line) => format!("Invalid line format: {}", line),
            Message::TaskAlreadyCreated(subject) => format!("Task '{}' already created, skipping.", subject),
            Message::TaskCreateFailed(subject, error) => format!("Failed to create task: {} | Error: {}", subject, error),
            Message::CustomFieldsUpdateFailed(task_id, error) => {
                format!("Failed to update custom fields for task ID: {} | Error: {}", task_id, error)
            }
            Message::DedupReadFailed(subject, error) => {
                format!("Failed to check the created tasks log for '{}' | Error: {}", subject, error)
            }
            Message::DedupRecordFailed(subject, error) => format!(
                "Task '{}' was created but could not be written to the created tasks log, a later run will create it again | Error: {}",
                subject, error
            ),
            Message::TaskSynced(subject) => format!("Subtask '{}' created and the custom fields updated.", subject),
            Message::SyncSummary {
                created,
                skipped,
                failed,
                invalid,
            } => format!(
                "Created: {}, already synced: {}, failed: {}, invalid lines: {}",
                created, skipped, failed, invalid
            ),
            Message::SyncCompleted => "All tasks done. Check logs for details.".to_string(),

            // === REPORT MESSAGES ===
            Message::ReportLogOpenFailed(error) => format!("Error could not open log file: {}", error),
            Message::ReportNoEntries(path) => format!("No entries found in {}, the report will be empty", path),
            Message::ReportGenerated(path) => format!("Report generated: {}", path),
            Message::ReportFailed(error) => format!("Failed to generate report: {}", error),

            // === JOURNAL MESSAGES ===
            Message::ErrorLogOpenFailed(error) => format!("Failed to open error log: {}", error),
        };
        write!(f, "{}", text)
    }
}
