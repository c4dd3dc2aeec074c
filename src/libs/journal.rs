//! Run journal: where the sync and report paths send their messages.
//!
//! The [`Journal`] trait is the single seam for everything the application
//! reports while it works. Production code uses [`FileJournal`], which keeps
//! the append-only `error.log` next to the created-tasks logs and mirrors
//! warnings and errors to stderr. Tests use [`MemoryJournal`] to assert on what was
//! reported without touching the filesystem.
//!
//! ## Error Log Format
//!
//! ```text
//! [2026-02-01 10:15:42] Failed to create task: Task A | Error: status 500: boom
//! ```

use super::messages::{macros::is_debug_mode, Message};
use crate::{msg_error, msg_info, msg_success, msg_warning};
use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File name of the error log inside the log directory.
pub const ERROR_LOG_FILE: &str = "error.log";

/// Timestamp layout used for error log lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Severity of a journal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// Receiver for run messages.
pub trait Journal {
    fn record(&self, level: Level, message: &str);

    fn info(&self, message: Message) {
        self.record(Level::Info, &message.to_string());
    }

    fn success(&self, message: Message) {
        self.record(Level::Success, &message.to_string());
    }

    fn warning(&self, message: Message) {
        self.record(Level::Warning, &message.to_string());
    }

    fn error(&self, message: Message) {
        self.record(Level::Error, &message.to_string());
    }
}

/// Formats one error log line, terminator included.
pub fn format_line(at: NaiveDateTime, message: &str) -> String {
    format!("[{}] {}\n", at.format(TIMESTAMP_FORMAT), message)
}

/// Console output for an error record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorEcho {
    Stderr,
    Tracing,
}

impl ErrorEcho {
    /// One sink per mode, as the message macros do.
    fn for_mode(debug: bool) -> Self {
        if debug {
            ErrorEcho::Tracing
        } else {
            ErrorEcho::Stderr
        }
    }
}

/// Journal backed by `<log_dir>/error.log` and the console.
#[derive(Debug, Clone)]
pub struct FileJournal {
    path: PathBuf,
}

impl FileJournal {
    pub fn new(log_dir: impl AsRef<Path>) -> Self {
        Self {
            path: log_dir.as_ref().join(ERROR_LOG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl Journal for FileJournal {
    fn record(&self, level: Level, message: &str) {
        match level {
            Level::Info => msg_info!(message),
            Level::Success => msg_success!(message),
            Level::Warning | Level::Error => {
                let line = format_line(Local::now().naive_local(), message);
                if level == Level::Warning {
                    msg_warning!(message);
                } else {
                    match ErrorEcho::for_mode(is_debug_mode()) {
                        ErrorEcho::Tracing => tracing::error!(target: "taiga_sync::journal", "{}", message),
                        ErrorEcho::Stderr => eprint!("{}", line),
                    }
                }
                if let Err(e) = self.append(&line) {
                    msg_error!(Message::ErrorLogOpenFailed(e.to_string()));
                }
            }
        }
    }
}

/// In-memory journal that keeps every record in order.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().clone()
    }

    /// Messages recorded at `level`, in order.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Journal for MemoryJournal {
    fn record(&self, level: Level, message: &str) {
        self.records.lock().push((level, message.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_line_uses_bracketed_timestamp() {
        let at = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap().and_hms_opt(9, 5, 7).unwrap();
        assert_eq!(format_line(at, "boom"), "[2026-02-01 09:05:07] boom\n");
    }

    #[test]
    fn test_error_echo_has_one_sink_per_mode() {
        assert_eq!(ErrorEcho::for_mode(true), ErrorEcho::Tracing);
        assert_eq!(ErrorEcho::for_mode(false), ErrorEcho::Stderr);
    }

    #[test]
    fn test_memory_journal_filters_by_level() {
        let journal = MemoryJournal::new();
        journal.info(Message::SyncCompleted);
        journal.error(Message::InvalidLine("a|b".to_string()));

        assert_eq!(journal.records().len(), 2);
        assert_eq!(journal.messages(Level::Error), vec!["Invalid line format: a|b".to_string()]);
        assert!(journal.messages(Level::Warning).is_empty());
    }

    #[test]
    fn test_file_journal_appends_warnings_and_errors_only() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::new(dir.path().join("logs"));

        journal.info(Message::SyncCompleted);
        journal.success(Message::TaskSynced("A".to_string()));
        journal.error(Message::InvalidLine("first".to_string()));
        journal.warning(Message::ReportNoEntries("empty.log".to_string()));

        let content = fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Invalid line format: first"));
        assert!(lines[1].ends_with("] No entries found in empty.log, the report will be empty"));
    }
}
