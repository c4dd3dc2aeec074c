//! Created-tasks logs, one per month, used to skip entries already synced.
//!
//! Each synced entry's line is appended to
//! `<log_dir>/created_tasks_<YYYY-MM>.log`. Before an entry is pushed to Taiga
//! its line is looked up in the file for its month.
//!
//! The lookup is a substring test over the whole file, re-read on every
//! check. A line that is contained in a longer, already recorded line counts
//! as a duplicate:
//!
//! ```text
//! log:    Fix bug|2026-01-02|09:00|30
//! entry:  bug|2026-01-02|09:00|30        -> duplicate
//! ```

use super::entry::WorkEntry;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name prefix of the monthly logs.
pub const LOG_PREFIX: &str = "created_tasks_";

/// File extension of the monthly logs.
pub const LOG_EXTENSION: &str = "log";

/// Returns `true` when the file at `path` contains the trimmed `raw_line`.
///
/// A missing file is not an error: nothing has been synced for that month yet.
pub fn is_duplicate(path: &Path, raw_line: &str) -> io::Result<bool> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content.contains(raw_line.trim())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Appends the trimmed `raw_line` to `path`, creating the file and its parent
/// directory when needed.
pub fn record(path: &Path, raw_line: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(file, "{}", raw_line.trim())
}

/// The set of monthly logs under one directory.
#[derive(Debug, Clone)]
pub struct DedupStore {
    dir: PathBuf,
}

impl DedupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Log file for a `YYYY-MM` key.
    pub fn path_for(&self, month_key: &str) -> PathBuf {
        self.dir.join(format!("{}{}.{}", LOG_PREFIX, month_key, LOG_EXTENSION))
    }

    pub fn contains(&self, entry: &WorkEntry) -> io::Result<bool> {
        is_duplicate(&self.path_for(entry.month_key()), &entry.raw_line)
    }

    pub fn record(&self, entry: &WorkEntry) -> io::Result<()> {
        record(&self.path_for(entry.month_key()), &entry.raw_line)
    }
}
