//! Monthly activity report data.
//!
//! Turns one created-tasks log into the rows, totals and labels a renderer
//! lays out. Layout itself lives in [`crate::libs::render`].

use super::entry::{EntryReader, ParseError, WorkEntry};
use super::formatter::{format_duration, format_hours};
use chrono::{Duration, NaiveDate};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const REPORT_TITLE: &str = "Worklog Activity Report";

/// Period label used when no entry carries a parseable date.
pub const UNKNOWN_PERIOD: &str = "Unknown";

/// One table row, every column already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub subject: String,
    pub date: String,
    pub time: String,
    pub duration: String,
}

#[derive(Debug, Clone)]
pub struct ActivityReport {
    pub author: String,
    pub period: String,
    pub entries: Vec<WorkEntry>,
    pub total: Duration,
}

impl ActivityReport {
    pub fn new(author: impl Into<String>, mut entries: Vec<WorkEntry>) -> Self {
        sort_entries(&mut entries);
        let total = Duration::minutes(entries.iter().map(|e| e.spent_minutes).sum());
        let period = period_label(&entries);
        Self {
            author: author.into(),
            period,
            entries,
            total,
        }
    }

    /// Builds the report from a created-tasks log. Malformed lines are
    /// dropped; a failed read is returned.
    pub fn read(path: &Path, author: impl Into<String>) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), author)
    }

    pub fn from_reader<R: BufRead>(reader: R, author: impl Into<String>) -> io::Result<Self> {
        let mut entries = Vec::new();
        for result in EntryReader::logged(reader) {
            match result {
                Ok(entry) => entries.push(entry),
                Err(ParseError::Read(e)) => return Err(io::Error::other(e)),
                Err(_) => {}
            }
        }
        Ok(Self::new(author, entries))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        self.entries
            .iter()
            .map(|entry| ReportRow {
                subject: entry.subject.clone(),
                date: entry.date.clone(),
                time: entry.start_time.clone(),
                duration: format_duration(&Duration::minutes(entry.spent_minutes)),
            })
            .collect()
    }

    /// Grand total as decimal hours, e.g. `"2.75"`.
    pub fn total_hours(&self) -> String {
        format_hours(&self.total)
    }
}

/// Newest first: date descending, then start time descending.
///
/// Both keys compare as strings, which orders correctly for zero-padded
/// `YYYY-MM-DD` dates and `HH:MM` times.
pub fn sort_entries(entries: &mut [WorkEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.start_time.cmp(&a.start_time)));
}

/// `"February 2026"` from the first entry's date.
pub fn period_label(entries: &[WorkEntry]) -> String {
    entries
        .first()
        .and_then(|entry| NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").ok())
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| UNKNOWN_PERIOD.to_string())
}

/// Swaps a trailing `.log` for `.{extension}`, or appends it.
pub fn output_path(log_path: &Path, extension: &str) -> PathBuf {
    let suffix = format!(".{}", extension);
    let path = log_path.to_string_lossy();
    match path.strip_suffix(".log") {
        Some(stem) => PathBuf::from(format!("{}{}", stem, suffix)),
        None if path.ends_with(&suffix) => log_path.to_path_buf(),
        None => PathBuf::from(format!("{}{}", path, suffix)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn entry(line: &str) -> WorkEntry {
        WorkEntry::parse(line).unwrap()
    }

    #[test]
    fn test_total_hours() {
        let report = ActivityReport::new(
            "Jane",
            vec![
                entry("A|2026-01-02|09:00|30"),
                entry("B|2026-01-03|09:00|90"),
                entry("C|2026-01-04|09:00|45"),
            ],
        );
        assert_eq!(report.total, Duration::minutes(165));
        assert_eq!(report.total_hours(), "2.75");
    }

    #[test]
    fn test_sort_newest_first() {
        let report = ActivityReport::new(
            "Jane",
            vec![
                entry("Early|2026-01-02|09:00|30"),
                entry("Late|2026-01-15|08:00|30"),
                entry("Later same day|2026-01-15|14:30|30"),
            ],
        );
        let subjects: Vec<_> = report.entries.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Later same day", "Late", "Early"]);
    }

    #[test]
    fn test_period_label() {
        let report = ActivityReport::new("Jane", vec![entry("A|2026-02-01|09:00|30")]);
        assert_eq!(report.period, "February 2026");

        assert_eq!(period_label(&[]), UNKNOWN_PERIOD);
        assert_eq!(period_label(&[entry("A|2026-13-45|09:00|30")]), UNKNOWN_PERIOD);
    }

    #[test]
    fn test_from_reader_drops_malformed_lines() {
        let log = "A|2026-01-02|09:00|30\nnot an entry\n\nB|2026-01-03|10:00|15\n";
        let report = ActivityReport::from_reader(Cursor::new(log), "Jane").unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.total, Duration::minutes(45));
    }

    #[test]
    fn test_from_reader_keeps_short_dates() {
        let log = "A|2026-01-02|09:00|30\nB|2026|10:00|15\n";
        let report = ActivityReport::from_reader(Cursor::new(log), "Jane").unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.total, Duration::minutes(45));
        assert_eq!(report.period, "January 2026");
    }

    #[test]
    fn test_read_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ActivityReport::read(dir.path(), "Jane").is_err());
    }

    #[test]
    fn test_rows_format_duration() {
        let report = ActivityReport::new("Jane", vec![entry("A|2026-01-02|09:00|125")]);
        assert_eq!(
            report.rows(),
            vec![ReportRow {
                subject: "A".to_string(),
                date: "2026-01-02".to_string(),
                time: "09:00".to_string(),
                duration: "2h 05m".to_string(),
            }]
        );
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("logs/created_tasks_2026-02.log"), "pdf"),
            PathBuf::from("logs/created_tasks_2026-02.pdf")
        );
        assert_eq!(output_path(Path::new("export.txt"), "pdf"), PathBuf::from("export.txt.pdf"));
        assert_eq!(output_path(Path::new("report.pdf"), "pdf"), PathBuf::from("report.pdf"));
    }
}
