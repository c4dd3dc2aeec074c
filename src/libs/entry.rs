//! Work-log entries and the flat-file parser that produces them.
//!
//! The sync input starts with a bare story reference on its first line. Every
//! following non-blank line is one entry:
//!
//! ```text
//! US-42
//! Code review | 2026-02-01 | 10:00 | 60
//! Standup     | 2026-02-02 | 09:30 | 15
//! ```
//!
//! Fields are trimmed; anything after the fourth field is ignored. The
//! created-tasks logs use the same line layout without the story reference,
//! so the report path reuses [`EntryReader`] and simply never asks for it.
//! Logged lines are read with [`EntryReader::logged`], which keeps dates too
//! short to carry a month.

use crate::api::ActivityFields;
use std::io::{self, BufRead};
use thiserror::Error;

/// Separator between entry fields.
pub const FIELD_SEPARATOR: char = '|';

/// Number of fields an entry line must carry.
pub const MIN_FIELDS: usize = 4;

/// Length of the `YYYY-MM` prefix of an entry date.
const MONTH_KEY_LEN: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected at least {} fields, found {found}: {line}", MIN_FIELDS)]
    TooFewFields { line: String, found: usize },
    #[error("date '{date}' has no YYYY-MM prefix: {line}")]
    BadDate { line: String, date: String },
    #[error("input is empty, expected a story reference on the first line")]
    MissingStoryRef,
    #[error("failed to read input: {0}")]
    Read(String),
}

impl ParseError {
    /// The offending raw line, when the error is tied to one.
    pub fn line(&self) -> Option<&str> {
        match self {
            ParseError::TooFewFields { line, .. } | ParseError::BadDate { line, .. } => Some(line),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Read(e.to_string())
    }
}

/// One recorded activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkEntry {
    pub subject: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub start_time: String,
    /// Minutes parsed from `spent_text`, `0` when it is not a number.
    pub spent_minutes: i64,
    pub spent_text: String,
    pub raw_line: String,
}

impl WorkEntry {
    /// Parses an input line. The date must carry the `YYYY-MM` prefix that
    /// picks the created-tasks log the entry is recorded in.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let entry = Self::parse_logged(line)?;
        if entry.date.get(..MONTH_KEY_LEN).is_none() {
            return Err(ParseError::BadDate {
                date: entry.date,
                line: entry.raw_line,
            });
        }
        Ok(entry)
    }

    /// Parses a line already written to a created-tasks log. Only the field
    /// count is checked.
    pub fn parse_logged(line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields.len() < MIN_FIELDS {
            return Err(ParseError::TooFewFields {
                line: line.to_owned(),
                found: fields.len(),
            });
        }

        Ok(Self {
            subject: fields[0].to_owned(),
            date: fields[1].to_owned(),
            start_time: fields[2].to_owned(),
            spent_minutes: fields[3].parse().unwrap_or(0),
            spent_text: fields[3].to_owned(),
            raw_line: line.to_owned(),
        })
    }

    /// `YYYY-MM` partition the entry belongs to.
    pub fn month_key(&self) -> &str {
        self.date.get(..MONTH_KEY_LEN).unwrap_or(&self.date)
    }

    pub fn activity_fields(&self) -> ActivityFields<'_> {
        ActivityFields {
            date: &self.date,
            start_time: &self.start_time,
            spent: &self.spent_text,
        }
    }
}

/// Single forward pass over a work log.
///
/// Yields one `Result` per non-blank line so that a malformed line can be
/// reported and skipped without ending the pass. A [`ParseError::Read`] is
/// the last item: the pass stops there.
pub struct EntryReader<R> {
    lines: io::Lines<R>,
    parse: fn(&str) -> Result<WorkEntry, ParseError>,
    done: bool,
}

impl<R: BufRead> EntryReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            parse: WorkEntry::parse,
            done: false,
        }
    }

    /// Reader for created-tasks logs, parsing with [`WorkEntry::parse_logged`].
    pub fn logged(reader: R) -> Self {
        Self {
            parse: WorkEntry::parse_logged,
            ..Self::new(reader)
        }
    }

    /// Consumes the first line as the story reference.
    pub fn story_ref(&mut self) -> Result<String, ParseError> {
        match self.lines.next() {
            Some(line) => {
                let reference = line?.trim().to_owned();
                if reference.is_empty() {
                    return Err(ParseError::MissingStoryRef);
                }
                Ok(reference)
            }
            None => Err(ParseError::MissingStoryRef),
        }
    }
}

impl<R: BufRead> Iterator for EntryReader<R> {
    type Item = Result<WorkEntry, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some((self.parse)(&line));
        }
        self.done = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    /// Source whose every read fails, like a directory opened as a file.
    struct Unreadable;

    impl Read for Unreadable {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("Is a directory (os error 21)"))
        }
    }

    #[test]
    fn test_parse_trims_every_field() {
        let entry = WorkEntry::parse("  Code review |  2026-02-01 | 10:00  |  60 ").unwrap();
        assert_eq!(entry.subject, "Code review");
        assert_eq!(entry.date, "2026-02-01");
        assert_eq!(entry.start_time, "10:00");
        assert_eq!(entry.spent_minutes, 60);
        assert_eq!(entry.spent_text, "60");
        assert_eq!(entry.raw_line, "  Code review |  2026-02-01 | 10:00  |  60 ");
    }

    #[test]
    fn test_parse_rejects_three_fields() {
        let err = WorkEntry::parse("Code review|2026-02-01|10:00").unwrap_err();
        assert_eq!(
            err,
            ParseError::TooFewFields {
                line: "Code review|2026-02-01|10:00".to_string(),
                found: 3
            }
        );
        assert_eq!(err.line(), Some("Code review|2026-02-01|10:00"));
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let entry = WorkEntry::parse("A|2026-02-01|10:00|30|billable|note").unwrap();
        assert_eq!(entry.subject, "A");
        assert_eq!(entry.spent_minutes, 30);
    }

    #[test]
    fn test_parse_non_numeric_spent_is_zero() {
        let entry = WorkEntry::parse("A|2026-02-01|10:00|1h30").unwrap();
        assert_eq!(entry.spent_minutes, 0);
        assert_eq!(entry.spent_text, "1h30");
    }

    #[test]
    fn test_parse_rejects_short_date() {
        let err = WorkEntry::parse("A|2026|10:00|30").unwrap_err();
        assert!(matches!(err, ParseError::BadDate { .. }));
    }

    #[test]
    fn test_parse_logged_keeps_short_date() {
        let entry = WorkEntry::parse_logged("A|2026|10:00|30").unwrap();
        assert_eq!(entry.date, "2026");
        assert_eq!(entry.month_key(), "2026");
        assert!(matches!(
            WorkEntry::parse_logged("A|2026|10:00").unwrap_err(),
            ParseError::TooFewFields { found: 3, .. }
        ));
    }

    #[test]
    fn test_month_key() {
        let entry = WorkEntry::parse("A|2026-02-01|10:00|30").unwrap();
        assert_eq!(entry.month_key(), "2026-02");
    }

    #[test]
    fn test_reader_reads_story_ref_then_entries() {
        let input = "  US-42  \nA|2026-02-01|10:00|30\n\n   \nbroken line\nB|2026-02-02|11:00|45\n";
        let mut reader = EntryReader::new(Cursor::new(input));

        assert_eq!(reader.story_ref().unwrap(), "US-42");

        let results: Vec<_> = reader.collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().subject, "A");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().subject, "B");
    }

    #[test]
    fn test_reader_empty_input_has_no_story_ref() {
        let mut reader = EntryReader::new(Cursor::new(""));
        assert_eq!(reader.story_ref().unwrap_err(), ParseError::MissingStoryRef);
    }

    #[test]
    fn test_reader_stops_after_read_error() {
        let mut reader = EntryReader::new(io::BufReader::new(Unreadable));

        assert!(matches!(reader.next(), Some(Err(ParseError::Read(_)))));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_logged_reader_keeps_short_dates() {
        let log = "A|2026|10:00|30\nB|2026-02-01|11:00|15\n";
        let subjects: Vec<_> = EntryReader::logged(Cursor::new(log))
            .map(|result| result.unwrap().subject)
            .collect();
        assert_eq!(subjects, vec!["A", "B"]);
    }
}
