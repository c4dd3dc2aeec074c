use super::{ReportRenderer, COLUMN_HEADERS, TOTAL_LABEL};
use crate::libs::report::{ActivityReport, REPORT_TITLE};
use anyhow::Result;
use std::path::Path;

/// Writes the report as CSV: a short preamble, the table, then the total.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn render(&self, report: &ActivityReport, output: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(output)?;

        wtr.write_record([REPORT_TITLE, "", "", ""])?;
        wtr.write_record(["Author", report.author.as_str(), "", ""])?;
        wtr.write_record(["Month", report.period.as_str(), "", ""])?;
        wtr.write_record(["", "", "", ""])?;

        wtr.write_record(COLUMN_HEADERS)?;
        for row in report.rows() {
            wtr.write_record([&row.subject, &row.date, &row.time, &row.duration])?;
        }

        let total = format!("{} Hours", report.total_hours());
        wtr.write_record(["", "", "", ""])?;
        wtr.write_record([TOTAL_LABEL, total.as_str(), "", ""])?;

        wtr.flush()?;
        Ok(())
    }
}
