//! Report renderers.
//!
//! A [`ReportRenderer`] takes a prepared [`ActivityReport`] and writes it to a
//! file. All renderers lay out the same content: title, author, month, a
//! four-column table (subject, date, time, duration) and the total hours.
//!
//! - **PDF**: paginated A4 document, the default
//! - **Excel**: single worksheet with a styled header row
//! - **CSV**: plain rows for spreadsheets and scripts

use super::report::ActivityReport;
use anyhow::Result;
use std::path::Path;

pub mod delimited;
pub mod excel;
pub mod pdf;

pub use delimited::CsvRenderer;
pub use excel::ExcelRenderer;
pub use pdf::PdfRenderer;

/// Table column headers shared by every renderer.
pub const COLUMN_HEADERS: [&str; 4] = ["Activity Subject", "Date", "Time", "Duration"];

/// Label in front of the total hours.
pub const TOTAL_LABEL: &str = "Total Time Spent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Pdf,
    Xlsx,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }

    pub fn renderer(&self) -> Box<dyn ReportRenderer> {
        match self {
            ReportFormat::Pdf => Box::new(PdfRenderer::default()),
            ReportFormat::Xlsx => Box::new(ExcelRenderer),
            ReportFormat::Csv => Box::new(CsvRenderer),
        }
    }
}

pub trait ReportRenderer {
    fn render(&self, report: &ActivityReport, output: &Path) -> Result<()>;
}
