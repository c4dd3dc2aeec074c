use super::{ReportRenderer, COLUMN_HEADERS, TOTAL_LABEL};
use crate::libs::report::{ActivityReport, REPORT_TITLE};
use anyhow::Result;
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;

const HEADER_BACKGROUND: u32 = 0x2C3E50;
const STRIPE_BACKGROUND: u32 = 0xF5F5F5;
const TOTAL_BACKGROUND: u32 = 0xE6E6E6;
const COLUMN_WIDTHS: [f64; 4] = [60.0, 14.0, 10.0, 14.0];

/// Writes the report to a single worksheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelRenderer;

impl ReportRenderer for ExcelRenderer {
    fn render(&self, report: &ActivityReport, output: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let title_format = Format::new().set_bold().set_font_size(16.0);
        let meta_format = Format::new().set_font_color(Color::Gray);
        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_BACKGROUND));
        let plain_format = Format::new().set_text_wrap();
        let striped_format = Format::new().set_text_wrap().set_background_color(Color::RGB(STRIPE_BACKGROUND));
        let total_format = Format::new().set_bold().set_background_color(Color::RGB(TOTAL_BACKGROUND));

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        worksheet.write_string_with_format(0, 0, REPORT_TITLE, &title_format)?;
        worksheet.write_string_with_format(1, 0, &format!("Author: {}", report.author), &meta_format)?;
        worksheet.write_string_with_format(2, 0, &format!("Month: {}", report.period), &meta_format)?;

        let header_row = 4;
        for (col, header) in COLUMN_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(header_row, col as u16, *header, &header_format)?;
        }

        let mut row = header_row + 1;
        for (i, report_row) in report.rows().iter().enumerate() {
            let format = if i % 2 == 1 { &striped_format } else { &plain_format };
            worksheet.write_string_with_format(row, 0, &report_row.subject, format)?;
            worksheet.write_string_with_format(row, 1, &report_row.date, format)?;
            worksheet.write_string_with_format(row, 2, &report_row.time, format)?;
            worksheet.write_string_with_format(row, 3, &report_row.duration, format)?;
            row += 1;
        }

        row += 1;
        worksheet.write_string_with_format(
            row,
            0,
            &format!("{}: {} Hours", TOTAL_LABEL, report.total_hours()),
            &total_format,
        )?;

        workbook.save(output)?;
        Ok(())
    }
}
