//! Paginated PDF output.
//!
//! A4 portrait, 15 mm margins. The table header is drawn again at the top
//! of every continuation page, rows alternate between white and light grey,
//! and long subjects wrap inside the first column with the row growing to
//! fit. All positions below are millimetres measured from the top of the
//! page; they are flipped to PDF's bottom-up space only when drawing.

use super::{ReportRenderer, COLUMN_HEADERS, TOTAL_LABEL};
use crate::libs::report::{ActivityReport, ReportRow, REPORT_TITLE};
use anyhow::Result;
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Rect, Rgb};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
/// Rows ending below this line move to the next page.
const PAGE_BREAK_Y: f32 = 270.0;
const LAYER_NAME: &str = "Layer 1";

const COLUMN_WIDTHS: [f32; 4] = [100.0, 30.0, 20.0, 30.0];
const HEADER_HEIGHT: f32 = 12.0;
const LINE_HEIGHT: f32 = 6.0;
const ROW_PADDING: f32 = 4.0;
const CELL_PADDING: f32 = 1.5;
const FOOTER_GAP: f32 = 8.0;
const FOOTER_HEIGHT: f32 = 12.0;

const TITLE_FONT_SIZE: f32 = 20.0;
const META_FONT_SIZE: f32 = 12.0;
const HEADER_FONT_SIZE: f32 = 11.0;
const BODY_FONT_SIZE: f32 = 10.0;
const FOOTER_FONT_SIZE: f32 = 12.0;

/// Where the first table header starts: title and two metadata lines above.
const TABLE_TOP: f32 = MARGIN + 12.0 + 5.0 + 12.0;

const PT_TO_MM: f32 = 0.3528;
/// Outline width in points.
const BORDER_WIDTH: f32 = 0.85;

const TITLE_COLOR: (u8, u8, u8) = (44, 62, 80);
const META_COLOR: (u8, u8, u8) = (100, 100, 100);
const HEADER_FILL: (u8, u8, u8) = (44, 62, 80);
const HEADER_TEXT: (u8, u8, u8) = (255, 255, 255);
const BORDER_COLOR: (u8, u8, u8) = (200, 200, 200);
const BODY_TEXT: (u8, u8, u8) = (50, 50, 50);
const ROW_FILL: (u8, u8, u8) = (255, 255, 255);
const STRIPE_FILL: (u8, u8, u8) = (245, 245, 245);
const FOOTER_FILL: (u8, u8, u8) = (230, 230, 230);

fn color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, None))
}

/// Built-in face a piece of text is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

/// Advance widths of `' '..='~'` in Helvetica, thousandths of an em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths of `' '..='~'` in Helvetica-Bold, thousandths of an em.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width assumed for characters outside the tables: a full em.
const FALLBACK_WIDTH: u16 = 1000;

fn glyph_width(c: char, face: Face) -> u16 {
    let table = match face {
        Face::Regular => &HELVETICA_WIDTHS,
        Face::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    (c as usize)
        .checked_sub(' ' as usize)
        .and_then(|index| table.get(index))
        .copied()
        .unwrap_or(FALLBACK_WIDTH)
}

fn units_to_mm(units: u32, font_size: f32) -> f32 {
    units as f32 / 1000.0 * font_size * PT_TO_MM
}

/// Rendered width of `text` in millimetres.
pub fn text_width(text: &str, font_size: f32, face: Face) -> f32 {
    units_to_mm(text.chars().map(|c| u32::from(glyph_width(c, face))).sum(), font_size)
}

/// Byte offset of the longest prefix of `word` that fits `width`, never
/// less than one character.
fn split_point(word: &str, width: f32, font_size: f32, face: Face) -> usize {
    let mut used = 0;
    for (i, c) in word.char_indices() {
        used += u32::from(glyph_width(c, face));
        if units_to_mm(used, font_size) > width {
            return if i == 0 { c.len_utf8() } else { i };
        }
    }
    word.len()
}

/// Word-wraps regular-face `text` to lines that fit `width` millimetres.
///
/// Words longer than a whole line are split. Always returns at least one
/// line so an empty subject still gets a row.
pub fn wrap_text(text: &str, width: f32, font_size: f32) -> Vec<String> {
    let fits = |line: &str| text_width(line, font_size, Face::Regular) <= width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() { word.to_owned() } else { format!("{} {}", current, word) };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        let mut rest = word;
        while !rest.is_empty() && !fits(rest) {
            let (head, tail) = rest.split_at(split_point(rest, width, font_size, Face::Regular));
            lines.push(head.to_owned());
            rest = tail;
        }
        current = rest.to_owned();
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Page and top edge assigned to one table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSlot {
    pub page: usize,
    pub top: f32,
}

/// Places rows of the given heights, breaking pages at [`PAGE_BREAK_Y`].
/// Continuation pages start below a repeated header.
pub fn plan_rows(heights: &[f32]) -> Vec<RowSlot> {
    let mut page = 0;
    let mut y = TABLE_TOP + HEADER_HEIGHT;
    heights
        .iter()
        .map(|height| {
            if y + height > PAGE_BREAK_Y {
                page += 1;
                y = MARGIN + HEADER_HEIGHT;
            }
            let slot = RowSlot { page, top: y };
            y += height;
            slot
        })
        .collect()
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        }
    }
}

struct Canvas<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: &'a Fonts,
}

impl Canvas<'_> {
    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    fn text(&self, text: &str, font_size: f32, x: f32, baseline: f32, face: Face, rgb: (u8, u8, u8)) {
        self.layer.set_fill_color(color(rgb));
        self.layer.use_text(text, font_size, Mm(x), Mm(PAGE_HEIGHT - baseline), self.fonts.get(face));
    }

    fn centered(&self, text: &str, font_size: f32, x: f32, width: f32, baseline: f32, face: Face, rgb: (u8, u8, u8)) {
        let offset = ((width - text_width(text, font_size, face)) / 2.0).max(CELL_PADDING);
        self.text(text, font_size, x + offset, baseline, face, rgb);
    }

    fn cell(&self, x: f32, top: f32, width: f32, height: f32, fill: (u8, u8, u8)) {
        self.layer.set_fill_color(color(fill));
        self.layer.set_outline_color(color(BORDER_COLOR));
        self.layer.set_outline_thickness(BORDER_WIDTH);
        let rect = Rect::new(Mm(x), Mm(PAGE_HEIGHT - top - height), Mm(x + width), Mm(PAGE_HEIGHT - top))
            .with_mode(PaintMode::FillStroke);
        self.layer.add_rect(rect);
    }

    /// Vertical baseline that centres a single line of `font_size` in a box.
    fn middle(top: f32, height: f32, font_size: f32) -> f32 {
        top + height / 2.0 + font_size * PT_TO_MM * 0.35
    }

    fn heading(&self, report: &ActivityReport) {
        self.text(REPORT_TITLE, TITLE_FONT_SIZE, MARGIN, MARGIN + 10.0, Face::Bold, TITLE_COLOR);
        let author = format!("Author: {}", report.author);
        self.text(&author, META_FONT_SIZE, MARGIN, MARGIN + 12.0 + 6.5, Face::Regular, META_COLOR);
        let month = format!("Month: {}", report.period);
        self.text(&month, META_FONT_SIZE, MARGIN, MARGIN + 17.0 + 6.5, Face::Regular, META_COLOR);
    }

    fn table_header(&self, top: f32) {
        let baseline = Self::middle(top, HEADER_HEIGHT, HEADER_FONT_SIZE);
        let mut x = MARGIN;
        for (i, (header, width)) in COLUMN_HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
            self.cell(x, top, width, HEADER_HEIGHT, HEADER_FILL);
            if i == 0 {
                self.text(header, HEADER_FONT_SIZE, x + CELL_PADDING, baseline, Face::Bold, HEADER_TEXT);
            } else {
                self.centered(header, HEADER_FONT_SIZE, x, width, baseline, Face::Bold, HEADER_TEXT);
            }
            x += width;
        }
    }

    fn row(&self, row: &ReportRow, subject_lines: &[String], top: f32, height: f32, striped: bool) {
        let fill = if striped { STRIPE_FILL } else { ROW_FILL };
        let [subject_width, date_width, time_width, duration_width] = COLUMN_WIDTHS;

        self.cell(MARGIN, top, subject_width, height, fill);
        for (i, line) in subject_lines.iter().enumerate() {
            let baseline = top + ROW_PADDING / 2.0 + i as f32 * LINE_HEIGHT + LINE_HEIGHT * 0.7;
            self.text(line, BODY_FONT_SIZE, MARGIN + CELL_PADDING, baseline, Face::Regular, BODY_TEXT);
        }

        let baseline = Self::middle(top, height, BODY_FONT_SIZE);
        let mut x = MARGIN + subject_width;
        for (value, width) in [(&row.date, date_width), (&row.time, time_width), (&row.duration, duration_width)] {
            self.cell(x, top, width, height, fill);
            self.centered(value, BODY_FONT_SIZE, x, width, baseline, Face::Regular, BODY_TEXT);
            x += width;
        }
    }

    fn footer(&self, top: f32, total_hours: &str) {
        let width = PAGE_WIDTH - 2.0 * MARGIN;
        self.cell(MARGIN, top, width, FOOTER_HEIGHT, FOOTER_FILL);
        let label = format!("   {}: {} Hours", TOTAL_LABEL, total_hours);
        let baseline = Self::middle(top, FOOTER_HEIGHT, FOOTER_FONT_SIZE);
        self.text(&label, FOOTER_FONT_SIZE, MARGIN + CELL_PADDING, baseline, Face::Bold, BODY_TEXT);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
    fn render(&self, report: &ActivityReport, output: &Path) -> Result<()> {
        let (doc, page, layer) = PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        };
        let mut canvas = Canvas {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            fonts: &fonts,
        };

        canvas.heading(report);
        canvas.table_header(TABLE_TOP);

        let rows = report.rows();
        let subject_width = COLUMN_WIDTHS[0] - 2.0 * CELL_PADDING;
        let wrapped: Vec<Vec<String>> = rows.iter().map(|row| wrap_text(&row.subject, subject_width, BODY_FONT_SIZE)).collect();
        let heights: Vec<f32> = wrapped.iter().map(|lines| lines.len() as f32 * LINE_HEIGHT + ROW_PADDING).collect();
        let slots = plan_rows(&heights);

        let mut current_page = 0;
        let mut y = TABLE_TOP + HEADER_HEIGHT;
        for (i, ((row, lines), slot)) in rows.iter().zip(&wrapped).zip(&slots).enumerate() {
            if slot.page != current_page {
                canvas.new_page();
                canvas.table_header(MARGIN);
                current_page = slot.page;
            }
            canvas.row(row, lines, slot.top, heights[i], i % 2 == 1);
            y = slot.top + heights[i];
        }

        let mut footer_top = y + FOOTER_GAP;
        if footer_top + FOOTER_HEIGHT > PAGE_BREAK_Y {
            canvas.new_page();
            footer_top = MARGIN;
        }
        canvas.footer(footer_top, &report.total_hours());

        doc.save(&mut BufWriter::new(File::create(output)?))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::entry::WorkEntry;

    #[test]
    fn test_wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap_text("Code review", 97.0, BODY_FONT_SIZE), vec!["Code review".to_string()]);
        assert_eq!(wrap_text("", 97.0, BODY_FONT_SIZE), vec![String::new()]);
    }

    #[test]
    fn test_wrap_breaks_on_words_within_width() {
        let subject = "Investigate intermittent failures in the nightly integration pipeline and document the flaky tests";
        let lines = wrap_text(subject, 40.0, BODY_FONT_SIZE);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width(line, BODY_FONT_SIZE, Face::Regular) <= 40.0));
        assert_eq!(lines.join(" "), subject);
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let word = "x".repeat(100);
        let lines = wrap_text(&word, 20.0, BODY_FONT_SIZE);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width(line, BODY_FONT_SIZE, Face::Regular) <= 20.0));
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_uppercase_subject_stays_inside_its_column() {
        let column = COLUMN_WIDTHS[0] - 2.0 * CELL_PADDING;

        let wide = "W".repeat(54);
        let lines = wrap_text(&wide, column, BODY_FONT_SIZE);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width(line, BODY_FONT_SIZE, Face::Regular) <= column));
        assert_eq!(lines.concat(), wide);

        let shouted = "MIGRATE WAREHOUSE MANAGEMENT WORKFLOWS TO THE NEW MESSAGE BROKER AND VERIFY WMS HANDOVER";
        let lines = wrap_text(shouted, column, BODY_FONT_SIZE);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width(line, BODY_FONT_SIZE, Face::Regular) <= column));
    }

    #[test]
    fn test_text_width_uses_glyph_metrics() {
        let narrow = text_width("iiii", 10.0, Face::Regular);
        let wide = text_width("WWWW", 10.0, Face::Regular);
        assert!((wide - 4.0 * 0.944 * 10.0 * PT_TO_MM).abs() < 1e-3);
        assert!(narrow < wide / 4.0);
        assert!(text_width("Date", 11.0, Face::Bold) > text_width("Date", 11.0, Face::Regular));
        assert_eq!(text_width("é", 10.0, Face::Regular), 10.0 * PT_TO_MM);
    }

    #[test]
    fn test_plan_rows_breaks_pages_below_repeated_header() {
        let heights = vec![10.0; 40];
        let slots = plan_rows(&heights);

        assert_eq!(slots[0], RowSlot { page: 0, top: TABLE_TOP + HEADER_HEIGHT });
        let first_on_second_page = slots.iter().position(|slot| slot.page == 1).unwrap();
        assert_eq!(slots[first_on_second_page].top, MARGIN + HEADER_HEIGHT);
        assert!(slots.iter().all(|slot| slot.top + 10.0 <= PAGE_BREAK_Y));
    }

    #[test]
    fn test_render_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("created_tasks_2026-02.pdf");
        let entries = (1..=60)
            .map(|i| WorkEntry::parse(&format!("Task number {} with a fairly long description to wrap|2026-02-{:02}|10:00|30", i, i % 28 + 1)).unwrap())
            .collect();
        let report = ActivityReport::new("Jane Doe", entries);

        PdfRenderer.render(&report, &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
