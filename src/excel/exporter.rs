//! Supplier report workbook writer

use crate::config::{HighlightRange, DEFAULT_HIGHLIGHT_TOP};
use crate::error::{ReportError, ReportResult};
use crate::types::{CellValue, CleanedTable, SupplierSummary, LEAD_TIME, QUANTITY, SUPPLIER, TOTAL_COST};
use rust_xlsxwriter::{
    Color, ConditionalFormatTop, ConditionalFormatTopRule, Format, Workbook, Worksheet,
};
use std::path::Path;
use tracing::{debug, info};

pub const SUMMARY_SHEET: &str = "Summary";
pub const CLEANED_SHEET: &str = "Cleaned_Data";

/// Summary sheet columns, in order
pub const SUMMARY_COLUMNS: [&str; 4] = [SUPPLIER, QUANTITY, TOTAL_COST, LEAD_TIME];

/// Zero-based column of `Total_Cost` on the summary sheet (column C)
pub const SUMMARY_TOTAL_COST_COL: u16 = 2;

const HIGHLIGHT_BACKGROUND: u32 = 0xC6EFCE;
const HIGHLIGHT_FONT: u32 = 0x006100;

/// Convert a zero-based column index to its spreadsheet letter (0 → A, 26 → AA)
pub fn column_letter(index: usize) -> String {
    let mut result = String::new();
    let mut idx = index;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

fn export_error(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> ReportError + '_ {
    move |e| ReportError::Export(format!("Failed to {}: {}", what, e))
}

/// Writes the `Summary` and `Cleaned_Data` sheets into one workbook
pub struct ReportExporter<'a> {
    summary: &'a [SupplierSummary],
    cleaned: &'a CleanedTable,
    highlight_range: HighlightRange,
    highlight_top: u16,
}

impl<'a> ReportExporter<'a> {
    pub fn new(summary: &'a [SupplierSummary], cleaned: &'a CleanedTable) -> Self {
        Self {
            summary,
            cleaned,
            highlight_range: HighlightRange::default(),
            highlight_top: DEFAULT_HIGHLIGHT_TOP,
        }
    }

    /// Override how the top-N highlight is sized and how many values it marks
    pub fn with_highlight(mut self, range: HighlightRange, top: u16) -> Self {
        self.highlight_range = range;
        self.highlight_top = top;
        self
    }

    /// Highlighted cell range in A1 notation, e.g. `C2:C100`
    pub fn highlight_ref(&self) -> Option<String> {
        let (first, last) = self.highlight_range.rows(self.summary.len())?;
        let col = column_letter(SUMMARY_TOTAL_COST_COL as usize);
        Some(format!("{col}{}:{col}{}", first + 1, last + 1))
    }

    /// Build the workbook and save it to `output_path`
    pub fn export(&self, output_path: &Path) -> ReportResult<()> {
        let mut workbook = Workbook::new();

        self.export_summary(&mut workbook)?;
        self.export_cleaned(&mut workbook)?;

        workbook.save(output_path).map_err(|e| {
            ReportError::Export(format!(
                "Failed to save Excel file {}: {}",
                output_path.display(),
                e
            ))
        })?;

        info!(path = %output_path.display(), "saved workbook");
        Ok(())
    }

    fn export_summary(&self, workbook: &mut Workbook) -> ReportResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SUMMARY_SHEET)
            .map_err(export_error("set worksheet name"))?;

        write_header(worksheet, &SUMMARY_COLUMNS)?;
        worksheet
            .set_column_width(0, 24)
            .map_err(export_error("set column width"))?;

        for (idx, row) in self.summary.iter().enumerate() {
            let excel_row = (idx + 1) as u32;

            worksheet
                .write_string(excel_row, 0, &row.supplier)
                .map_err(export_error("write supplier"))?;
            worksheet
                .write_number(excel_row, 1, row.quantity)
                .map_err(export_error("write quantity"))?;
            worksheet
                .write_number(excel_row, SUMMARY_TOTAL_COST_COL, row.total_cost)
                .map_err(export_error("write total cost"))?;
            if let Some(lead_time) = row.lead_time {
                worksheet
                    .write_number(excel_row, 3, lead_time)
                    .map_err(export_error("write lead time"))?;
            }
        }

        self.add_top_highlight(worksheet)
    }

    /// Top-N rule on the total cost column
    fn add_top_highlight(&self, worksheet: &mut Worksheet) -> ReportResult<()> {
        let Some((first_row, last_row)) = self.highlight_range.rows(self.summary.len()) else {
            debug!("no summary rows, skipping highlight rule");
            return Ok(());
        };

        let highlight = Format::new()
            .set_background_color(Color::RGB(HIGHLIGHT_BACKGROUND))
            .set_font_color(Color::RGB(HIGHLIGHT_FONT));
        let rule = ConditionalFormatTop::new()
            .set_rule(ConditionalFormatTopRule::Top(self.highlight_top))
            .set_format(highlight);

        worksheet
            .add_conditional_format(
                first_row,
                SUMMARY_TOTAL_COST_COL,
                last_row,
                SUMMARY_TOTAL_COST_COL,
                &rule,
            )
            .map_err(export_error("add conditional format"))?;

        debug!(
            range = %self.highlight_ref().unwrap_or_default(),
            top = self.highlight_top,
            "added top-N highlight"
        );
        Ok(())
    }

    fn export_cleaned(&self, workbook: &mut Workbook) -> ReportResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(CLEANED_SHEET)
            .map_err(export_error("set worksheet name"))?;

        let headers: Vec<&str> = self.cleaned.headers.iter().map(String::as_str).collect();
        write_header(worksheet, &headers)?;

        for (idx, record) in self.cleaned.records.iter().enumerate() {
            let excel_row = (idx + 1) as u32;
            for (col_idx, cell) in record.cells.iter().enumerate() {
                write_cell_value(worksheet, excel_row, col_idx as u16, cell)?;
            }
        }

        Ok(())
    }
}

fn write_header(worksheet: &mut Worksheet, columns: &[&str]) -> ReportResult<()> {
    let header_format = Format::new().set_bold();
    for (col_idx, name) in columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_idx as u16, *name, &header_format)
            .map_err(export_error("write header"))?;
    }
    Ok(())
}

/// Numbers as numbers, text as strings, missing values as blank cells
fn write_cell_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> ReportResult<()> {
    match value {
        CellValue::Number(n) => {
            worksheet
                .write_number(row, col, *n)
                .map_err(export_error("write number"))?;
        }
        CellValue::Text(s) => {
            worksheet
                .write_string(row, col, s)
                .map_err(export_error("write text"))?;
        }
        CellValue::Empty => {}
    }
    Ok(())
}
