//! PNG charts for the supplier report
//!
//! Each chart owns its own bitmap backend: it is created, drawn, presented
//! and dropped inside a single function, so nothing carries over from one
//! chart to the next.

mod bar;
mod fonts;
mod line;
mod pie;

pub use fonts::{register_chart_font, CHART_FONT, FONT_CANDIDATES};

use crate::error::{ReportError, ReportResult};
use crate::output::OutputLayout;
use crate::types::{CleanedTable, SupplierSummary};
use plotters::style::RGBColor;
use std::fmt::Display;
use std::path::Path;
use tracing::info;

pub const PIE_SIZE: (u32, u32) = (600, 600);
pub const BAR_SIZE: (u32, u32) = (800, 500);
pub const LINE_SIZE: (u32, u32) = (1000, 600);

pub const PIE_TITLE: &str = "Supplier Spend Share";
pub const BAR_TITLE: &str = "Total Cost by Supplier";
pub const LINE_TITLE: &str = "Cost vs Lead Time by Supplier";

/// Map a drawing failure to an error naming the chart file
pub(crate) fn chart_error<E: Display>(path: &Path) -> impl Fn(E) -> ReportError + '_ {
    move |e| ReportError::Chart(format!("{}: {}", path.display(), e))
}

/// Categorical colors for per-supplier series
const CATEGORY_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Samples of a dark-purple to yellow sequential scale
const SEQUENTIAL_COLORS: [RGBColor; 9] = [
    RGBColor(68, 1, 84),
    RGBColor(71, 44, 122),
    RGBColor(59, 81, 139),
    RGBColor(44, 113, 142),
    RGBColor(33, 144, 141),
    RGBColor(39, 173, 129),
    RGBColor(92, 200, 99),
    RGBColor(170, 220, 50),
    RGBColor(253, 231, 37),
];

pub(crate) fn category_color(index: usize) -> RGBColor {
    CATEGORY_COLORS[index % CATEGORY_COLORS.len()]
}

/// Color `index` of `count` evenly spread along the sequential scale
pub(crate) fn sequential_color(index: usize, count: usize) -> RGBColor {
    if count <= 1 {
        return SEQUENTIAL_COLORS[SEQUENTIAL_COLORS.len() / 2];
    }
    let last = SEQUENTIAL_COLORS.len() - 1;
    let pos = (index.min(count - 1) * last + (count - 1) / 2) / (count - 1);
    SEQUENTIAL_COLORS[pos]
}

/// Renders the three report charts
#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    text: bool,
}

impl ChartRenderer {
    /// Register a font (once per process) and report whether text can be drawn
    pub fn new(font: Option<&Path>) -> Self {
        Self {
            text: register_chart_font(font).is_some(),
        }
    }

    /// Renderer that draws shapes only
    pub fn without_text() -> Self {
        Self { text: false }
    }

    pub fn draws_text(&self) -> bool {
        self.text
    }

    /// Spend share per supplier
    pub fn pie(&self, summary: &[SupplierSummary], path: &Path) -> ReportResult<()> {
        pie::render(summary, path, self.text)
    }

    /// Total cost per supplier
    pub fn bar(&self, summary: &[SupplierSummary], path: &Path) -> ReportResult<()> {
        bar::render(summary, path, self.text)
    }

    /// Total cost against lead time, one line per supplier, from cleaned rows
    pub fn line(&self, cleaned: &CleanedTable, path: &Path) -> ReportResult<()> {
        line::render(cleaned, path, self.text)
    }

    /// Pie, bar, then line chart into the run directory
    pub fn render_all(
        &self,
        summary: &[SupplierSummary],
        cleaned: &CleanedTable,
        layout: &OutputLayout,
    ) -> ReportResult<()> {
        self.pie(summary, &layout.pie_chart_path())?;
        self.bar(summary, &layout.bar_chart_path())?;
        self.line(cleaned, &layout.line_chart_path())?;
        info!(dir = %layout.dir().display(), "rendered charts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_color_endpoints() {
        assert_eq!(sequential_color(0, 5), SEQUENTIAL_COLORS[0]);
        assert_eq!(sequential_color(4, 5), SEQUENTIAL_COLORS[8]);
        assert_eq!(sequential_color(0, 1), SEQUENTIAL_COLORS[4]);
        assert_eq!(sequential_color(10, 3), SEQUENTIAL_COLORS[8]);
    }

    #[test]
    fn test_category_color_wraps() {
        assert_eq!(category_color(0), category_color(10));
        assert_ne!(category_color(0), category_color(1));
    }
}
