//! The report pipeline: output directory, load and clean, aggregate,
//! workbook, charts. Stages run strictly in that order.

use crate::charts::ChartRenderer;
use crate::config::ReportConfig;
use crate::core::summarize;
use crate::error::ReportResult;
use crate::excel::ReportExporter;
use crate::loader;
use crate::output::OutputLayout;
use crate::types::{CleanedTable, CleaningStats, SupplierSummary};
use chrono::NaiveDateTime;
use tracing::{error, info};

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub layout: OutputLayout,
    pub stats: CleaningStats,
    pub summary: Vec<SupplierSummary>,
    pub cleaned_rows: usize,
    /// Whether chart text could be drawn (a font was available)
    pub chart_text: bool,
}

/// Load, clean and aggregate without writing anything
pub fn analyze(config: &ReportConfig) -> ReportResult<(CleanedTable, Vec<SupplierSummary>)> {
    let cleaned = loader::load(&config.input, config.delimiter_byte())?;
    let summary = summarize(&cleaned);
    Ok((cleaned, summary))
}

/// Run the full pipeline, registering a chart font from the config
pub fn generate(config: &ReportConfig, timestamp: NaiveDateTime) -> ReportResult<ReportRun> {
    let charts = ChartRenderer::new(config.font.as_deref());
    generate_with(config, timestamp, charts)
}

/// Run the full pipeline with the given chart renderer.
///
/// If any stage after the output directory exists fails, the directory is
/// removed so a failed run leaves no partial report behind.
pub fn generate_with(
    config: &ReportConfig,
    timestamp: NaiveDateTime,
    charts: ChartRenderer,
) -> ReportResult<ReportRun> {
    config.validate()?;
    let layout = OutputLayout::create(&config.output_root, timestamp)?;

    match write_report(config, &layout, charts) {
        Ok((cleaned, summary)) => {
            info!(dir = %layout.dir().display(), "report complete");
            Ok(ReportRun {
                stats: cleaned.stats,
                cleaned_rows: cleaned.len(),
                summary,
                chart_text: charts.draws_text(),
                layout,
            })
        }
        Err(e) => {
            let dir = layout.dir().to_path_buf();
            if let Err(cleanup) = layout.discard() {
                error!(dir = %dir.display(), error = %cleanup, "failed to remove partial report");
            } else {
                info!(dir = %dir.display(), "removed partial report");
            }
            Err(e)
        }
    }
}

fn write_report(
    config: &ReportConfig,
    layout: &OutputLayout,
    charts: ChartRenderer,
) -> ReportResult<(CleanedTable, Vec<SupplierSummary>)> {
    let (cleaned, summary) = analyze(config)?;

    ReportExporter::new(&summary, &cleaned)
        .with_highlight(config.highlight_range, config.highlight_top)
        .export(&layout.workbook_path())?;

    charts.render_all(&summary, &cleaned, layout)?;

    Ok((cleaned, summary))
}
