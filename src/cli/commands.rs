use crate::config::{HighlightRange, ReportConfig};
use crate::error::ReportResult;
use crate::output::REPORT_FILES;
use crate::pipeline;
use crate::types::{SupplierSummary, QUANTITY, UNIT_COST};
use colored::Colorize;
use std::path::PathBuf;

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
    pub highlight_range: Option<HighlightRange>,
    pub highlight_top: Option<u16>,
    pub font: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Load the config file (or defaults) and apply these overrides
    pub fn resolve(self, config_file: Option<PathBuf>) -> ReportResult<ReportConfig> {
        let mut config = ReportConfig::load(config_file.as_deref())?;
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(root) = self.output_root {
            config.output_root = root;
        }
        if let Some(range) = self.highlight_range {
            config.highlight_range = range;
        }
        if let Some(top) = self.highlight_top {
            config.highlight_top = top;
        }
        if let Some(font) = self.font {
            config.font = Some(font);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Install the fmt subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "cbom_report=info"
    } else {
        "cbom_report=warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a currency amount with two decimals
fn format_money(n: f64) -> String {
    format!("${:.2}", n)
}

/// Execute the generate command (also the default when no command is given)
pub fn generate(
    config_file: Option<PathBuf>,
    overrides: ConfigOverrides,
    verbose: bool,
) -> ReportResult<()> {
    let config = overrides.resolve(config_file)?;

    println!("{}", "📦 CBOM Report - Supplier Cost Report".bold().green());
    println!("   Input:  {}", config.input.display());
    println!("   Output: {}\n", config.output_root.display());

    if verbose {
        println!("{}", "📖 Loading, cleaning and aggregating...".cyan());
    }

    let timestamp = chrono::Local::now().naive_local();
    let run = pipeline::generate(&config, timestamp)?;

    if verbose {
        println!(
            "   {} suppliers from {} cleaned rows\n",
            run.summary.len(),
            run.cleaned_rows
        );
    }
    if !run.chart_text {
        println!(
            "{}",
            "⚠️  No font found: charts were drawn without text (use --font)".yellow()
        );
    }

    println!(
        "\n{} {}",
        "✅ Report created at:".bold().green(),
        run.layout.dir().display()
    );
    for file in REPORT_FILES {
        println!("- {}", file);
    }

    println!(
        "\n   Rows: {} cleaned, {} dropped (missing {} or {})",
        run.cleaned_rows, run.stats.rows_dropped, UNIT_COST, QUANTITY
    );
    if run.stats.rows_dropped > 0 {
        println!(
            "{}",
            format!(
                "⚠️  {} of {} input rows were excluded",
                run.stats.rows_dropped, run.stats.rows_read
            )
            .yellow()
        );
    }

    Ok(())
}

/// Execute the summary command: print the supplier ranking, write nothing
pub fn summary(
    config_file: Option<PathBuf>,
    overrides: ConfigOverrides,
    verbose: bool,
) -> ReportResult<()> {
    let config = overrides.resolve(config_file)?;

    println!("{}", "📦 CBOM Report - Supplier Summary".bold().green());
    println!("   Input: {}\n", config.input.display());

    let (cleaned, summary) = pipeline::analyze(&config)?;

    if verbose {
        println!(
            "   {} rows read, {} cleaned, {} dropped\n",
            cleaned.stats.rows_read,
            cleaned.len(),
            cleaned.stats.rows_dropped
        );
    }

    print_summary_table(&summary, config.highlight_top as usize);

    let grand_total: f64 = summary.iter().map(|s| s.total_cost).sum();
    println!("   Total spend: {}", format_money(grand_total).bold());

    Ok(())
}

/// Print the supplier ranking; the top `highlight` rows are marked
fn print_summary_table(summary: &[SupplierSummary], highlight: usize) {
    println!("{}", "📊 Spend by Supplier:".bold().cyan());
    println!("{}", "─".repeat(64));
    println!(
        "{:<24} {:>10} {:>16} {:>10}",
        "Supplier".bold(),
        "Quantity".bold(),
        "Total_Cost".bold(),
        "Lead_Time".bold()
    );
    println!("{}", "─".repeat(64));

    for (idx, row) in summary.iter().enumerate() {
        let cost = format_money(row.total_cost);
        let cost = if idx < highlight {
            cost.green().bold()
        } else {
            cost.normal()
        };
        let lead_time = row
            .lead_time
            .map(|l| format!("{:.1}", l))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<24} {:>10} {:>16} {:>10}",
            row.supplier.bright_blue(),
            format_number(row.quantity),
            cost,
            lead_time
        );
    }

    println!("{}", "─".repeat(64));
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
