use cbom_report::cli::{self, ConfigOverrides};
use cbom_report::config::HighlightRange;
use cbom_report::error::ReportResult;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cbom-report")]
#[command(about = "Supplier cost report: cleaned data, per-supplier spend, Excel workbook and charts.")]
#[command(long_about = "CBOM Report - supplier cost report generator

Reads a supplier cost CSV (columns Supplier, Unit Cost, Quantity, Lead Time),
drops rows without a unit cost or quantity, adds Total_Cost, and ranks
suppliers by total spend.

COMMANDS:
  generate  - Write outputs/report_<timestamp>/ (default when no command given)
  summary   - Print the supplier ranking without writing files

OUTPUT FILES:
  Supplier_Report.xlsx   Summary + Cleaned_Data sheets
  pie_chart.png          Spend share per supplier
  bar_chart.png          Total cost per supplier
  line_chart.png         Total cost vs lead time per supplier

EXAMPLES:
  cbom-report                                   # cbom_sample.csv -> outputs/
  cbom-report generate -i costs.csv -o reports
  cbom-report generate --highlight-range fit-to-data --top 5
  cbom-report summary -i costs.csv")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
struct CommonArgs {
    /// Input CSV file
    #[arg(short, long, env = "CBOM_REPORT_INPUT")]
    input: Option<PathBuf>,

    /// YAML config file (command-line flags take precedence)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Generate the full supplier report.

Creates <output-root>/report_<YYYY-MM-DD_HH-MM-SS>/ containing the workbook
and the three charts. An existing directory is never reused. If any step
fails the partially written directory is removed.

HIGHLIGHT RANGE:
  capped       Top-N rule over C2:C100 (suppliers past row 100 are never highlighted)
  fit-to-data  Top-N rule over exactly the summary rows")]
    /// Generate the workbook and charts
    Generate {
        #[command(flatten)]
        common: CommonArgs,

        /// Root directory for report_<timestamp> folders
        #[arg(short, long, env = "CBOM_REPORT_OUTPUT")]
        output_root: Option<PathBuf>,

        /// How the top-N highlight range is sized
        #[arg(long, value_enum)]
        highlight_range: Option<HighlightRange>,

        /// Number of top suppliers to highlight
        #[arg(long)]
        top: Option<u16>,

        /// TrueType font for chart text
        #[arg(long, env = "CBOM_REPORT_FONT")]
        font: Option<PathBuf>,
    },

    /// Print the supplier summary without writing files
    Summary {
        #[command(flatten)]
        common: CommonArgs,
    },
}

fn main() -> ReportResult<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            cli::init_logging(false);
            cli::generate(None, ConfigOverrides::default(), false)
        }

        Some(Commands::Generate {
            common,
            output_root,
            highlight_range,
            top,
            font,
        }) => {
            cli::init_logging(common.verbose);
            let overrides = ConfigOverrides {
                input: common.input,
                output_root,
                highlight_range,
                highlight_top: top,
                font,
            };
            cli::generate(common.config, overrides, common.verbose)
        }

        Some(Commands::Summary { common }) => {
            cli::init_logging(common.verbose);
            let overrides = ConfigOverrides {
                input: common.input,
                ..Default::default()
            };
            cli::summary(common.config, overrides, common.verbose)
        }
    }
}
