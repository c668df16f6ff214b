//! CBOM Report - supplier cost report generator
//!
//! Reads a supplier cost CSV, cleans it, aggregates spend per supplier and
//! writes a report directory containing an Excel workbook and three charts.
//!
//! # Pipeline
//!
//! 1. [`output::OutputLayout`] creates `outputs/report_<timestamp>/`
//! 2. [`loader::load`] normalizes headers, drops rows missing unit cost or
//!    quantity, and derives `Total_Cost`
//! 3. [`core::summarize`] groups by supplier and ranks by total cost
//! 4. [`excel::ReportExporter`] writes the `Summary` and `Cleaned_Data` sheets
//! 5. [`charts::ChartRenderer`] draws the pie, bar and line charts
//!
//! # Example
//!
//! ```no_run
//! use cbom_report::config::ReportConfig;
//! use cbom_report::pipeline;
//!
//! let config = ReportConfig::default();
//! let timestamp = chrono::Local::now().naive_local();
//! let run = pipeline::generate(&config, timestamp)?;
//!
//! println!("Report created at: {}", run.layout.dir().display());
//! # Ok::<(), cbom_report::error::ReportError>(())
//! ```

pub mod charts;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use error::{ReportError, ReportResult};
pub use types::{CellValue, CleanedRecord, CleanedTable, SupplierSummary};
