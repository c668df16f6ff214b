//! Excel export of the supplier report
//!
//! One workbook, two sheets:
//! - `Summary`: one row per supplier, ranked by total cost, with the top
//!   values of the total cost column highlighted
//! - `Cleaned_Data`: every cleaned input row plus `Total_Cost`

mod exporter;

pub use exporter::{
    column_letter, ReportExporter, CLEANED_SHEET, SUMMARY_COLUMNS, SUMMARY_SHEET,
    SUMMARY_TOTAL_COST_COL,
};
