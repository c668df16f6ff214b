use std::path::PathBuf;
use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Cannot read input file {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {message}", .path.display())]
    Csv { path: PathBuf, message: String },

    #[error(
        "Missing required column '{column}' in {} (available: {})",
        .path.display(),
        .available.join(", ")
    )]
    MissingColumn {
        column: String,
        path: PathBuf,
        available: Vec<String>,
    },

    #[error("Invalid number in column '{column}' at row {row}: '{value}'")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Config error: {0}")]
    Config(String),
}
