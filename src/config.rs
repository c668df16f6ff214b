//! Report configuration
//!
//! Defaults reproduce the plain invocation: read `cbom_sample.csv` from the
//! working directory, write under `outputs/`, highlight the top 3 suppliers
//! within the fixed `C2:C100` range. A YAML file can override any field;
//! command-line flags override the file.

use crate::error::{ReportError, ReportResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default input file, relative to the working directory
pub const DEFAULT_INPUT: &str = "cbom_sample.csv";
/// Default root under which `report_<timestamp>` directories are created
pub const DEFAULT_OUTPUT_ROOT: &str = "outputs";
/// Data rows covered by the fixed highlight range (`C2:C100`)
pub const CAPPED_HIGHLIGHT_ROWS: u32 = 99;
/// Number of top suppliers highlighted on the summary sheet
pub const DEFAULT_HIGHLIGHT_TOP: u16 = 3;

/// How the top-N highlight range on the summary sheet is sized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HighlightRange {
    /// Fixed range of 99 data rows; suppliers beyond it are never highlighted
    #[default]
    Capped,
    /// Range sized to the actual number of summary rows
    FitToData,
}

impl HighlightRange {
    /// Zero-based, inclusive (first_row, last_row) of the highlighted cells
    /// for a summary of `row_count` suppliers. Row 0 is the header.
    pub fn rows(&self, row_count: usize) -> Option<(u32, u32)> {
        match self {
            HighlightRange::Capped => Some((1, CAPPED_HIGHLIGHT_ROWS)),
            HighlightRange::FitToData if row_count == 0 => None,
            HighlightRange::FitToData => Some((1, row_count as u32)),
        }
    }
}

/// Settings for one report run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_root: PathBuf,
    pub highlight_range: HighlightRange,
    pub highlight_top: u16,
    /// TrueType font for chart text; system locations are searched when unset
    pub font: Option<PathBuf>,
    pub delimiter: char,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            highlight_range: HighlightRange::default(),
            highlight_top: DEFAULT_HIGHLIGHT_TOP,
            font: None,
            delimiter: ',',
        }
    }
}

impl ReportConfig {
    /// Load a YAML config file, falling back to defaults for absent keys
    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config: ReportConfig = serde_yaml::from_str(&content).map_err(|e| {
            ReportError::Config(format!("Invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the given file when present
    pub fn load(path: Option<&Path>) -> ReportResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.highlight_top == 0 {
            return Err(ReportError::Config(
                "highlight_top must be at least 1".to_string(),
            ));
        }
        if !self.delimiter.is_ascii() {
            return Err(ReportError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// The delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}
