//! Output location for a single report run
//!
//! Every run gets its own `report_<timestamp>` directory under the output
//! root. The timestamp is passed in rather than read from the clock here, so
//! callers (and tests) decide what "now" is.

use crate::error::{ReportError, ReportResult};
use chrono::NaiveDateTime;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub const WORKBOOK_FILE: &str = "Supplier_Report.xlsx";
pub const PIE_CHART_FILE: &str = "pie_chart.png";
pub const BAR_CHART_FILE: &str = "bar_chart.png";
pub const LINE_CHART_FILE: &str = "line_chart.png";

/// Files written into every run directory, in the order they are produced
pub const REPORT_FILES: [&str; 4] = [WORKBOOK_FILE, PIE_CHART_FILE, BAR_CHART_FILE, LINE_CHART_FILE];

const MAX_COLLISION_SUFFIX: u32 = 1000;

/// `report_2024-03-01_14-05-09`
pub fn report_dir_name(timestamp: NaiveDateTime) -> String {
    format!("report_{}", timestamp.format(TIMESTAMP_FORMAT))
}

/// A freshly created, run-specific output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    dir: PathBuf,
}

impl OutputLayout {
    /// Create `<root>/report_<timestamp>/`, including missing parents.
    ///
    /// An existing directory is never reused: when two runs land in the same
    /// second the later one gets `_2`, `_3`, ... appended.
    pub fn create(root: &Path, timestamp: NaiveDateTime) -> ReportResult<Self> {
        fs::create_dir_all(root).map_err(|source| ReportError::OutputDir {
            path: root.to_path_buf(),
            source,
        })?;

        let base = report_dir_name(timestamp);
        for attempt in 1..=MAX_COLLISION_SUFFIX {
            let name = if attempt == 1 {
                base.clone()
            } else {
                format!("{}_{}", base, attempt)
            };
            let dir = root.join(name);

            match fs::create_dir(&dir) {
                Ok(()) => {
                    info!(dir = %dir.display(), "created output directory");
                    return Ok(Self { dir });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(dir = %dir.display(), "output directory exists, trying next suffix");
                }
                Err(source) => return Err(ReportError::OutputDir { path: dir, source }),
            }
        }

        Err(ReportError::OutputDir {
            path: root.join(base),
            source: std::io::Error::new(
                ErrorKind::AlreadyExists,
                "too many report directories for the same timestamp",
            ),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn workbook_path(&self) -> PathBuf {
        self.dir.join(WORKBOOK_FILE)
    }

    pub fn pie_chart_path(&self) -> PathBuf {
        self.dir.join(PIE_CHART_FILE)
    }

    pub fn bar_chart_path(&self) -> PathBuf {
        self.dir.join(BAR_CHART_FILE)
    }

    pub fn line_chart_path(&self) -> PathBuf {
        self.dir.join(LINE_CHART_FILE)
    }

    /// Delete the run directory and everything written into it
    pub fn discard(self) -> ReportResult<()> {
        fs::remove_dir_all(&self.dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn fixed_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_report_dir_name_format() {
        assert_eq!(
            report_dir_name(fixed_timestamp()),
            "report_2024-03-01_14-05-09"
        );
    }

    #[test]
    fn test_create_makes_nested_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("a").join("b");

        let layout = OutputLayout::create(&root, fixed_timestamp()).unwrap();
        assert!(layout.dir().is_dir());
        assert_eq!(layout.dir(), root.join("report_2024-03-01_14-05-09"));
        assert_eq!(
            layout.workbook_path(),
            layout.dir().join("Supplier_Report.xlsx")
        );
    }

    #[test]
    fn test_same_timestamp_gets_suffix() {
        let temp = TempDir::new().unwrap();
        let first = OutputLayout::create(temp.path(), fixed_timestamp()).unwrap();
        let second = OutputLayout::create(temp.path(), fixed_timestamp()).unwrap();

        assert_ne!(first.dir(), second.dir());
        assert!(second
            .dir()
            .ends_with("report_2024-03-01_14-05-09_2"));
        assert!(first.dir().is_dir());
    }

    #[test]
    fn test_discard_removes_directory() {
        let temp = TempDir::new().unwrap();
        let layout = OutputLayout::create(temp.path(), fixed_timestamp()).unwrap();
        let dir = layout.dir().to_path_buf();
        fs::write(dir.join("partial.txt"), "x").unwrap();

        layout.discard().unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_root_is_a_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not_a_dir");
        fs::write(&file, "x").unwrap();

        let result = OutputLayout::create(&file, fixed_timestamp());
        assert!(matches!(result, Err(ReportError::OutputDir { .. })));
    }
}
