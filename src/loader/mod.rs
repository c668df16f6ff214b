//! CSV loading and cleaning
//!
//! Reads the supplier cost file, normalizes header names, drops rows that
//! lack a unit cost or quantity, and adds the derived `Total_Cost` column.

use crate::error::{ReportError, ReportResult};
use crate::types::{
    is_missing, CellValue, CleanedRecord, CleanedTable, CleaningStats, LEAD_TIME, QUANTITY,
    REQUIRED_COLUMNS, SUPPLIER, TOTAL_COST, UNIT_COST,
};
use std::fs::{self, File};
use std::io::{self, ErrorKind, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Rows as read from the file, before any cleaning
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Trim a header and replace each interior space with an underscore
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .replace(' ', "_")
}

/// Read and clean the input file in one step
pub fn load(path: &Path, delimiter: u8) -> ReportResult<CleanedTable> {
    let raw = read_csv(path, delimiter)?;
    clean(raw, path)
}

/// Read a delimited file with a header row
pub fn read_csv(path: &Path, delimiter: u8) -> ReportResult<RawTable> {
    let unreadable = |source: io::Error| match source.kind() {
        ErrorKind::NotFound => ReportError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => ReportError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        },
    };

    if fs::metadata(path).map_err(unreadable)?.is_dir() {
        return Err(unreadable(io::Error::new(
            ErrorKind::InvalidInput,
            "path is a directory",
        )));
    }
    let file = File::open(path).map_err(unreadable)?;
    read_csv_from(file, delimiter, path)
}

/// Read delimited data from any reader; `source` is only used in errors
pub fn read_csv_from<R: Read>(reader: R, delimiter: u8, source: &Path) -> ReportResult<RawTable> {
    let csv_error = |e: csv::Error| ReportError::Csv {
        path: source.to_path_buf(),
        message: e.to_string(),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if record.len() > headers.len() {
            return Err(ReportError::Csv {
                path: source.to_path_buf(),
                message: format!(
                    "row {} has {} fields but the header has {}",
                    idx + 2,
                    record.len(),
                    headers.len()
                ),
            });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(path = %source.display(), rows = rows.len(), "read csv");
    Ok(RawTable { headers, rows })
}

/// Positions of the named columns in the normalized header
struct ColumnIndex {
    supplier: usize,
    unit_cost: usize,
    quantity: usize,
    lead_time: usize,
    total_cost: usize,
}

impl ColumnIndex {
    /// Resolve required columns, appending `Total_Cost` when absent
    fn resolve(headers: &mut Vec<String>, source: &Path) -> ReportResult<Self> {
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ReportError::MissingColumn {
                    column: column.to_string(),
                    path: source.to_path_buf(),
                    available: headers.clone(),
                });
            }
        }

        let position = |name: &str| headers.iter().position(|h| h == name).unwrap_or_default();
        let supplier = position(SUPPLIER);
        let unit_cost = position(UNIT_COST);
        let quantity = position(QUANTITY);
        let lead_time = position(LEAD_TIME);

        let total_cost = match headers.iter().position(|h| h == TOTAL_COST) {
            Some(idx) => idx,
            None => {
                headers.push(TOTAL_COST.to_string());
                headers.len() - 1
            }
        };

        Ok(Self {
            supplier,
            unit_cost,
            quantity,
            lead_time,
            total_cost,
        })
    }
}

/// Parse a required numeric cell; text that is not a number is an error
fn numeric(cell: &CellValue, column: &str, row: usize) -> ReportResult<Option<f64>> {
    match cell {
        CellValue::Number(n) => Ok(Some(*n)),
        CellValue::Empty => Ok(None),
        CellValue::Text(value) => Err(ReportError::InvalidNumber {
            column: column.to_string(),
            row,
            value: value.clone(),
        }),
    }
}

/// Normalize headers, drop incomplete rows, derive `Total_Cost`
pub fn clean(raw: RawTable, source: &Path) -> ReportResult<CleanedTable> {
    let mut headers: Vec<String> = raw.headers.iter().map(|h| normalize_header(h)).collect();
    let cols = ColumnIndex::resolve(&mut headers, source)?;

    let mut stats = CleaningStats {
        rows_read: raw.rows.len(),
        rows_dropped: 0,
    };
    let mut records = Vec::with_capacity(raw.rows.len());

    for (idx, fields) in raw.rows.iter().enumerate() {
        // Spreadsheet numbering: header is row 1
        let row = idx + 2;

        let mut cells: Vec<CellValue> = fields.iter().map(|f| CellValue::from_raw(f)).collect();
        cells.resize(headers.len(), CellValue::Empty);

        let unit_cost = numeric(&cells[cols.unit_cost], UNIT_COST, row)?;
        let quantity = numeric(&cells[cols.quantity], QUANTITY, row)?;
        let (Some(unit_cost), Some(quantity)) = (unit_cost, quantity) else {
            stats.rows_dropped += 1;
            continue;
        };
        let lead_time = numeric(&cells[cols.lead_time], LEAD_TIME, row)?;

        let supplier = match fields.get(cols.supplier).map(|s| s.trim()) {
            Some(s) if !is_missing(s) => Some(s.to_string()),
            _ => None,
        };
        // The sheet shows the same name the summary groups by
        if let Some(name) = &supplier {
            if matches!(cells[cols.supplier], CellValue::Text(_)) {
                cells[cols.supplier] = CellValue::Text(name.clone());
            }
        }

        let total_cost = unit_cost * quantity;
        cells[cols.total_cost] = CellValue::Number(total_cost);

        records.push(CleanedRecord {
            supplier,
            unit_cost,
            quantity,
            lead_time,
            total_cost,
            cells,
        });
    }

    if stats.rows_dropped > 0 {
        warn!(
            dropped = stats.rows_dropped,
            read = stats.rows_read,
            "dropped rows missing {} or {}",
            UNIT_COST,
            QUANTITY
        );
    }
    info!(rows = records.len(), path = %source.display(), "cleaned input");

    Ok(CleanedTable {
        headers,
        records,
        stats,
    })
}
