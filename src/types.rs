//==============================================================================
// Column Names
//==============================================================================

/// Supplier identifier column (grouping key)
pub const SUPPLIER: &str = "Supplier";
/// Price per unit column
pub const UNIT_COST: &str = "Unit_Cost";
/// Quantity column
pub const QUANTITY: &str = "Quantity";
/// Lead time column, in days
pub const LEAD_TIME: &str = "Lead_Time";
/// Derived column: `Unit_Cost * Quantity`
pub const TOTAL_COST: &str = "Total_Cost";

/// Columns that must exist in the input after header normalization
pub const REQUIRED_COLUMNS: [&str; 4] = [SUPPLIER, UNIT_COST, QUANTITY, LEAD_TIME];

/// Cell contents treated as a missing value (compared after trimming)
pub const MISSING_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

//==============================================================================
// Cell Values
//==============================================================================

/// A single cell of the cleaned table, typed the way it is written to Excel
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Classify a raw CSV field: missing tokens become `Empty`,
    /// numeric text becomes `Number`, anything else stays `Text`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_missing(trimmed) {
            CellValue::Empty
        } else if let Ok(n) = trimmed.parse::<f64>() {
            CellValue::Number(n)
        } else {
            CellValue::Text(raw.to_string())
        }
    }
}

/// Whether a (trimmed) field counts as a missing value
pub fn is_missing(field: &str) -> bool {
    let field = field.trim();
    field.is_empty() || MISSING_TOKENS.contains(&field)
}

//==============================================================================
// Cleaned Table
//==============================================================================

/// One input row that survived cleaning
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    /// `None` when the supplier cell was missing; such rows are kept in the
    /// cleaned table but do not belong to any summary group
    pub supplier: Option<String>,
    pub unit_cost: f64,
    pub quantity: f64,
    pub lead_time: Option<f64>,
    pub total_cost: f64,
    /// All cells of the row, aligned with `CleanedTable::headers`
    /// (the `Total_Cost` cell included)
    pub cells: Vec<CellValue>,
}

/// Row counts collected while cleaning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl CleaningStats {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

/// The cleaned input: normalized headers, surviving rows, and drop counts
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    pub headers: Vec<String>,
    pub records: Vec<CleanedRecord>,
    pub stats: CleaningStats,
}

impl CleanedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of a normalized column name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Sum of `Total_Cost` over every cleaned row
    pub fn total_cost_sum(&self) -> f64 {
        self.records.iter().map(|r| r.total_cost).sum()
    }
}

//==============================================================================
// Supplier Summary
//==============================================================================

/// Aggregate row: one per distinct supplier
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierSummary {
    pub supplier: String,
    pub quantity: f64,
    pub total_cost: f64,
    /// Mean lead time over rows that have one; `None` if none do
    pub lead_time: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_from_raw() {
        assert_eq!(CellValue::from_raw(" 12.5 "), CellValue::Number(12.5));
        assert_eq!(CellValue::from_raw(""), CellValue::Empty);
        assert_eq!(CellValue::from_raw("  "), CellValue::Empty);
        assert_eq!(CellValue::from_raw("N/A"), CellValue::Empty);
        assert_eq!(CellValue::from_raw("<NA>"), CellValue::Empty);
        assert_eq!(CellValue::from_raw("1.#QNAN"), CellValue::Empty);
        assert_eq!(
            CellValue::from_raw("Acme Corp"),
            CellValue::Text("Acme Corp".to_string())
        );
    }

    #[test]
    fn test_is_missing_tokens() {
        for token in MISSING_TOKENS {
            assert!(is_missing(token), "{token} should be missing");
        }
        assert!(!is_missing("0"));
        assert!(!is_missing("none of these"));
    }

    #[test]
    fn test_cleaning_stats_rows_kept() {
        let stats = CleaningStats {
            rows_read: 10,
            rows_dropped: 3,
        };
        assert_eq!(stats.rows_kept(), 7);
    }
}
