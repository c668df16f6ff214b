//! Error message tests: every failure names the file or column involved

use cbom_report::charts::ChartRenderer;
use cbom_report::error::ReportError;
use cbom_report::loader;
use cbom_report::types::SupplierSummary;
use std::path::{Path, PathBuf};

#[test]
fn test_input_not_found_message() {
    let err = ReportError::InputNotFound {
        path: PathBuf::from("data/costs.csv"),
    };
    assert_eq!(err.to_string(), "Input file not found: data/costs.csv");
}

#[test]
fn test_missing_column_message_lists_available() {
    let err = ReportError::MissingColumn {
        column: "Quantity".to_string(),
        path: PathBuf::from("costs.csv"),
        available: vec!["Supplier".to_string(), "Unit_Cost".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Missing required column 'Quantity' in costs.csv (available: Supplier, Unit_Cost)"
    );
}

#[test]
fn test_invalid_number_message() {
    let err = ReportError::InvalidNumber {
        column: "Unit_Cost".to_string(),
        row: 7,
        value: "ten".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid number in column 'Unit_Cost' at row 7: 'ten'"
    );
}

#[test]
fn test_output_dir_message_keeps_source() {
    use std::error::Error;

    let err = ReportError::OutputDir {
        path: PathBuf::from("/readonly/outputs"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.to_string().starts_with("Cannot create output directory /readonly/outputs"));
    assert!(err.source().is_some());
}

#[test]
fn test_input_unreadable_message_names_file() {
    use std::error::Error;

    let err = ReportError::InputUnreadable {
        path: PathBuf::from("locked/costs.csv"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert_eq!(err.to_string(), "Cannot read input file locked/costs.csv: denied");
    assert!(err.source().is_some());
}

#[test]
fn test_loader_directory_input_names_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = loader::load(dir.path(), b',').unwrap_err();

    assert!(matches!(err, ReportError::InputUnreadable { .. }));
    assert!(err.to_string().contains(&dir.path().display().to_string()));
}

#[test]
fn test_chart_error_names_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("missing").join("pie_chart.png");
    let summary = vec![SupplierSummary {
        supplier: "A".to_string(),
        quantity: 1.0,
        total_cost: 10.0,
        lead_time: None,
    }];

    let err = ChartRenderer::without_text().pie(&summary, &path).unwrap_err();
    assert!(matches!(err, ReportError::Chart(_)));
    assert!(err.to_string().contains("pie_chart.png"), "{err}");
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let err: ReportError = io.into();
    assert!(matches!(err, ReportError::Io(_)));
    assert_eq!(err.to_string(), "IO error: disk full");
}

#[test]
fn test_loader_missing_column_names_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data/missing_column.csv");
    let err = loader::load(&path, b',').unwrap_err();

    let message = err.to_string();
    assert!(message.contains("'Quantity'"), "{message}");
    assert!(message.contains("missing_column.csv"), "{message}");
    assert!(message.contains("Unit_Cost"), "{message}");
}
