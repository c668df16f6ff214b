use super::*;
use crate::error::ReportError;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

// =========================================================================
// format_number Tests
// =========================================================================

#[test]
fn test_format_number_integer() {
    assert_eq!(format_number(100.0), "100");
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-50.0), "-50");
}

#[test]
fn test_format_number_decimal() {
    assert_eq!(format_number(2.5), "2.5");
    assert_eq!(format_number(0.125), "0.125");
}

#[test]
fn test_format_number_precision() {
    assert_eq!(format_number(0.123456789), "0.123457");
    assert_eq!(format_number(1.0000001), "1");
}

#[test]
fn test_format_money() {
    assert_eq!(format_money(40.0), "$40.00");
    assert_eq!(format_money(1234.567), "$1234.57");
}

// =========================================================================
// ConfigOverrides Tests
// =========================================================================

#[test]
fn test_overrides_without_config_file() {
    let config = ConfigOverrides {
        input: Some(PathBuf::from("x.csv")),
        highlight_top: Some(5),
        ..Default::default()
    }
    .resolve(None)
    .unwrap();

    assert_eq!(config.input, PathBuf::from("x.csv"));
    assert_eq!(config.highlight_top, 5);
    assert_eq!(config.output_root, PathBuf::from("outputs"));
}

#[test]
fn test_overrides_win_over_config_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("report.yaml");
    fs::write(
        &config_path,
        "input: from_file.csv\noutput_root: file_out\nhighlight_range: fit_to_data\n",
    )
    .unwrap();

    let config = ConfigOverrides {
        output_root: Some(PathBuf::from("cli_out")),
        ..Default::default()
    }
    .resolve(Some(config_path))
    .unwrap();

    assert_eq!(config.input, PathBuf::from("from_file.csv"));
    assert_eq!(config.output_root, PathBuf::from("cli_out"));
    assert_eq!(config.highlight_range, HighlightRange::FitToData);
}

#[test]
fn test_overrides_reject_zero_top() {
    let result = ConfigOverrides {
        highlight_top: Some(0),
        ..Default::default()
    }
    .resolve(None);
    assert!(matches!(result, Err(ReportError::Config(_))));
}

// =========================================================================
// Command Tests
// =========================================================================

#[test]
fn test_summary_command() {
    let temp = TempDir::new().unwrap();
    let input = write_csv(
        &temp,
        "costs.csv",
        "Supplier,Unit Cost,Quantity,Lead Time\nA,10,2,5\nA,5,4,7\nB,100,1,3\n",
    );

    let result = summary(
        None,
        ConfigOverrides {
            input: Some(input),
            ..Default::default()
        },
        true,
    );
    assert!(result.is_ok());
}

#[test]
fn test_summary_command_missing_input() {
    let temp = TempDir::new().unwrap();
    let result = summary(
        None,
        ConfigOverrides {
            input: Some(temp.path().join("missing.csv")),
            ..Default::default()
        },
        false,
    );
    assert!(matches!(result, Err(ReportError::InputNotFound { .. })));
}

#[test]
fn test_generate_command_writes_report() {
    let temp = TempDir::new().unwrap();
    let input = write_csv(
        &temp,
        "costs.csv",
        "Supplier,Unit Cost,Quantity,Lead Time\nA,10,2,5\nB,100,1,3\nC,7,,2\n",
    );
    let out = temp.path().join("out");

    let result = generate(
        None,
        ConfigOverrides {
            input: Some(input),
            output_root: Some(out.clone()),
            ..Default::default()
        },
        false,
    );
    assert!(result.is_ok(), "generate failed: {:?}", result.err());

    let runs: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(runs.len(), 1);
    let run_dir = runs[0].as_ref().unwrap().path();
    for file in REPORT_FILES {
        assert!(run_dir.join(file).is_file(), "{file} missing");
    }
}

#[test]
fn test_generate_command_bad_number_leaves_no_report() {
    let temp = TempDir::new().unwrap();
    let input = write_csv(
        &temp,
        "costs.csv",
        "Supplier,Unit_Cost,Quantity,Lead_Time\nA,ten,2,5\n",
    );
    let out = temp.path().join("out");

    let result = generate(
        None,
        ConfigOverrides {
            input: Some(input),
            output_root: Some(out.clone()),
            ..Default::default()
        },
        false,
    );
    assert!(matches!(result, Err(ReportError::InvalidNumber { .. })));
    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}
