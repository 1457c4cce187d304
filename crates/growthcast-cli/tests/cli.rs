//! End-to-end tests for the growthcast binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn growthcast() -> Command {
    let mut cmd = Command::cargo_bin("growthcast").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn json(args: &[&str]) -> Value {
    let output = growthcast()
        .args(["--format", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

const LINEAR: [&str; 8] = [
    "--method",
    "linear",
    "--x",
    "1,2,3,4,5",
    "--y",
    "10,20,30,40,50",
    "--at",
    "2.5",
];

// =============================================================================
// INTERPOLATE
// =============================================================================

#[test]
fn interpolate_minimal() {
    growthcast()
        .args(["--format", "minimal", "interpolate"])
        .args(LINEAR)
        .assert()
        .success()
        .stdout("25.0000\n");
}

#[test]
fn interpolate_table_shows_derivation() {
    growthcast()
        .arg("interpolate")
        .args(LINEAR)
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1:"))
        .stdout(predicate::str::contains("y = 25.0000"));
}

#[test]
fn interpolate_json() {
    let mut args = vec!["interpolate"];
    args.extend(LINEAR);
    let value = json(&args);

    assert_eq!(value["value"], 25.0);
    assert_eq!(value["requested"], "linear");
    assert_eq!(value["methodUsed"], "linear");
    assert_eq!(value["displayValue"], "25.0000");
    assert!(value["steps"].as_array().unwrap().len() >= 3);
}

#[test]
fn spline_fallback_is_reported() {
    let args = [
        "interpolate",
        "--method",
        "spline",
        "--x",
        "1,1.00000000000001,2",
        "--y",
        "1,1,2",
        "--at",
        "1.5",
    ];

    let value = json(&args);
    assert_eq!(value["requested"], "naturalCubicSpline");
    assert_eq!(value["methodUsed"], "linear");
    assert_eq!(value["steps"][0]["kind"], "fallback");

    growthcast()
        .args(args)
        .assert()
        .success()
        .stderr(predicate::str::contains("was not applicable"));
}

#[test]
fn spline_needs_three_points() {
    growthcast()
        .args(["interpolate", "--method", "spline", "--x", "1,3", "--y", "2,6", "--at", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Natural cubic spline interpolation requires at least 3 data points.",
        ));
}

#[test]
fn interpolate_rejects_bad_input() {
    growthcast()
        .args(["interpolate", "--x", "1", "--y", "1", "--at", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least 2 data points"));

    growthcast()
        .args(["interpolate", "--method", "cubic-b", "--x", "1,2", "--y", "1,2", "--at", "1"])
        .assert()
        .failure();
}

#[test]
fn negative_values_are_accepted() {
    growthcast()
        .args([
            "--format", "minimal", "interpolate", "--method", "lagrange", "--x", "-1,0,1", "--y",
            "1,0,1", "--at", "-0.5",
        ])
        .assert()
        .success()
        .stdout("0.2500\n");
}

// =============================================================================
// VALIDATE
// =============================================================================

#[test]
fn validate_reports_duplicates() {
    growthcast()
        .args(["validate", "--x", "1,2,2", "--y", "1,2,3", "--at", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "X values must be unique. Duplicate values are not allowed.",
        ));
}

#[test]
fn validate_accepts_good_input() {
    growthcast()
        .args(["--format", "minimal", "validate", "--x", "1,2", "--y", "1,2", "--at", "1.5"])
        .assert()
        .success()
        .stdout("valid\n");
}

#[test]
fn validate_json_outcome() {
    let output = growthcast()
        .args([
            "--format", "json", "validate", "--method", "spline", "--x", "1,2", "--y", "1,2",
            "--at", "1.5",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["isValid"], false);
    assert!(value["errorMessage"].as_str().unwrap().contains("at least 3"));
}

// =============================================================================
// CURVE, FORECAST, EXAMPLE
// =============================================================================

#[test]
fn curve_minimal_lists_grid() {
    let output = growthcast()
        .args(["--format", "minimal", "curve"])
        .args(LINEAR)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 121);
    assert!(stdout.lines().next().unwrap().starts_with("0.6"));
}

#[test]
fn curve_steps_override() {
    let mut args = vec!["curve", "--steps", "10"];
    args.extend(LINEAR);
    let value = json(&args);

    assert_eq!(value["curve"].as_array().unwrap().len(), 13);
    assert_eq!(value["point"]["y"], 25.0);
}

#[test]
fn curve_rejects_oversized_grid() {
    let steps = u64::MAX.to_string();
    growthcast()
        .args(["curve", "--steps", &steps])
        .args(LINEAR)
        .assert()
        .failure()
        .stderr(predicate::str::contains("sampling grid would exceed"));
}

#[test]
fn forecast_json() {
    let value = json(&[
        "forecast",
        "--x",
        "2021,2022,2023",
        "--y",
        "100,120,140",
        "--horizon",
        "3",
    ]);

    let predictions = value["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 3);
    assert_eq!(predictions[2]["x"], 2026.0);
    assert_eq!(predictions[2]["value"], 200.0);
    let total = value["totalGrowth"].as_f64().unwrap();
    assert!((total - 42.86).abs() < 1e-9);
}

#[test]
fn forecast_rejects_gaps() {
    growthcast()
        .args(["forecast", "--x", "2020,2022", "--y", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Years must be consecutive."));
}

#[test]
fn example_runs_each_method() {
    for (method, expected) in [("linear", "25.0000"), ("newton", "12.2500")] {
        growthcast()
            .args(["--format", "minimal", "example", "--method", method])
            .assert()
            .success()
            .stdout(format!("{expected}\n"));
    }

    growthcast()
        .args(["example", "--method", "spline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Natural Cubic Spline Example"));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn config_file_sets_precision() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[display]\nvalue_decimals = 2").unwrap();

    growthcast()
        .args(["--format", "minimal", "--config"])
        .arg(file.path())
        .arg("interpolate")
        .args(LINEAR)
        .assert()
        .success()
        .stdout("25.00\n");
}

#[test]
fn missing_config_file_fails() {
    growthcast()
        .args(["--config", "/nonexistent/growthcast.toml", "interpolate"])
        .args(LINEAR)
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}
