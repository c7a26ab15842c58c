//! End-to-end tests for the budget-forecast binary: exit codes, JSON shape,
//! and the fallback behavior observable from the command line.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("budget-forecast").unwrap()
}

/// Run the binary and parse its stdout as JSON, asserting the exit code.
fn run_json(args: &[&str], expected_code: i32) -> Value {
    let output = cmd().args(args).output().unwrap();
    assert_eq!(
        output.status.code(),
        Some(expected_code),
        "stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is a single JSON document")
}

/// A csv with `count` months of gently trending seasonal amounts, starting
/// January 2021.
fn seasonal_csv(count: usize) -> String {
    let mut text = String::from("date,amount\n");
    for i in 0..count {
        let year = 2021 + (i / 12) as i32;
        let month = (i % 12) + 1;
        let value = 1000.0
            + 5.0 * i as f64
            + 120.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin();
        text.push_str(&format!("{year:04}-{month:02}-01,{value:.2}\n"));
    }
    text
}

fn write_input(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("series.csv");
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn missing_arguments_report_usage() {
    let json = run_json(&[], 1);
    assert_eq!(
        json["error"],
        "Usage: budget-forecast <input_csv> <predict_months>"
    );

    let json = run_json(&["only-one-arg"], 1);
    assert!(json["error"].as_str().unwrap().contains("Usage"));
}

#[test]
fn extra_arguments_report_usage() {
    let json = run_json(&["a.csv", "12", "extra"], 1);
    assert!(json["error"].as_str().unwrap().contains("Usage"));
}

#[test]
fn missing_input_file_reports_error() {
    let json = run_json(&["/nonexistent/series.csv", "12"], 1);
    assert_eq!(json["error"], "Input file not found");
}

#[test]
fn malformed_row_is_a_processing_error() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "date,amount\n2024-01-01,100.0\n2024-02-01,not-a-number\n");

    let json = run_json(&[&path, "6"], 1);
    assert_eq!(json["error"], "Forecast processing failed");
    assert!(json["exc"].as_str().unwrap().contains("invalid amount"));
}

#[test]
fn long_history_uses_holt_winters_with_history_and_diagnostics() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, &seasonal_csv(36));

    let json = run_json(&[&path, "6"], 0);
    assert_eq!(json["method"], "holt_winters");
    assert_eq!(json["history"].as_array().unwrap().len(), 36);
    assert_eq!(json["forecast"].as_array().unwrap().len(), 6);

    // Last observation is 2023-12; the forecast starts in January 2024.
    assert_eq!(json["forecast"][0]["date"], "2024-01-01");
    assert!(json["details"]["aic"].is_number());
    assert!(json["details"]["params"]["smoothing_level"].is_number());
}

#[test]
fn single_row_falls_back_to_naive() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "date,amount\n2024-06-01,100.0\n");

    let json = run_json(&[&path, "3"], 0);
    assert_eq!(json["method"], "naive");
    assert!(json.get("history").is_none());

    let forecast = json["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 3);
    for point in forecast {
        assert_eq!(point["value"], 100.0);
        assert_eq!(point["date"], "2024-06-01");
    }
    assert!(json["details"]
        .as_str()
        .unwrap()
        .starts_with("Holt-Winters failed: "));
}

#[test]
fn header_only_input_falls_back_to_naive_zeros() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "date,amount\n");

    let json = run_json(&[&path, "4"], 0);
    assert_eq!(json["method"], "naive");
    let forecast = json["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 4);
    for point in forecast {
        assert_eq!(point["value"], 0.0);
    }
}

#[test]
fn non_integer_periods_default_to_twelve() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, &seasonal_csv(36));

    let json = run_json(&[&path, "soon"], 0);
    assert_eq!(json["forecast"].as_array().unwrap().len(), 12);
}

#[test]
fn zero_and_negative_periods_yield_empty_forecast() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, &seasonal_csv(36));

    let json = run_json(&[&path, "0"], 0);
    assert!(json["forecast"].as_array().unwrap().is_empty());

    let json = run_json(&[&path, "-3"], 0);
    assert!(json["forecast"].as_array().unwrap().is_empty());
}

#[test]
fn repeated_runs_emit_identical_bytes() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, &seasonal_csv(30));

    let first = cmd().args([path.as_str(), "12"]).output().unwrap();
    let second = cmd().args([path.as_str(), "12"]).output().unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn stdout_is_exactly_one_json_line() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, &seasonal_csv(24));

    cmd()
        .args([path.as_str(), "2"])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| {
            out.ends_with('\n') && out.trim_end().lines().count() == 1
        }));
}
