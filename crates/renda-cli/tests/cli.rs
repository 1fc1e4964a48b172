//! End-to-end tests for the `renda` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PREFIXED: &str = r#"{"kind":"CDB","indexer":"PRE","rate":0.10,"day_count":"BUS/252",
    "issue_date":"2024-01-01","maturity_date":"2026-01-01","face_value":1000.0}"#;

const CDI: &str = r#"{"kind":"CDB","indexer":"CDI","rate":100,
    "issue_date":"2024-03-04","face_value":1000.0}"#;

/// A command isolated from any user settings file.
fn renda(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("renda").unwrap();
    cmd.env("RENDA_CONFIG", home.path().join("renda.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_cdi(dir: &Path) {
    fs::write(
        dir.join("cdi.csv"),
        "date,rate\n2024-03-04,0.05\n2024-03-05,0.05\n2024-03-06,0.05\n2024-03-07,0.05\n2024-03-08,0.05\n",
    )
    .unwrap();
}

#[test]
fn test_value_prefixed_on_issue_date() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["value", "--instrument", PREFIXED, "--date", "2024-01-01", "--calendar", "WEEKEND"])
        .args(["--format", "minimal"])
        .assert()
        .success()
        .stdout("1000.000000\n");
}

#[test]
fn test_value_cdi_from_data_dir() {
    let home = TempDir::new().unwrap();
    write_cdi(home.path());

    renda(&home)
        .args(["value", "-i", CDI, "-d", "2024-03-08", "--calendar", "WEEKEND", "-f", "minimal"])
        .arg("--data")
        .arg(home.path())
        .assert()
        .success()
        .stdout("1002.502501\n");
}

#[test]
fn test_value_json_with_diagnostics() {
    let home = TempDir::new().unwrap();
    write_cdi(home.path());

    renda(&home)
        .args(["value", "-i", CDI, "-d", "2024-03-08", "--calendar", "WEEKEND", "-f", "json"])
        .arg("--diagnostics")
        .arg("--data")
        .arg(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dirty_price\""))
        .stdout(predicate::str::contains("\"pricer\": \"floating\""))
        .stdout(predicate::str::contains("\"applied_days\": 5"));
}

#[test]
fn test_value_table_with_tax() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["value", "-i", PREFIXED, "-d", "2024-06-28", "--calendar", "WEEKEND", "--tax"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dirty Price"))
        .stdout(predicate::str::contains("Tax Rate"))
        .stdout(predicate::str::contains("22.5000%"));
}

#[test]
fn test_value_before_issue_fails() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["value", "-i", PREFIXED, "-d", "2023-12-29"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("precedes issue date"));
}

#[test]
fn test_value_cdi_without_data_fails() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["value", "-i", CDI, "-d", "2024-03-08", "--calendar", "WEEKEND"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_date() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["value", "-i", PREFIXED, "-d", "01/07/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_instrument_validation_error() {
    let home = TempDir::new().unwrap();
    let bad = r#"{"kind":"CDB","indexer":"PRE","rate":0.1,"issue_date":"2024-01-01","face_value":-5}"#;
    renda(&home)
        .args(["value", "-i", bad, "-d", "2024-01-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inline JSON"));
}

#[test]
fn test_batch_reports_per_item_errors() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("positions.json");
    fs::write(
        &input,
        format!(
            r#"[{{"instrument":{PREFIXED},"date":"2024-01-01"}},
                {{"instrument":{PREFIXED},"date":"2023-06-30"}}]"#
        ),
    )
    .unwrap();

    renda(&home)
        .args(["batch", "--calendar", "WEEKEND", "-f", "minimal", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1000.000000\nerror:"))
        .stderr(predicate::str::contains("1 of 2 valuations failed"));
}

#[test]
fn test_batch_csv_from_yaml() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("positions.yaml");
    fs::write(
        &input,
        "- instrument:\n    kind: LCI\n    indexer: PRE\n    rate: 0.1\n    issue_date: \"2024-01-01\"\n    face_value: 1000.0\n  date: \"2024-01-01\"\n",
    )
    .unwrap();

    renda(&home)
        .args(["batch", "-f", "csv", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("position,instrument,date,clean_price"))
        .stdout(predicate::str::contains("LCI PRE 0.1"));
}

#[test]
fn test_series_minimal() {
    let home = TempDir::new().unwrap();
    write_cdi(home.path());

    let output = renda(&home)
        .args(["series", "-i", CDI, "--from", "2024-03-04", "--to", "2024-03-10"])
        .args(["--calendar", "WEEKEND", "-f", "minimal", "--data"])
        .arg(home.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "2024-03-04 1000.500000");
    assert_eq!(lines[4], "2024-03-08 1002.502501");
}

#[test]
fn test_series_rejects_reversed_range() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["series", "-i", PREFIXED, "--from", "2024-03-10", "--to", "2024-03-04"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid range"));
}

#[test]
fn test_calendar_carnival() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["-f", "minimal", "calendar", "is-business-day", "2023-02-21"])
        .assert()
        .success()
        .stdout("false\n");

    renda(&home)
        .args(["-f", "minimal", "calendar", "add", "2023-02-17", "1"])
        .assert()
        .success()
        .stdout("2023-02-22\n");

    renda(&home)
        .args(["-f", "minimal", "calendar", "next", "2023-02-18"])
        .assert()
        .success()
        .stdout("2023-02-22\n");
}

#[test]
fn test_calendar_counts() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["-f", "minimal", "calendar", "year", "2024"])
        .assert()
        .success()
        .stdout("253\n");

    renda(&home)
        .args(["-f", "minimal", "calendar", "count", "2023-01-01", "2023-12-31"])
        .assert()
        .success()
        .stdout("249\n");

    renda(&home)
        .args(["-f", "minimal", "calendar", "add", "2023-02-22", "-1"])
        .assert()
        .success()
        .stdout("2023-02-17\n");
}

#[test]
fn test_calendar_json() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["-f", "json", "calendar", "--calendar", "WEEKEND", "count", "2024-01-01", "2024-01-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\": 4"))
        .stdout(predicate::str::contains("\"calendar\": \"Weekend Only\""));
}

#[test]
fn test_config_init_and_show() {
    let home = TempDir::new().unwrap();
    renda(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join("renda.toml").exists());

    renda(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    renda(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("calendar = \"ANBIMA\""))
        .stdout(predicate::str::contains("default_ipca_lag_months = 2"));
}

#[test]
fn test_config_output_format_default() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("renda.toml"), "[output]\nformat = \"minimal\"\n").unwrap();

    renda(&home)
        .args(["calendar", "year", "2025"])
        .assert()
        .success()
        .stdout("252\n");
}

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    renda(&home)
        .args(["-f", "minimal", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("renda.toml"));
}
