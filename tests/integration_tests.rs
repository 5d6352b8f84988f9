//! Integration tests for the EQA CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = "Equipment Name,Type,Flowrate,Pressure,Temperature";

/// Helper to get an eqa command isolated from the user's configuration
fn eqa(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eqa").unwrap();
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env("HOME", tmp.path())
        .env_remove("EQA_THRESHOLDS")
        .env_remove("EQA_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to write a CSV file into the temp directory
fn write_csv(tmp: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let path = tmp.path().join(name);
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    eqa(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Equipment Analytics"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("thresholds"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    eqa(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("eqa"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    eqa(&tmp).arg("frobnicate").assert().failure();
}

// ============================================================================
// Analyze Tests
// ============================================================================

#[test]
fn test_analyze_single_record_json() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "pump.csv", &["Pump A,Pump,100,10,80"]);

    let output = eqa(&tmp)
        .args(["analyze", "-f", "json"])
        .arg(&csv)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["total_equipment"], 1);
    assert_eq!(json["avg_flowrate"], 100.0);
    assert_eq!(json["avg_pressure"], 10.0);
    assert_eq!(json["avg_temperature"], 80.0);
    assert_eq!(json["equipment_by_type"]["Pump"], 1);
    assert_eq!(json["equipment_data"][0]["name"], "Pump A");
    assert_eq!(json["equipment_data"][0]["type"], "Pump");
    assert_eq!(json["smart_insights"]["correlations"], serde_json::json!([]));
    assert_eq!(json["smart_insights"]["outliers"], serde_json::json!([]));
}

#[test]
fn test_analyze_reports_correlation() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(
        &tmp,
        "linear.csv",
        &[
            "A,Pump,100,200,50",
            "B,Pump,200,400,40",
            "C,Tank,300,600,30",
            "D,Tank,400,800,20",
        ],
    );

    let output = eqa(&tmp)
        .args(["analyze", "-f", "json"])
        .arg(&csv)
        .output()
        .unwrap();
    let json = stdout_json(&output);
    let correlations = json["smart_insights"]["correlations"].as_array().unwrap();

    let fp = correlations
        .iter()
        .find(|c| c["pair"] == "Flowrate vs Pressure")
        .unwrap();
    assert!((fp["value"].as_f64().unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(fp["interpretation"], "Strong Positive");

    let ft = correlations
        .iter()
        .find(|c| c["pair"] == "Flowrate vs Temperature")
        .unwrap();
    assert!((ft["value"].as_f64().unwrap() + 1.0).abs() < 1e-12);
    assert_eq!(ft["interpretation"], "Strong Negative");
}

#[test]
fn test_analyze_flags_outlier() {
    let tmp = TempDir::new().unwrap();
    let mut rows: Vec<String> = (1..=9).map(|i| format!("P{},Pump,0,200,100", i)).collect();
    rows.push("P10,Pump,1,200,100".to_string());
    rows.push("P11,Pump,10,200,100".to_string());
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let csv = write_csv(&tmp, "spike.csv", &rows);

    let output = eqa(&tmp)
        .args(["analyze", "-f", "json"])
        .arg(&csv)
        .output()
        .unwrap();
    let json = stdout_json(&output);
    let outliers = json["smart_insights"]["outliers"].as_array().unwrap();
    assert_eq!(outliers.len(), 1);
    assert_eq!(outliers[0]["equipment"], "P11");
    assert_eq!(outliers[0]["parameter"], "flowrate");
    assert_eq!(outliers[0]["deviation"], "+3.0σ");
}

#[test]
fn test_analyze_empty_table() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "empty.csv", &[]);

    let output = eqa(&tmp)
        .args(["analyze", "-f", "json"])
        .arg(&csv)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["total_equipment"], 0);
    assert_eq!(json["avg_flowrate"], 0.0);
    assert_eq!(json["equipment_data"], serde_json::json!([]));
}

#[test]
fn test_analyze_terminal_summary() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "pump.csv", &["Pump A,Pump,100,10,80"]);

    eqa(&tmp)
        .arg("analyze")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("Pump"))
        .stdout(predicate::str::contains("No significant correlations found."));
}

#[test]
fn test_analyze_markdown_to_file() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "pump.csv", &["Pump A,Pump,100,10,80"]);
    let report = tmp.path().join("report.md");

    eqa(&tmp)
        .args(["analyze", "-f", "md", "-o"])
        .arg(&report)
        .arg(&csv)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let md = fs::read_to_string(&report).unwrap();
    assert!(md.starts_with("# Equipment Analysis Report"));
    assert!(md.contains("## Safety Status"));
    assert!(md.contains("Pressure 10.0 below safe minimum 100"));
}

#[test]
fn test_analyze_missing_column_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.csv");
    fs::write(&path, "Equipment Name,Type,Flowrate,Temperature\nPump A,Pump,100,80\n").unwrap();

    eqa(&tmp)
        .arg("analyze")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column"))
        .stderr(predicate::str::contains("Pressure"));
}

#[test]
fn test_analyze_malformed_value_fails() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "bad.csv", &["Pump A,Pump,100,abc,80"]);

    eqa(&tmp)
        .arg("analyze")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("abc"));
}

#[test]
fn test_analyze_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    eqa(&tmp)
        .args(["analyze", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

// ============================================================================
// Classify Tests
// ============================================================================

#[test]
fn test_classify_warning_json() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "pump.csv", &["Pump A,Pump,100,10,80"]);

    let output = eqa(&tmp)
        .args(["classify", "-f", "json"])
        .arg(&csv)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["warning_count"], 1);
    assert_eq!(json["critical_count"], 0);
    assert_eq!(json["verdicts"][0]["tier"], "warning");
    assert_eq!(
        json["verdicts"][0]["messages"][0],
        "Pressure 10.0 below safe minimum 100"
    );
}

#[test]
fn test_classify_critical_message() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "hot.csv", &["R1,Reactor,650,500,200"]);

    eqa(&tmp)
        .arg("classify")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Safety Alerts Detected"))
        .stdout(predicate::str::contains(
            "CRITICAL: Flowrate 650.0 exceeds critical limit 600",
        ));
}

#[test]
fn test_classify_all_normal() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "ok.csv", &["Pump A,Pump,100,200,80"]);

    eqa(&tmp)
        .arg("classify")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("All Systems Normal"));
}

#[test]
fn test_classify_alerts_only_csv() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(
        &tmp,
        "mixed.csv",
        &["Pump A,Pump,100,200,80", "Pump B,Pump,520,200,80"],
    );

    let output = eqa(&tmp)
        .args(["classify", "--alerts-only", "-f", "csv"])
        .arg(&csv)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Pump A"));
    assert!(stdout.contains("Pump B,Pump,warning,warning,safe,safe,Flowrate 520.0 exceeds safe maximum 500"));
}

#[test]
fn test_classify_fail_on_critical() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "hot.csv", &["R1,Reactor,650,500,200"]);

    eqa(&tmp)
        .args(["classify", "--fail-on-critical", "-f", "json"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceed critical limits"));
}

#[test]
fn test_classify_with_custom_thresholds() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "pump.csv", &["Pump A,Pump,100,10,80"]);
    let thresholds = tmp.path().join("limits.yaml");
    fs::write(
        &thresholds,
        "pressure:\n  min: 5.0\n  max: 50.0\n  critical_max: 70.0\n",
    )
    .unwrap();

    let output = eqa(&tmp)
        .args(["classify", "-f", "json", "--thresholds"])
        .arg(&thresholds)
        .arg(&csv)
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["safe_count"], 1);
    assert_eq!(json["thresholds"]["flowrate"]["max"], 500.0);
}

#[test]
fn test_classify_thresholds_from_env() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "pump.csv", &["Pump A,Pump,100,10,80"]);
    let thresholds = tmp.path().join("limits.json");
    fs::write(
        &thresholds,
        r#"{"pressure": {"min": 5.0, "max": 50.0, "critical_max": 70.0}}"#,
    )
    .unwrap();

    let output = eqa(&tmp)
        .env("EQA_THRESHOLDS", &thresholds)
        .args(["classify", "-f", "json"])
        .arg(&csv)
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)["safe_count"], 1);
}

// ============================================================================
// Thresholds Tests
// ============================================================================

#[test]
fn test_thresholds_show_defaults() {
    let tmp = TempDir::new().unwrap();
    let output = eqa(&tmp)
        .args(["thresholds", "show", "-f", "json"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["flowrate"]["critical_max"], 600.0);
    assert_eq!(json["pressure"]["min"], 100.0);
    assert_eq!(json["temperature"]["max"], 350.0);
}

#[test]
fn test_thresholds_show_markdown() {
    let tmp = TempDir::new().unwrap();
    eqa(&tmp)
        .args(["thresholds", "show", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Safety Thresholds"))
        .stdout(predicate::str::contains("| Pressure"))
        .stdout(predicate::str::contains("Source:").not());
}

#[test]
fn test_analyze_rejects_delimiter_only_row() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "gap.csv", &["Pump A,Pump,100,10,80", ",,,,"]);

    eqa(&tmp)
        .arg("analyze")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row 2"));
}

#[test]
fn test_thresholds_init_set_show() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("t.yaml");

    eqa(&tmp)
        .args(["thresholds", "init", "--thresholds"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    eqa(&tmp)
        .args(["thresholds", "init", "--thresholds"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    eqa(&tmp)
        .args(["thresholds", "set", "pressure", "min", "5", "--thresholds"])
        .arg(&path)
        .assert()
        .success();

    let output = eqa(&tmp)
        .args(["thresholds", "show", "-f", "json", "--thresholds"])
        .arg(&path)
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["pressure"]["min"], 5.0);
    assert_eq!(json["pressure"]["max"], 800.0);
}

#[test]
fn test_thresholds_default_location() {
    let tmp = TempDir::new().unwrap();

    eqa(&tmp).args(["thresholds", "init"]).assert().success();

    let output = eqa(&tmp)
        .args(["thresholds", "path", "-q"])
        .output()
        .unwrap();
    let path = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
    assert!(path.starts_with(tmp.path()));
    assert!(path.exists());
}

#[test]
fn test_thresholds_check_reports_ordering() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("t.yaml");

    eqa(&tmp)
        .args(["thresholds", "set", "flowrate", "min", "900", "--thresholds"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("greater than max"));

    eqa(&tmp)
        .args(["thresholds", "check", "--thresholds"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("flowrate: min (900) is greater than max (500)"));

    eqa(&tmp)
        .args(["thresholds", "reset", "--thresholds"])
        .arg(&path)
        .assert()
        .success();

    eqa(&tmp)
        .args(["thresholds", "check", "--thresholds"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_thresholds_set_rejects_unknown_field() {
    let tmp = TempDir::new().unwrap();
    eqa(&tmp)
        .args(["thresholds", "set", "pressure", "ceiling", "5"])
        .assert()
        .failure();
}

#[test]
fn test_missing_explicit_thresholds_fails() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "pump.csv", &["Pump A,Pump,100,10,80"]);

    eqa(&tmp)
        .args(["classify", "--thresholds", "absent.yaml"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.yaml"));
}

// ============================================================================
// Template / Demo / Completions Tests
// ============================================================================

#[test]
fn test_template_output() {
    let tmp = TempDir::new().unwrap();
    eqa(&tmp)
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(HEADER))
        .stdout(predicate::str::contains("Pump A,Pump,100,10,80"));
}

#[test]
fn test_demo_seed_is_reproducible() {
    let tmp = TempDir::new().unwrap();
    let first = eqa(&tmp)
        .args(["demo", "normal", "--count", "5", "--seed", "42"])
        .output()
        .unwrap();
    let second = eqa(&tmp)
        .args(["demo", "normal", "--count", "5", "--seed", "42"])
        .output()
        .unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    let stdout = String::from_utf8_lossy(&first.stdout);
    assert_eq!(stdout.lines().count(), 6);
    assert!(stdout.starts_with(HEADER));
}

#[test]
fn test_demo_output_feeds_analyze() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("critical.csv");

    eqa(&tmp)
        .args(["demo", "critical", "--seed", "1", "-o"])
        .arg(&path)
        .assert()
        .success();

    let output = eqa(&tmp)
        .args(["classify", "-f", "json"])
        .arg(&path)
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["safe_count"], 0);
    assert_eq!(json["verdicts"].as_array().unwrap().len(), 30);
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    eqa(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eqa"));
}
