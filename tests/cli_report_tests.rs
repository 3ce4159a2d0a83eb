//! End-to-end tests driving the stallscope binary
//!
//! Covers text/JSON/CSV output, threshold handling, and exit status on errors.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = "\"FP Instructions(Single)\",\"FP Instructions(Double)\",\"Floating Point Operations(Single Precision Special)\",\"Integer Instructions\",\"Bit-Convert Instructions\",\"Inter-Thread Instructions\",\"Control-Flow Instructions\",\"Misc Instructions\",\"Issue Stall Reasons (Pipe Busy)(%)\"";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn write_profile(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Text output
// ============================================================================

#[test]
fn test_text_report_above_threshold() {
    let path = fixture("pipe_busy_hot.csv");
    let expected = format!(
        "{}: 7.5% pipeline stalls\nFP32: 0.4\nFP64: 0.1\nTrans: 0.0\nIntOps: 0.4\nConv: 0.0\nWarp: 0.0\nLogic: 0.1\nMisc: 0.0\n\n",
        path.display()
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg(&path).assert().success().stdout(expected);
}

#[test]
fn test_below_threshold_prints_nothing() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg(fixture("pipe_busy_quiet.csv"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_threshold_flag_lowers_cutoff() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("--threshold")
        .arg("1.0")
        .arg(fixture("pipe_busy_quiet.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("1.25% pipeline stalls"))
        .stdout(predicate::str::contains("IntOps: 0.95"));
}

#[test]
fn test_threshold_equal_to_stall_does_not_report() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("--threshold")
        .arg("7.5")
        .arg(fixture("pipe_busy_hot.csv"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_shift_conv_labels() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("--labels")
        .arg("shift-conv")
        .arg(fixture("pipe_busy_hot.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Shift: 0.0"))
        .stdout(predicate::str::contains("Misc").not());
}

#[test]
fn test_multiple_files_report_only_hot_ones() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg(fixture("pipe_busy_quiet.csv"))
        .arg(fixture("pipe_busy_hot.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("pipe_busy_hot.csv: 7.5% pipeline stalls"))
        .stdout(predicate::str::contains("pipe_busy_quiet.csv").not());
}

// ============================================================================
// JSON / CSV output
// ============================================================================

#[test]
fn test_json_output() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    let output = cmd
        .arg("--format")
        .arg("json")
        .arg(fixture("pipe_busy_hot.csv"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = parsed.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["stall_percentage"], 7.5);
    assert_eq!(reports[0]["threshold"], 5.0);
    assert_eq!(reports[0]["mix"]["IntOps"], 0.4);
}

#[test]
fn test_json_output_empty_when_quiet() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("--format")
        .arg("json")
        .arg(fixture("pipe_busy_quiet.csv"))
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn test_csv_output() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("--format")
        .arg("csv")
        .arg(fixture("pipe_busy_hot.csv"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "path,stall_pct,FP32,FP64,Trans,IntOps,Conv,Warp,Logic,Misc\n",
        ))
        .stdout(predicate::str::contains(",7.5,0.4,0.1,0.0,0.4,0.0,0.0,0.1,0.0\n"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_threshold() {
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, "stall.toml", "threshold = 10.0\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("--config")
        .arg(&config)
        .arg(fixture("pipe_busy_hot.csv"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_threshold_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, "stall.toml", "threshold = 10.0\nlabels = \"shift-conv\"\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("--config")
        .arg(&config)
        .arg("--threshold")
        .arg("5.0")
        .arg(fixture("pipe_busy_hot.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("7.5% pipeline stalls"))
        .stdout(predicate::str::contains("Shift: 0.0"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, "stall.toml", "threshold = \"high\"\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("--config")
        .arg(&config)
        .arg(fixture("pipe_busy_hot.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_file_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("/nonexistent/stallscope/profile.csv")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot read file"));
}

#[test]
fn test_no_arguments_is_usage_error() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_row_length_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "short.csv", &format!("{HEADER}\n40,10,0\n"));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed input"));
}

#[test]
fn test_missing_column_fails_naming_it() {
    let dir = TempDir::new().unwrap();
    let header = HEADER.replace(",\"Misc Instructions\"", "");
    let path = write_profile(&dir, "nomisc.csv", &format!("{header}\n40,10,0,40,0,0,10,7.5\n"));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Misc Instructions"));
}

#[test]
fn test_zero_instructions_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "zero.csv", &format!("{HEADER}\n0,0,0,0,0,0,0,0,42\n"));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("total instruction count is zero"));
}

#[test]
fn test_overflowing_instruction_total_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "huge.csv", &format!("{HEADER}\n1e308,1e308,0,0,0,0,0,0,42\n"));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("total instruction count is inf"));
}

#[test]
fn test_error_in_any_file_suppresses_all_output() {
    let dir = TempDir::new().unwrap();
    let bad = write_profile(&dir, "bad.csv", &format!("{HEADER}\n40,10,0,40,0,0,10,0,oops\n"));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg(fixture("pipe_busy_hot.csv"))
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("oops"));
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stallscope");
    cmd.arg("--debug")
        .arg(fixture("pipe_busy_hot.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("7.5% pipeline stalls"))
        .stderr(predicate::str::contains("DEBUG"));
}
