//! CLI integration tests
//!
//! These tests run the built binary against batch files in a temp directory.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn setup_batch(temp_dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn telecmd(temp_dir: &TempDir, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_telecmd");
    Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_run_prints_sorted_queue() {
    let temp_dir = TempDir::new().unwrap();
    let path = setup_batch(&temp_dir, "batch.txt", "1 5 100\n0 200\n3\n5\n");

    let output = telecmd(&temp_dir, &["run", path.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "(0, 5, 100)\n(1, 0, 200)\n"
    );
}

#[test]
fn test_cli_run_defaults_to_cmd_bat() {
    let temp_dir = TempDir::new().unwrap();
    setup_batch(&temp_dir, "CMD.bat", "0 7\n2 0\n5\n");

    let output = telecmd(&temp_dir, &["run"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "(1, 0)\n(0, 0, 7)\n");
}

#[test]
fn test_cli_run_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = telecmd(&temp_dir, &["run", "nope.bat"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERR_SOURCE_UNAVAILABLE"),
        "stderr should name the failure: {}",
        stderr
    );
}

#[test]
fn test_cli_run_recoverable_errors_keep_success_status() {
    let temp_dir = TempDir::new().unwrap();
    let path = setup_batch(&temp_dir, "batch.txt", "9 9\n0 1\n2 55\n7\n0 2\n5\n");

    let output = telecmd(&temp_dir, &["run", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "(2, 0, 2)\n");
}

#[test]
fn test_cli_run_json_format_and_summary() {
    let temp_dir = TempDir::new().unwrap();
    let path = setup_batch(&temp_dir, "batch.txt", "1 4 40\n5\n");

    let output = telecmd(
        &temp_dir,
        &["run", path.to_str().unwrap(), "--format", "json", "--summary"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let entry: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(entry["entry_index"], 0);
    assert_eq!(entry["priority"], 4);
    assert_eq!(entry["data"], 40);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 record(s)"), "summary missing: {}", stderr);
}

#[test]
fn test_cli_production_profile_keeps_stdout_clean() {
    let temp_dir = TempDir::new().unwrap();
    let path = setup_batch(&temp_dir, "batch.txt", "0 3\n9\n5\n");

    let output = Command::new(env!("CARGO_BIN_EXE_telecmd"))
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "telecmd=info")
        .args(["--log-profile", "production", "run", path.to_str().unwrap()])
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "(0, 0, 3)\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_UNKNOWN_COMMAND"));
}

#[test]
fn test_cli_check_clean_batch() {
    let temp_dir = TempDir::new().unwrap();
    let path = setup_batch(&temp_dir, "batch.txt", "0 1\n1 2 3\n3\n5\n6\n7\n");

    let output = telecmd(&temp_dir, &["check", path.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("no invalid records"));
}

#[test]
fn test_cli_check_reports_invalid_records() {
    let temp_dir = TempDir::new().unwrap();
    let path = setup_batch(&temp_dir, "batch.txt", "0 1\n8\n4 1\n");

    let output = telecmd(&temp_dir, &["check", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERR_UNKNOWN_COMMAND"));
    assert!(stdout.contains("(line: 2)"));
    assert!(stdout.contains("ERR_INVALID_INPUT"));
    assert!(stdout.contains("(line: 3)"));
}
