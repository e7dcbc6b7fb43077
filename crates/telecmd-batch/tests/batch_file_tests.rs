// Integration tests for running batch files from disk

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use telecmd_batch::{check_batch, run_batch, FileSource, RunOptions};
use telecmd_core::errors::ExErrorKind;
use telecmd_core::render::PrintFormat;
use telecmd_core::QueueStore;
use telecmd_core_types::RunContext;

// Helper to write a batch file into a fresh temp directory
fn write_batch(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp batch directory");
    let path = dir.path().join("CMD.bat");
    fs::write(&path, contents).expect("Failed to write batch file");
    (dir, path)
}

fn run_file(path: &PathBuf, options: &RunOptions) -> (telecmd_batch::BatchSummary, String) {
    let mut source = FileSource::open(path).unwrap();
    let mut store = QueueStore::new();
    let mut out = Vec::new();
    let summary = run_batch(&mut source, &mut store, &mut out, options).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn test_sort_and_print_batch() {
    // Given: A batch queueing two commands, sorting and printing
    let (_dir, path) = write_batch("1 5 100\n0 200\n3\n5\n");

    // When: We run it
    let (summary, printed) = run_file(&path, &RunOptions::new());

    // Then: The prioritised command prints first
    assert_eq!(printed, "(0, 5, 100)\n(1, 0, 200)\n");
    assert_eq!(summary.records, 4);
    assert!(!summary.has_errors());
}

#[test]
fn test_execute_batch_drains_queue() {
    // Given: A batch that deletes its only new command and executes
    let (_dir, path) = write_batch("1 5 100\n2 0\n7\n5\n");

    // When: We run it
    let (summary, printed) = run_file(&path, &RunOptions::new());

    // Then: Nothing is left to print
    assert_eq!(printed, "");
    assert_eq!(summary.discarded, 0);
    assert!(!summary.has_errors());
}

#[test]
fn test_reverse_and_modify_batch() {
    // Given: Two commands, a queued modify, then print / reverse / print / execute / print
    let (_dir, path) = write_batch("0 10\n1 3 20\n4 1 99\n5\n6\n5\n7\n5\n");

    // When: We run it
    let (summary, printed) = run_file(&path, &RunOptions::new());

    // Then: Both prints show the pending modify; the last print is empty
    assert_eq!(
        printed,
        "(2, 1, 99)\n(1, 3, 20)\n(0, 0, 10)\n(0, 0, 10)\n(1, 3, 20)\n(2, 1, 99)\n"
    );
    assert_eq!(summary.utilities, 5);
    assert!(!summary.has_errors());
}

#[test]
fn test_bad_lines_are_reported_with_line_numbers() {
    // Given: A batch with an unknown code, a bad token and a short record
    let (_dir, path) = write_batch("0 1\n\n9 1 2\n0 one\n1 4\n5\n");

    // When: We run it
    let (summary, printed) = run_file(&path, &RunOptions::new());

    // Then: Each failure is reported and the rest of the batch still runs
    assert_eq!(printed, "(0, 0, 1)\n");
    let reported: Vec<(ExErrorKind, Option<usize>)> = summary
        .errors
        .iter()
        .map(|e| (e.kind(), e.line()))
        .collect();
    assert_eq!(
        reported,
        vec![
            (ExErrorKind::UnknownCommand, Some(3)),
            (ExErrorKind::InvalidInput, Some(4)),
            (ExErrorKind::InvalidInput, Some(5)),
        ]
    );
}

#[test]
fn test_windows_line_endings() {
    let (_dir, path) = write_batch("1 2 3\r\n5\r\n");
    let (_, printed) = run_file(&path, &RunOptions::new());
    assert_eq!(printed, "(0, 2, 3)\n");
}

#[test]
fn test_json_lines_output() {
    let (_dir, path) = write_batch("1 2 3\n2 0\n5\n");
    let options = RunOptions::new().with_format(PrintFormat::Json);

    let (_, printed) = run_file(&path, &options);

    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"kind\":\"delete\""));
    assert!(lines[1].contains("\"kind\":\"new_with_priority\""));
}

#[test]
fn test_run_context_source_label() {
    let (_dir, path) = write_batch("8\n");
    let context = RunContext::new().with_source(path.display().to_string());
    let run_id = context.run_id.clone();
    let options = RunOptions::new().with_context(context);

    let (summary, _) = run_file(&path, &options);

    assert_eq!(summary.run_id, run_id);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].run_id(), Some(&run_id));
}

#[test]
fn test_missing_file_is_fatal() {
    // Given: A path that does not exist
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.bat");

    // When: We try to open it
    let err = FileSource::open(&path).err().unwrap();

    // Then: The error is the fatal SourceUnavailable
    assert_eq!(err.kind(), ExErrorKind::SourceUnavailable);
    assert!(err.kind().is_fatal());
}

#[test]
fn test_check_batch_on_file() {
    let (_dir, path) = write_batch("0 1\n2\n3\n77\n5 extra fields\n");
    let mut source = FileSource::open(&path).unwrap();

    let errors = check_batch(&mut source);

    let lines: Vec<Option<usize>> = errors.iter().map(|e| e.line()).collect();
    assert_eq!(lines, vec![Some(2), Some(4), Some(5)]);
}

#[test]
fn test_empty_file_runs_cleanly() {
    let (_dir, path) = write_batch("");
    let (summary, printed) = run_file(&path, &RunOptions::new());
    assert_eq!(summary.records, 0);
    assert_eq!(printed, "");
}
