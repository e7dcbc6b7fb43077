//! End-to-end batch scenarios driven through the dispatcher
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{records, run_rows};
use telecmd_core::dispatch::DispatchOutcome;
use telecmd_core::errors::TelecmdError;
use telecmd_core::render::PrintFormat;
use telecmd_core::{dispatch, QueueStore};

#[test]
fn test_scenario_sort_then_print() {
    // GIVEN a prioritised entry and a low-priority entry
    // WHEN the queue is sorted and printed
    let (store, printed) = run_rows(&[&[1, 5, 100], &[0, 200], &[3], &[5]]);

    // THEN the higher priority entry is printed first
    assert_eq!(printed, "(0, 5, 100)\n(1, 0, 200)\n");
    assert_eq!(store.len(), 2);
}

#[test]
fn test_scenario_queued_delete_drains_queue() {
    // GIVEN an entry and a queued delete targeting it
    let mut store = QueueStore::new();
    let mut out = Vec::new();
    let rows = records(&[&[1, 5, 100], &[2, 0], &[7]]);

    dispatch(&mut store, &rows[0], &mut out, PrintFormat::Tuple).unwrap();
    dispatch(&mut store, &rows[1], &mut out, PrintFormat::Tuple).unwrap();
    assert_eq!(store.entry_indices(), vec![1, 0]);

    // WHEN the queue executes
    let outcome = dispatch(&mut store, &rows[2], &mut out, PrintFormat::Tuple).unwrap();

    // THEN the delete removed its target and then drained itself
    match outcome {
        DispatchOutcome::Executed(report) => {
            assert_eq!(report.visited, 1);
            assert_eq!(report.deletes_applied, 1);
            assert!(report.errors.is_empty());
        }
        other => panic!("expected execution outcome, got {:?}", other),
    }
    assert_eq!(store.len(), 0);
}

#[test]
fn test_scenario_unknown_code_changes_nothing() {
    let mut store = QueueStore::new();
    let mut out = Vec::new();
    let rows = records(&[&[0, 7], &[9, 1, 2]]);

    dispatch(&mut store, &rows[0], &mut out, PrintFormat::Tuple).unwrap();
    let head_before = store.head().cloned();

    let result = dispatch(&mut store, &rows[1], &mut out, PrintFormat::Tuple);

    assert_eq!(
        result,
        Err(TelecmdError::UnknownCommandCode { code: 9, line: 2 })
    );
    assert_eq!(store.len(), 1);
    assert_eq!(store.head().cloned(), head_before);
    assert_eq!(store.next_entry_index(), 1);
}

#[test]
fn test_scenario_unknown_code_does_not_stop_batch() {
    let (store, printed) = run_rows(&[&[0, 1], &[42], &[0, 2], &[5]]);
    assert_eq!(store.len(), 2);
    assert_eq!(printed, "(1, 0, 2)\n(0, 0, 1)\n");
}

#[test]
fn test_scenario_print_shows_pending_delete_and_modify() {
    let (_, printed) = run_rows(&[&[0, 10], &[4, 0, 99], &[2, 0], &[5]]);
    assert_eq!(printed, "(2, 0)\n(1, 0, 99)\n(0, 0, 10)\n");
}

#[test]
fn test_scenario_reverse_then_execute_order() {
    // After reversing, the new entry is drained before the modify that
    // targets it, so the modify finds its target gone and stays silent
    let mut store = QueueStore::new();
    let mut out = Vec::new();
    let mut outcome = None;
    for record in records(&[&[0, 10], &[4, 0, 99], &[6], &[7]]) {
        outcome = Some(dispatch(&mut store, &record, &mut out, PrintFormat::Tuple).unwrap());
    }

    match outcome.unwrap() {
        DispatchOutcome::Executed(report) => {
            assert_eq!(report.visited, 2);
            assert_eq!(report.modifies_applied, 0);
            assert_eq!(report.silent_noops, 1);
            assert!(report.errors.is_empty());
        }
        other => panic!("expected execution outcome, got {:?}", other),
    }
    assert!(store.is_empty());
}

#[test]
fn test_scenario_delete_of_missing_target_is_reported_not_fatal() {
    let mut store = QueueStore::new();
    let mut out = Vec::new();
    let mut last = None;
    for record in records(&[&[0, 1], &[2, 77], &[7], &[0, 5], &[5]]) {
        last = Some(dispatch(&mut store, &record, &mut out, PrintFormat::Tuple).unwrap());
        if let Some(DispatchOutcome::Executed(report)) = &last {
            assert_eq!(
                report.errors,
                vec![TelecmdError::EntryNotFound { entry_index: 77 }]
            );
        }
    }

    // Processing carried on after the failed delete
    assert_eq!(store.entry_indices(), vec![2]);
    assert_eq!(String::from_utf8(out).unwrap(), "(2, 0, 5)\n");
}

#[test]
fn test_scenario_indices_keep_counting_after_execute() {
    let (store, printed) = run_rows(&[&[0, 1], &[0, 2], &[7], &[1, 3, 4], &[5]]);
    assert_eq!(store.entry_indices(), vec![2]);
    assert_eq!(printed, "(2, 3, 4)\n");
}

#[test]
fn test_scenario_malformed_record_is_skipped() {
    let mut store = QueueStore::new();
    let mut out = Vec::new();
    let rows = records(&[&[4, 0], &[0, 3]]);

    let result = dispatch(&mut store, &rows[0], &mut out, PrintFormat::Tuple);
    assert!(matches!(
        result,
        Err(TelecmdError::MalformedRecord { line: 1, .. })
    ));
    assert!(store.is_empty());

    dispatch(&mut store, &rows[1], &mut out, PrintFormat::Tuple).unwrap();
    assert_eq!(store.entry_indices(), vec![0]);
}

#[test]
fn test_scenario_json_print_format() {
    let mut store = QueueStore::new();
    let mut out = Vec::new();
    for record in records(&[&[1, 2, 30], &[5]]) {
        dispatch(&mut store, &record, &mut out, PrintFormat::Json).unwrap();
    }

    let printed = String::from_utf8(out).unwrap();
    let value: serde_json::Value = serde_json::from_str(printed.trim()).unwrap();
    assert_eq!(value["entry_index"], 0);
    assert_eq!(value["kind"], "new_with_priority");
    assert_eq!(value["priority"], 2);
    assert_eq!(value["data"], 30);
}
