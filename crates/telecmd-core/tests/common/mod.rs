use telecmd_core::render::PrintFormat;
use telecmd_core::{dispatch, QueueStore, Record, Request};

/// Build a store by queueing the given requests in order
#[allow(dead_code)]
pub fn store_with(requests: &[Request]) -> QueueStore {
    let mut store = QueueStore::new();
    for request in requests {
        telecmd_core::ops::enqueue(&mut store, request).unwrap();
    }
    store
}

/// Turn code/field rows into records numbered from line 1
#[allow(dead_code)]
pub fn records(rows: &[&[u32]]) -> Vec<Record> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| Record::new(i + 1, row[0], row[1..].to_vec()))
        .collect()
}

/// Dispatch every row against a fresh store, ignoring reported errors
///
/// Returns the final store and everything printed, as text.
#[allow(dead_code)]
pub fn run_rows(rows: &[&[u32]]) -> (QueueStore, String) {
    let mut store = QueueStore::new();
    let mut out = Vec::new();
    for record in records(rows) {
        let _ = dispatch(&mut store, &record, &mut out, PrintFormat::Tuple);
    }
    (store, String::from_utf8(out).unwrap())
}
