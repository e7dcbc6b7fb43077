//! Batch runner
//!
//! Feeds every record of a source through the dispatcher against one
//! queue. Recoverable failures are reported and the batch carries on; only
//! a fatal source error stops it early. Whatever is still queued when the
//! source runs dry is discarded.

use std::io::Write;
use std::time::Instant;

use telecmd_core::dispatch::{decode_request, dispatch, DispatchOutcome};
use telecmd_core::errors::{ExError, TelecmdError};
use telecmd_core::render::PrintFormat;
use telecmd_core::{log_op_end, log_op_error, log_op_start, QueueStore, Record};
use telecmd_core_types::{RunContext, RunId};

use crate::errors::Result;
use crate::source::BatchSource;

/// Settings for one batch run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// How Print renders queue entries
    pub format: PrintFormat,
    /// Correlation for every event and error of the run
    pub context: RunContext,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: PrintFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_context(mut self, context: RunContext) -> Self {
        self.context = context;
        self
    }
}

/// What a batch run did
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub run_id: RunId,
    /// Records pulled from the source, including ones that failed to decode
    pub records: usize,
    /// New, delete and modify requests queued
    pub enqueued: usize,
    /// Sort, print, reverse and execute requests run
    pub utilities: usize,
    pub lines_printed: usize,
    /// Entries still queued at end of input, dropped with the run
    pub discarded: usize,
    /// Every reported failure, in batch order
    pub errors: Vec<ExError>,
}

impl BatchSummary {
    fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            records: 0,
            enqueued: 0,
            utilities: 0,
            lines_printed: 0,
            discarded: 0,
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "run {}: {} record(s), {} queued, {} utility command(s), {} line(s) printed, {} error(s), {} entry(ies) discarded",
            self.run_id,
            self.records,
            self.enqueued,
            self.utilities,
            self.lines_printed,
            self.errors.len(),
            self.discarded
        )
    }
}

/// Process a whole batch against `store`
///
/// Printed entries are written to `out`. The store is empty when this
/// returns successfully; its index counter keeps running.
///
/// # Errors
///
/// Returns the fatal source error (`SourceUnavailable`) that halted the
/// run. Every other failure is collected in the summary instead.
pub fn run_batch(
    source: &mut dyn BatchSource,
    store: &mut QueueStore,
    out: &mut dyn Write,
    options: &RunOptions,
) -> Result<BatchSummary> {
    let run_id = options.context.run_id.clone();
    let source_label = options.context.source.as_deref().unwrap_or("-");
    let span = tracing::info_span!("batch_run", run_id = %run_id, source = %source_label);
    let _guard = span.enter();

    log_op_start!("run_batch", source = source_label);
    let start = Instant::now();
    let mut summary = BatchSummary::new(run_id.clone());

    while let Some(item) = source.next_record() {
        summary.records += 1;

        let record = match item {
            Ok(record) => record,
            Err(e) if e.kind().is_fatal() => {
                let duration_ms = start.elapsed().as_millis() as u64;
                log_op_error!("run_batch", e.clone(), duration_ms = duration_ms);
                return Err(e.with_run_id(run_id));
            }
            Err(e) => {
                log_op_error!("read_record", e.clone(), duration_ms = 0u64);
                summary.errors.push(e.with_run_id(run_id.clone()));
                continue;
            }
        };

        match dispatch(store, &record, out, options.format) {
            Ok(outcome) => {
                match &outcome {
                    DispatchOutcome::Enqueued { .. } => summary.enqueued += 1,
                    DispatchOutcome::Printed(report) => {
                        summary.utilities += 1;
                        summary.lines_printed += report.lines;
                    }
                    _ => summary.utilities += 1,
                }
                for e in outcome.reported_errors() {
                    summary.errors.push(attribute(e.clone(), &record, &run_id));
                }
            }
            Err(e) => summary.errors.push(attribute(e, &record, &run_id)),
        }
    }

    summary.discarded = store.len();
    if summary.discarded > 0 {
        tracing::debug!(
            discarded = summary.discarded,
            "end of input; dropping queued entries"
        );
    }
    store.clear();

    let duration_ms = start.elapsed().as_millis() as u64;
    log_op_end!(
        "run_batch",
        duration_ms = duration_ms,
        records = summary.records,
        errors = summary.errors.len()
    );
    Ok(summary)
}

/// Decode every record without touching a queue
///
/// Reports records with unknown codes, missing fields or bad tokens. Stops
/// at a fatal source error, which is reported last.
pub fn check_batch(source: &mut dyn BatchSource) -> Vec<ExError> {
    log_op_start!("check_batch");
    let start = Instant::now();
    let mut errors = Vec::new();
    let mut records = 0usize;

    while let Some(item) = source.next_record() {
        records += 1;
        let failure = match item {
            Ok(record) => match decode_request(&record) {
                Ok(_) => continue,
                Err(e) => ExError::from(e).with_line(record.line),
            },
            Err(e) => e,
        };

        let fatal = failure.kind().is_fatal();
        log_op_error!("check_batch", failure.clone(), duration_ms = 0u64);
        errors.push(failure);
        if fatal {
            break;
        }
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    log_op_end!(
        "check_batch",
        duration_ms = duration_ms,
        records = records,
        errors = errors.len()
    );
    errors
}

/// Pin a dispatch failure to the record and run it came from
fn attribute(err: TelecmdError, record: &Record, run_id: &RunId) -> ExError {
    ExError::from(err)
        .with_line(record.line)
        .with_run_id(run_id.clone())
}
