//! Run command
//!
//! Usage: telecmd run [PATH] [--format tuple|json] [--summary]

use clap::{Args, ValueEnum};
use std::io;
use std::path::PathBuf;

use telecmd_batch::{run_batch, FileSource, RunOptions};
use telecmd_core::render::PrintFormat;
use telecmd_core::QueueStore;
use telecmd_core_types::RunContext;

use super::DEFAULT_BATCH_FILE;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Batch file to interpret
    #[arg(default_value = DEFAULT_BATCH_FILE)]
    pub path: PathBuf,

    /// How printed queue entries are rendered
    #[arg(short, long, value_enum, default_value_t = FormatArg::Tuple)]
    pub format: FormatArg,

    /// Print a one-line summary of the run to stderr
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// `(entry_index, priority, data)` style tuples
    Tuple,
    /// One JSON object per entry
    Json,
}

impl From<FormatArg> for PrintFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Tuple => PrintFormat::Tuple,
            FormatArg::Json => PrintFormat::Json,
        }
    }
}

/// Execute run command
///
/// Recoverable failures in the batch are logged and do not change the exit
/// status; only a batch file that cannot be opened does.
pub fn execute(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = FileSource::open(&args.path)?;

    let context = RunContext::new().with_source(args.path.display().to_string());
    let options = RunOptions::new()
        .with_format(args.format.into())
        .with_context(context);

    let mut store = QueueStore::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = run_batch(&mut source, &mut store, &mut out, &options)?;

    if args.summary {
        eprintln!("{}", summary);
    }

    Ok(())
}
