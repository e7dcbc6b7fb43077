//! Check command
//!
//! Usage: telecmd check [PATH]

use clap::Args;
use std::path::PathBuf;

use telecmd_batch::{check_batch, FileSource};

use super::DEFAULT_BATCH_FILE;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Batch file to decode
    #[arg(default_value = DEFAULT_BATCH_FILE)]
    pub path: PathBuf,
}

/// Execute check command
///
/// Lists every record that would be rejected, one per line on stdout.
pub fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = FileSource::open(&args.path)?;
    let errors = check_batch(&mut source);

    if errors.is_empty() {
        println!("✓ {}: no invalid records", args.path.display());
        return Ok(());
    }

    for e in &errors {
        println!("{}", e);
    }
    Err(format!(
        "{} invalid record(s) in {}",
        errors.len(),
        args.path.display()
    )
    .into())
}
