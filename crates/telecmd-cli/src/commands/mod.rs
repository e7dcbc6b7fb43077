pub mod check;
pub mod run;

/// Batch file read when no path is given
pub const DEFAULT_BATCH_FILE: &str = "CMD.bat";
