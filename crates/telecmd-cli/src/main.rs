//! Telecmd CLI
//!
//! Command-line interface for the telecommand queue interpreter

use clap::{Parser, Subcommand, ValueEnum};
use telecmd_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "telecmd")]
#[command(about = "Telecmd - Telecommand batch interpreter", long_about = None)]
struct Cli {
    /// Logging profile; RUST_LOG refines the filter
    #[arg(long, value_enum, global = true, default_value_t = LogProfile::Development)]
    log_profile: LogProfile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    /// Human-readable logs on stderr
    Development,
    /// JSON logs on stderr
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interpret a telecommand batch file
    Run(commands::run::RunArgs),
    /// Decode a batch file without executing it
    Check(commands::check::CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_profile.into());

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Check(args) => commands::check::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
