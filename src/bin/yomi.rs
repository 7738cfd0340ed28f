//! yomi CLI binary.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use yomi::cli::args::*;
use yomi::cli::commands::*;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments using clap
    let args = YomiArgs::parse();

    let level = match args.verbosity() {
        0 => "error", // Quiet mode
        1 => "warn",  // Default
        2 => "info",  // Verbose
        _ => "debug", // Very verbose (3+)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let command = match &args.command {
        Command::Analyze(_) => "analyze",
        Command::CheckDictionary(_) => "check-dictionary",
    };
    execute_command(args).with_context(|| format!("{command} failed"))
}
