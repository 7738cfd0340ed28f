//! Command line argument parsing for the yomi CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::segmenter::Mode;

/// yomi - Japanese text analysis with a hot-reloadable user dictionary
#[derive(Parser, Debug, Clone)]
#[command(name = "yomi")]
#[command(about = "Japanese text analysis with a hot-reloadable user dictionary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct YomiArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl YomiArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze text given as arguments, or each line of stdin
    Analyze(AnalyzeArgs),

    /// Compile a user dictionary and report problems
    #[command(name = "check-dictionary")]
    CheckDictionary(CheckDictionaryArgs),
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze; reads stdin line by line when omitted
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Analysis configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "YOMI_CONFIG")]
    pub config: Option<PathBuf>,

    /// User dictionary file (overrides the configuration)
    #[arg(short = 'u', long, value_name = "USER_DICTIONARY")]
    pub user_dictionary: Option<PathBuf>,

    /// Segmentation mode (overrides the configuration)
    #[arg(short = 'm', long)]
    pub mode: Option<Mode>,

    /// Minimum interval between user dictionary checks, e.g. 500ms, 30s, 1m
    #[arg(long, value_name = "DURATION")]
    pub reload_interval: Option<String>,

    /// Keep punctuation tokens
    #[arg(long)]
    pub keep_punctuation: bool,

    /// Part-of-speech tags to concatenate (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub concat_tags: Vec<String>,

    /// File listing part-of-speech tags to concatenate
    #[arg(long, value_name = "TAGS_FILE")]
    pub concat_tags_path: Option<PathBuf>,
}

/// Arguments for checking a user dictionary
#[derive(Parser, Debug, Clone)]
pub struct CheckDictionaryArgs {
    /// Path to the user dictionary
    #[arg(value_name = "USER_DICTIONARY")]
    pub path: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable, one token per line
    Human,
    /// JSON
    Json,
}
