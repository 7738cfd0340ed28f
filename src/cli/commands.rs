//! Command implementations for the yomi CLI.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{AnalysisConfig, PosConcatConfig, TagListConfig, parse_duration};
use crate::dictionary::source::{DictionarySource, FileSource};
use crate::dictionary::user::UserDictionary;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: YomiArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args.clone(), &args),
        Command::CheckDictionary(check_args) => check_dictionary(check_args.clone(), &args),
    }
}

/// Build the analysis configuration from a config file and command line overrides.
///
/// Paths given on the command line are relative to the working directory,
/// not to the configuration directory.
pub fn analysis_config(args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(path) = &args.user_dictionary {
        config.tokenizer.user_dictionary = Some(absolute(path)?);
    }
    if let Some(mode) = args.mode {
        config.tokenizer.mode = mode;
    }
    if let Some(interval) = &args.reload_interval {
        config.tokenizer.reload_interval = parse_duration(interval)?;
    }
    if args.keep_punctuation {
        config.tokenizer.discard_punctuation = false;
    }
    if !args.concat_tags.is_empty() || args.concat_tags_path.is_some() {
        let tags_path = match &args.concat_tags_path {
            Some(path) => Some(absolute(path)?),
            None => None,
        };
        config.pos_concat = Some(PosConcatConfig {
            tags: TagListConfig {
                tags: (!args.concat_tags.is_empty()).then(|| args.concat_tags.clone()),
                tags_path,
            },
            merged_tag: None,
        });
    }

    Ok(config)
}

/// Analyze text with one long-lived pipeline.
///
/// Reading from stdin keeps the pipeline open across lines, so edits to the
/// user dictionary show up in later lines once the reload interval elapses.
fn analyze(args: AnalyzeArgs, cli_args: &YomiArgs) -> Result<()> {
    let config = analysis_config(&args)?;
    let analyzer = config.build()?;
    debug!(?analyzer, "pipeline ready");

    if args.text.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            analyze_one(&analyzer, &line, cli_args)?;
        }
    } else {
        for text in &args.text {
            analyze_one(&analyzer, text, cli_args)?;
        }
    }

    Ok(())
}

fn analyze_one(analyzer: &PipelineAnalyzer, text: &str, cli_args: &YomiArgs) -> Result<()> {
    let tokens = analyzer.analyze(text)?.collect();
    let dictionary = analyzer
        .dictionary()
        .map(|d| d.dictionary_version().to_string());

    output_analysis(
        &AnalysisResult {
            text: text.to_string(),
            dictionary,
            tokens,
        },
        cli_args,
    )
}

/// Compile a user dictionary and report its size.
fn check_dictionary(args: CheckDictionaryArgs, cli_args: &YomiArgs) -> Result<()> {
    let dictionary = UserDictionary::from_path(&args.path)?;
    let modified = FileSource::new(&args.path)
        .modified()
        .ok()
        .map(|m| DateTime::<Utc>::from(m).to_rfc3339());
    info!(path = %args.path.display(), entries = dictionary.len(), "user dictionary is valid");

    output_dictionary_check(
        &DictionaryCheckResult {
            path: args.path.to_string_lossy().to_string(),
            entries: dictionary.len(),
            modified,
        },
        cli_args,
    )
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}
