//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{OutputFormat, YomiArgs};
use crate::error::Result;

/// Result of analyzing one input text.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub dictionary: Option<String>,
    pub tokens: Vec<Token>,
}

/// Result of checking a user dictionary.
#[derive(Debug, Serialize, Deserialize)]
pub struct DictionaryCheckResult {
    pub path: String,
    pub entries: usize,
    pub modified: Option<String>,
}

/// Output an analysis result in the selected format.
pub fn output_analysis(result: &AnalysisResult, args: &YomiArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                if let Some(dictionary) = &result.dictionary {
                    println!("# {} [{}]", result.text, dictionary);
                }
            }
            for token in &result.tokens {
                println!("{}", format_token(token));
            }
            if args.verbosity() > 0 {
                println!("EOS");
            }
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output a dictionary check result in the selected format.
pub fn output_dictionary_check(result: &DictionaryCheckResult, args: &YomiArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}: {} entries", result.path, result.entries);
            if let Some(modified) = &result.modified {
                println!("modified: {modified}");
            }
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Format a token as one tab-separated line: surface, offsets, tag, base form
/// and reading.
pub fn format_token(token: &Token) -> String {
    let mut line = format!(
        "{}\t{}-{}\t{}",
        token.text,
        token.start_offset,
        token.end_offset,
        token.pos_tag().unwrap_or("*")
    );
    line.push('\t');
    line.push_str(token.base_form.as_deref().unwrap_or("*"));
    line.push('\t');
    line.push_str(token.reading.as_deref().unwrap_or("*"));
    if token.position_length > 1 {
        line.push_str(&format!("\tspan={}", token.position_length));
    }
    line
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &YomiArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
