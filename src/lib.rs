//! # yomi
//!
//! Japanese text analysis for search indexing.
//!
//! ## Features
//!
//! - User dictionaries that are picked up again when their file changes,
//!   without restarting the pipeline or disturbing open token streams
//! - Part-of-speech concatenation of compound parts split by the analyzer
//! - Iteration mark expansion ahead of the tokenizer, with offsets mapped back
//!   to the original text
//! - Base form, reading form (katakana, hiragana or romaji), part-of-speech
//!   stop, width folding, lowercase and katakana stem filters
//! - JSON-configured analysis pipelines
//!
//! ## Example
//!
//! ```
//! use yomi::analysis::analyzer::Analyzer;
//! use yomi::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_json(
//!     r#"{ "pos_concat": { "tags": ["名詞-一般"] }, "tokenizer": { "mode": "search" } }"#,
//! )
//! .unwrap();
//! let analyzer = config.build().unwrap();
//!
//! let tokens: Vec<_> = analyzer.analyze("形態素解析を行う").unwrap().collect();
//! assert_eq!(tokens[0].text, "形態素解析");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
