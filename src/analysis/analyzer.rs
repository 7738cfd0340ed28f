//! Analyzers that combine a tokenizer with a chain of filters.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream
//!             ↓
//!         Tokenizer (reloadable user dictionary)
//!             ↓
//!         Filter 1 … Filter N
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`](pipeline::PipelineAnalyzer) - Custom tokenizer + filter chains
//! - [`JapaneseAnalyzer`](japanese::JapaneseAnalyzer) - Japanese search preset
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use yomi::analysis::analyzer::Analyzer;
//! use yomi::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use yomi::analysis::segmenter::{LexiconSegmenter, Mode};
//! use yomi::analysis::token_filter::pos_stop::PartOfSpeechStopFilter;
//! use yomi::analysis::tokenizer::ReloadableTokenizer;
//!
//! let tokenizer = Arc::new(ReloadableTokenizer::new(LexiconSegmenter::new(Mode::Normal)));
//! let analyzer = PipelineAnalyzer::new(tokenizer)
//!     .add_filter(Arc::new(PartOfSpeechStopFilter::japanese()));
//!
//! let tokens: Vec<_> = analyzer.analyze("東京の天気").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so one analyzer can serve many threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Provide access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn std::any::Any;
}

pub mod japanese;
pub mod pipeline;

pub use japanese::JapaneseAnalyzer;
pub use pipeline::PipelineAnalyzer;
