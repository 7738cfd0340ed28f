//! Token filter implementations for token transformation.
//!
//! Filters transform the token streams produced by tokenizers. They can
//! rewrite, remove or merge tokens.
//!
//! # Available Filters
//!
//! - [`pos_concat::PosConcatFilter`] - Merges runs of tokens sharing a part-of-speech tag
//! - [`base_form::BaseFormFilter`] - Rewrites inflected words to their base form
//! - [`reading_form::ReadingFormFilter`] - Rewrites tokens to their reading
//! - [`pos_stop::PartOfSpeechStopFilter`] - Removes tokens by part-of-speech tag
//! - [`katakana_stem::KatakanaStemFilter`] - Strips the trailing prolonged sound mark
//! - [`cjk_width::CjkWidthFilter`] - Folds full-width Latin and half-width katakana
//! - [`lowercase::LowercaseFilter`] - Lowercases token text
//!
//! # Filter Chaining
//!
//! Filters are chained in an analyzer:
//!
//! ```text
//! ReloadableTokenizer → BaseForm → PosStop → CjkWidth → KatakanaStem → Lowercase → PosConcat
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream. The trait
/// requires `Send + Sync` so one filter instance can serve many sessions.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use yomi::analysis::token::{Token, TokenStream};
/// use yomi::analysis::token_filter::Filter;
/// use yomi::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod base_form;
pub mod cjk_width;
pub mod katakana_stem;
pub mod lowercase;
pub mod pos_concat;
pub mod pos_stop;
pub mod reading_form;
