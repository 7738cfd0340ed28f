//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step in the text analysis pipeline, responsible
//! for splitting input text into tokens.
//!
//! # Available Tokenizers
//!
//! - [`reloadable::ReloadableTokenizer`] - Japanese morphological tokenizer
//!   whose user dictionary is picked up again when its file changes
//!
//! # Examples
//!
//! ```
//! use yomi::analysis::segmenter::{LexiconSegmenter, Mode};
//! use yomi::analysis::tokenizer::Tokenizer;
//! use yomi::analysis::tokenizer::reloadable::ReloadableTokenizer;
//!
//! let tokenizer = ReloadableTokenizer::new(LexiconSegmenter::new(Mode::Normal));
//! let tokens: Vec<_> = tokenizer.tokenize("東京の天気").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// All tokenizers must implement this trait to be used in the analysis pipeline.
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use yomi::analysis::token::{Token, TokenStream};
/// use yomi::analysis::tokenizer::Tokenizer;
/// use yomi::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens: Vec<Token> = text
///             .split('、')
///             .enumerate()
///             .map(|(i, s)| Token::new(s.trim(), i))
///             .collect();
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod reloadable;

pub use reloadable::{Reloadable, ReloadableTokenizer, SegmentationSession};
