//! Token types and utilities for text analysis.
//!
//! This module defines the core data structures for representing text tokens,
//! which are the fundamental units that flow through the analysis pipeline.
//!
//! # Core Types
//!
//! - [`Token`] - A single analyzed token with text, offsets, positions and
//!   morphological attributes
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//!
//! # Token Graphs
//!
//! `position` is the index the analyzer assigned. Filters never rewrite it,
//! so it is the field to use for phrase distances against the original
//! segmentation. `position_increment` counts from the previous emitted
//! token, and `position_length` tells how many analyzer positions a token
//! covers. Tokens that follow a merged run pass through unchanged, so summed
//! increments give a compacted numbering that differs from `position`:
//!
//! ```text
//! Input: "詳細設計書"
//!
//! Analyzer output:
//!   position 0: "詳細" (pos_inc=1, pos_len=1)
//!   position 1: "設計" (pos_inc=1, pos_len=1)
//!   position 2: "書"   (pos_inc=1, pos_len=1)
//!
//! After part-of-speech concatenation of the first two:
//!   position 0: "詳細設計" (pos_inc=1, pos_len=2)  covers positions 0 and 1
//!   position 2: "書"       (pos_inc=1, pos_len=1)  summed increments give 1
//! ```
//!
//! # Examples
//!
//! ```
//! use yomi::analysis::token::Token;
//!
//! let token = Token::with_offsets("設計", 1, 6, 12).with_pos_tag("名詞-サ変接続");
//! assert_eq!(token.text, "設計");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.end_offset, 12);
//! assert_eq!(token.pos_tag(), Some("名詞-サ変接続"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after segmentation.
///
/// # Fields
///
/// - `text` - The token's text content (surface form until a filter rewrites it)
/// - `position` - Index assigned by the analyzer (0-based), kept by filters
/// - `start_offset` / `end_offset` - Byte offsets in original text
/// - `position_increment` - Position relative to previous token (default: 1)
/// - `position_length` - Number of positions this token spans (default: 1)
/// - `pos_tag` - Part-of-speech tag assigned by the analyzer, e.g. `名詞-サ変接続`
/// - `base_form` - Dictionary form of an inflected word
/// - `reading` - Katakana reading
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The index the analyzer assigned to this token (0-based).
    ///
    /// Filters carry it through unchanged, so after a merge it can run ahead
    /// of the sum of position increments.
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1 (default): Normal increment, next position
    /// - 0: Same position as previous token
    /// - >1: Skip positions (e.g., for removed tokens)
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    ///
    /// A token produced by concatenating `n` analyzer tokens spans `n`
    /// analyzer positions.
    pub position_length: usize,

    /// Part-of-speech tag, hyphen-joined from most to least general category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_tag: Option<String>,

    /// Base (dictionary) form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_form: Option<String>,

    /// Reading in katakana.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            position_length: 1,
            pos_tag: None,
            base_form: None,
            reading: None,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the part-of-speech tag.
    pub fn with_pos_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.pos_tag = Some(tag.into());
        self
    }

    /// Set the base form.
    pub fn with_base_form<S: Into<String>>(mut self, base_form: S) -> Self {
        self.base_form = Some(base_form.into());
        self
    }

    /// Set the reading.
    pub fn with_reading<S: Into<String>>(mut self, reading: S) -> Self {
        self.reading = Some(reading.into());
        self
    }

    /// Get the part-of-speech tag.
    pub fn pos_tag(&self) -> Option<&str> {
        self.pos_tag.as_deref()
    }

    /// Set the position length.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
