//! Morphological analyzers that split Japanese text into base tokens.
//!
//! A [`MorphologicalAnalyzer`] is stateless per call: it compiles a user
//! dictionary from a source file into an immutable value, and segments text
//! against an optional compiled dictionary. The reloadable tokenizer owns the
//! compiled dictionaries and decides which one a given session sees, so an
//! analyzer never has to swap dictionaries internally.
//!
//! # Available Analyzers
//!
//! - [`lexicon::LexiconSegmenter`] - Built-in longest-match segmenter over the
//!   user dictionary with character-class fallback
//! - [`lindera::LinderaSegmenter`] - Lindera morphological analysis (requires
//!   the `lindera` feature)

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::error::{Result, YomiError};

/// Trait for morphological analyzers used by the reloadable tokenizer.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use yomi::analysis::segmenter::MorphologicalAnalyzer;
/// use yomi::analysis::token::Token;
/// use yomi::error::Result;
///
/// struct CharSegmenter;
///
/// impl MorphologicalAnalyzer for CharSegmenter {
///     type Dictionary = ();
///
///     fn compile(&self, _source: &Path) -> Result<Self::Dictionary> {
///         Ok(())
///     }
///
///     fn segment(&self, text: &str, _dictionary: Option<&()>) -> Result<Vec<Token>> {
///         Ok(text
///             .char_indices()
///             .enumerate()
///             .map(|(i, (start, c))| Token::with_offsets(c, i, start, start + c.len_utf8()))
///             .collect())
///     }
///
///     fn name(&self) -> &'static str {
///         "char"
///     }
/// }
///
/// let tokens = CharSegmenter.segment("東京", None).unwrap();
/// assert_eq!(tokens.len(), 2);
/// ```
pub trait MorphologicalAnalyzer: Send + Sync {
    /// Compiled user dictionary type. Immutable once built.
    type Dictionary: Send + Sync;

    /// Compile a user dictionary from its source file.
    fn compile(&self, source: &Path) -> Result<Self::Dictionary>;

    /// Segment `text`, consulting `dictionary` when one is given.
    ///
    /// `None` means plain segmentation with the analyzer's own lexicon.
    fn segment(&self, text: &str, dictionary: Option<&Self::Dictionary>) -> Result<Vec<Token>>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Segmentation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Regular segmentation.
    #[default]
    Normal,
    /// Decompose long compounds into their parts, for search.
    Search,
    /// Search mode plus unigrams for unknown katakana words.
    Extended,
}

impl FromStr for Mode {
    type Err = YomiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "search" => Ok(Mode::Search),
            "extended" => Ok(Mode::Extended),
            other => Err(YomiError::configuration(format!(
                "unknown mode '{other}', expected one of normal, search, extended"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "normal",
            Mode::Search => "search",
            Mode::Extended => "extended",
        };
        f.write_str(name)
    }
}

/// Character classes used for unknown-word grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CharClass {
    Kanji,
    Hiragana,
    Katakana,
    Alpha,
    Digit,
    Whitespace,
    Punctuation,
    Other,
}

impl CharClass {
    pub(crate) fn of(c: char) -> CharClass {
        match c {
            '々' | '〆' | '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}' => {
                CharClass::Kanji
            }
            '\u{3041}'..='\u{309F}' => CharClass::Hiragana,
            '・' | '･' => CharClass::Punctuation,
            '\u{30A1}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
                CharClass::Katakana
            }
            'A'..='Z' | 'a'..='z' | 'Ａ'..='Ｚ' | 'ａ'..='ｚ' => CharClass::Alpha,
            '0'..='9' | '０'..='９' => CharClass::Digit,
            c if c.is_whitespace() => CharClass::Whitespace,
            c if c.is_ascii_punctuation() => CharClass::Punctuation,
            '\u{3001}'..='\u{303F}'
            | '\u{2000}'..='\u{206F}'
            | '\u{FF01}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF20}'
            | '\u{FF3B}'..='\u{FF40}'
            | '\u{FF5B}'..='\u{FF65}'
            | '\u{00A1}'..='\u{00BF}'
            | '\u{2190}'..='\u{23FF}'
            | '\u{25A0}'..='\u{27BF}' => CharClass::Punctuation,
            c if c.is_alphabetic() => CharClass::Alpha,
            _ => CharClass::Other,
        }
    }
}

/// Whether `text` consists only of punctuation, symbols and spaces.
pub fn is_punctuation(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(|c| {
            matches!(
                CharClass::of(c),
                CharClass::Punctuation | CharClass::Whitespace
            )
        })
}

/// Convert hiragana to katakana, leaving other characters untouched.
pub fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Convert katakana to hiragana, leaving other characters untouched.
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

pub mod lexicon;
#[cfg(feature = "lindera")]
pub mod lindera;

pub use lexicon::LexiconSegmenter;
#[cfg(feature = "lindera")]
pub use lindera::LinderaSegmenter;
