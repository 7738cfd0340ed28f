//! Katakana stem filter implementation.
//!
//! Normalizes the trailing prolonged sound mark of katakana loanwords, so
//! that `コンピューター` and `コンピュータ` index to the same term.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default minimum length, in characters, of a token to be stemmed.
pub const DEFAULT_MINIMUM_LENGTH: usize = 4;

/// Smallest accepted minimum length. A lone `ー` is never stemmed away.
pub const SMALLEST_MINIMUM_LENGTH: usize = 2;

const PROLONGED_SOUND_MARK: char = 'ー';

/// A filter that strips one trailing `ー` from long katakana tokens.
///
/// # Examples
///
/// ```
/// use yomi::analysis::token::Token;
/// use yomi::analysis::token_filter::Filter;
/// use yomi::analysis::token_filter::katakana_stem::KatakanaStemFilter;
///
/// let filter = KatakanaStemFilter::new();
/// let tokens = vec![Token::new("コンピューター", 0), Token::new("カレー", 1)];
///
/// let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
/// assert_eq!(result[0].text, "コンピュータ");
/// assert_eq!(result[1].text, "カレー");
/// ```
#[derive(Clone, Debug)]
pub struct KatakanaStemFilter {
    minimum_length: usize,
}

impl KatakanaStemFilter {
    /// Create a filter with the default minimum length.
    pub fn new() -> Self {
        Self::with_minimum_length(DEFAULT_MINIMUM_LENGTH)
    }

    /// Create a filter that only stems tokens of at least `minimum_length` characters.
    ///
    /// Values below [`SMALLEST_MINIMUM_LENGTH`] are raised to it. Configuration
    /// rejects them instead.
    pub fn with_minimum_length(minimum_length: usize) -> Self {
        KatakanaStemFilter {
            minimum_length: minimum_length.max(SMALLEST_MINIMUM_LENGTH),
        }
    }

    /// Get the minimum length.
    pub fn minimum_length(&self) -> usize {
        self.minimum_length
    }

    fn stem(&self, text: &str) -> Option<usize> {
        let chars = text.chars().count();
        if chars < self.minimum_length
            || !text.ends_with(PROLONGED_SOUND_MARK)
            || !text.chars().all(is_katakana)
        {
            return None;
        }
        Some(text.len() - PROLONGED_SOUND_MARK.len_utf8())
    }
}

impl Default for KatakanaStemFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}')
}

impl Filter for KatakanaStemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filter = self.clone();
        Ok(Box::new(tokens.map(move |mut token| {
            if let Some(end) = filter.stem(&token.text) {
                token.text.truncate(end);
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "katakana_stem"
    }
}
