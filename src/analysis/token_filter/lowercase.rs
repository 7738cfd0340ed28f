//! Lowercase filter implementation.
//!
//! Converts token text to lowercase so that `Rust` and `rust` index to the
//! same term. Run it after [`CjkWidthFilter`](super::cjk_width::CjkWidthFilter)
//! so full-width Latin letters are folded first.
//!
//! # Examples
//!
//! ```
//! use yomi::analysis::token::Token;
//! use yomi::analysis::token_filter::Filter;
//! use yomi::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Rust", 0), Token::new("東京", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(filtered[0].text, "rust");
//! assert_eq!(filtered[1].text, "東京");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// Positions and offsets are preserved. Tokens without uppercase letters are
/// passed through without reallocating.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if token.text.chars().any(char::is_uppercase) {
                token.text = token.text.to_lowercase();
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
