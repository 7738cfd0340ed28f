//! Base form filter implementation.
//!
//! Replaces inflected words with their dictionary form so that `行きました`
//! and `行く` index to the same term.
//!
//! # Examples
//!
//! ```
//! use yomi::analysis::token::Token;
//! use yomi::analysis::token_filter::Filter;
//! use yomi::analysis::token_filter::base_form::BaseFormFilter;
//!
//! let filter = BaseFormFilter::new();
//! let tokens = vec![Token::new("ました", 0).with_base_form("ます"), Token::new("東京", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! assert_eq!(result[0].text, "ます");
//! assert_eq!(result[1].text, "東京");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that rewrites token text to the token's base form.
///
/// Tokens without a base form keep their text. Offsets still point at the
/// surface form in the original input.
#[derive(Clone, Debug, Default)]
pub struct BaseFormFilter;

impl BaseFormFilter {
    /// Create a new base form filter.
    pub fn new() -> Self {
        BaseFormFilter
    }
}

impl Filter for BaseFormFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if let Some(base_form) = token.base_form.as_ref() {
                if !base_form.is_empty() && *base_form != token.text {
                    token.text = base_form.clone();
                }
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "base_form"
    }
}
