//! Part-of-speech stop filter implementation.
//!
//! Removes tokens by part-of-speech tag instead of by text, which is how
//! particles and auxiliary verbs are usually dropped from Japanese text.

use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::pos_concat::PosTagSet;
use crate::error::Result;

/// Tags dropped by [`PartOfSpeechStopFilter::japanese`].
pub const DEFAULT_STOP_TAGS: &[&str] = &[
    "助詞-格助詞-一般",
    "助詞-格助詞-連語",
    "助詞-係助詞",
    "助詞-副助詞",
    "助詞-並立助詞",
    "助詞-連体化",
    "助動詞",
    "記号-一般",
    "記号-句点",
    "記号-読点",
    "記号-括弧開",
    "記号-括弧閉",
];

/// A filter that removes tokens whose part-of-speech tag is in a stop set.
///
/// The position increment of the next kept token grows by the number of
/// removed tokens, so phrase queries still see the gap.
///
/// # Examples
///
/// ```
/// use yomi::analysis::token::Token;
/// use yomi::analysis::token_filter::Filter;
/// use yomi::analysis::token_filter::pos_stop::PartOfSpeechStopFilter;
///
/// let filter = PartOfSpeechStopFilter::japanese();
/// let tokens = vec![
///     Token::new("東京", 0).with_pos_tag("名詞-固有名詞-地域-一般"),
///     Token::new("の", 1).with_pos_tag("助詞-連体化"),
///     Token::new("天気", 2).with_pos_tag("名詞-一般"),
/// ];
///
/// let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
/// assert_eq!(result.len(), 2);
/// assert_eq!(result[1].text, "天気");
/// assert_eq!(result[1].position_increment, 2);
/// ```
#[derive(Clone, Debug)]
pub struct PartOfSpeechStopFilter {
    stop_tags: Arc<PosTagSet>,
}

impl PartOfSpeechStopFilter {
    /// Create a filter with the given stop tags.
    pub fn new(stop_tags: PosTagSet) -> Self {
        PartOfSpeechStopFilter {
            stop_tags: Arc::new(stop_tags),
        }
    }

    /// Create a filter with the default Japanese stop tags.
    pub fn japanese() -> Self {
        Self::new(PosTagSet::new(DEFAULT_STOP_TAGS.iter().copied()))
    }

    /// Get the stop tags.
    pub fn stop_tags(&self) -> &PosTagSet {
        &self.stop_tags
    }
}

impl Default for PartOfSpeechStopFilter {
    fn default() -> Self {
        Self::japanese()
    }
}

impl Filter for PartOfSpeechStopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_tags = self.stop_tags.clone();
        let mut skipped = 0;
        let kept: Vec<Token> = tokens
            .filter_map(|mut token| {
                if stop_tags.matches(&token) {
                    skipped += token.position_increment;
                    return None;
                }
                token.position_increment += skipped;
                skipped = 0;
                Some(token)
            })
            .collect();

        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "pos_stop"
    }
}
