//! Part-of-speech concatenation filter.
//!
//! Merges every maximal run of consecutive tokens whose part-of-speech tag is
//! in a configured set into one token. This keeps compounds the analyzer
//! splits apart, such as `詳細` + `設計`, searchable as a single term.
//!
//! # Examples
//!
//! ```
//! use yomi::analysis::token::Token;
//! use yomi::analysis::token_filter::Filter;
//! use yomi::analysis::token_filter::pos_concat::{PosConcatFilter, PosTagSet};
//!
//! let filter = PosConcatFilter::new(PosTagSet::new(["名詞-形容動詞語幹", "名詞-サ変接続"]));
//! let tokens = vec![
//!     Token::with_offsets("詳細", 0, 0, 6).with_pos_tag("名詞-形容動詞語幹"),
//!     Token::with_offsets("設計", 1, 6, 12).with_pos_tag("名詞-サ変接続"),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "詳細設計");
//! assert_eq!((result[0].start_offset, result[0].end_offset), (0, 12));
//! assert_eq!(result[0].position_length, 2);
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{Result, YomiError};

/// An immutable set of part-of-speech tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PosTagSet {
    tags: HashSet<String>,
}

impl PosTagSet {
    /// Create a tag set from a list of tags.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PosTagSet {
            tags: tags
                .into_iter()
                .map(Into::<String>::into)
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    /// Parse a newline-delimited tag list, skipping blank lines and `#` comments.
    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load a tag list from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            YomiError::configuration(format!(
                "failed to read tag list '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::parse(&content))
    }

    /// Check if a tag is in the set.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Check if a token's tag is in the set. Untagged tokens never are.
    pub fn matches(&self, token: &Token) -> bool {
        token.pos_tag().is_some_and(|tag| self.contains(tag))
    }

    /// Get the number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over the tags in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PosTagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A filter that concatenates runs of tokens sharing a configured tag.
///
/// The merged token takes its text from all constituents in order, its start
/// offset from the first and its end offset from the last. It keeps the first
/// token's position, position increment and tag, unless a merged tag is set
/// with [`with_merged_tag`](Self::with_merged_tag), and spans the sum of the
/// constituents' position lengths.
///
/// Applying the filter twice gives the same stream as applying it once.
#[derive(Clone, Debug, Default)]
pub struct PosConcatFilter {
    tags: Arc<PosTagSet>,
    merged_tag: Option<String>,
}

impl PosConcatFilter {
    /// Create a filter over the given tag set.
    ///
    /// An empty set makes the filter a pass-through.
    pub fn new(tags: PosTagSet) -> Self {
        PosConcatFilter {
            tags: Arc::new(tags),
            merged_tag: None,
        }
    }

    /// Create a filter from a list of tags.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PosTagSet::new(tags))
    }

    /// Tag every merged token with `tag` instead of its first constituent's tag.
    pub fn with_merged_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.merged_tag = Some(tag.into());
        self
    }

    /// Get the configured tag set.
    pub fn tags(&self) -> &PosTagSet {
        &self.tags
    }
}

impl Filter for PosConcatFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        if self.tags.is_empty() {
            return Ok(tokens);
        }

        Ok(Box::new(ConcatIter {
            input: tokens,
            tags: self.tags.clone(),
            merged_tag: self.merged_tag.clone(),
            run: Vec::new(),
            held: None,
        }))
    }

    fn name(&self) -> &'static str {
        "pos_concat"
    }
}

struct ConcatIter {
    input: TokenStream,
    tags: Arc<PosTagSet>,
    merged_tag: Option<String>,
    /// Tokens of the run in progress.
    run: Vec<Token>,
    /// Non-member token read while flushing a run.
    held: Option<Token>,
}

impl ConcatIter {
    fn flush(&mut self) -> Option<Token> {
        if self.run.is_empty() {
            return None;
        }
        let run = std::mem::take(&mut self.run);
        Some(merge(run, self.merged_tag.as_deref()))
    }
}

impl Iterator for ConcatIter {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.held.take() {
            return Some(token);
        }

        loop {
            match self.input.next() {
                Some(token) if self.tags.matches(&token) => self.run.push(token),
                Some(token) => {
                    if self.run.is_empty() {
                        return Some(token);
                    }
                    self.held = Some(token);
                    return self.flush();
                }
                None => return self.flush(),
            }
        }
    }
}

/// Merge a non-empty run into one token.
fn merge(run: Vec<Token>, merged_tag: Option<&str>) -> Token {
    let last = run.len() - 1;
    let mut text = String::new();
    let mut base_form = String::new();
    let mut reading = Some(String::new());
    let mut position_length = 0;

    for (i, token) in run.iter().enumerate() {
        text.push_str(&token.text);
        if i < last {
            base_form.push_str(&token.text);
        }
        reading = match (reading, token.reading.as_deref()) {
            (Some(mut acc), Some(r)) => {
                acc.push_str(r);
                Some(acc)
            }
            _ => None,
        };
        position_length += token.position_length;
    }

    let base_form = run[last].base_form.as_deref().map(|tail| {
        base_form.push_str(tail);
        base_form
    });
    let end_offset = run[last].end_offset;

    let mut iter = run.into_iter();
    let first = iter.next().unwrap_or_else(|| Token::new("", 0));
    Token {
        text,
        end_offset,
        position_length,
        pos_tag: merged_tag.map(str::to_string).or(first.pos_tag),
        base_form,
        reading,
        ..first
    }
}
