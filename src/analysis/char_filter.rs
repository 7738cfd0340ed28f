//! Char filters that rewrite the input text before it reaches the tokenizer.
//!
//! A char filter returns the rewritten text together with the list of
//! [`Transformation`]s it made, so that token offsets computed on the
//! rewritten text can be mapped back to the caller's original text with
//! [`correct_offset`].
//!
//! # Available Filters
//!
//! - [`iteration_mark::IterationMarkCharFilter`] - Expands 々, ゝ, ゞ, ヽ and ヾ
//!
//! # Examples
//!
//! ```
//! use yomi::analysis::char_filter::CharFilter;
//! use yomi::analysis::char_filter::iteration_mark::IterationMarkCharFilter;
//!
//! let filter = IterationMarkCharFilter::default();
//! let (text, transformations) = filter.filter("佐々木");
//! assert_eq!(text, "佐佐木");
//! assert_eq!(transformations.len(), 1);
//! ```

/// A replaced range, given as byte ranges in the text before and after the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(original_start: usize, original_end: usize, new_start: usize, new_end: usize) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }
}

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    ///
    /// Returns the filtered text and the transformations, ordered by position.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// Map a byte offset in filtered text back to the text the filter was given.
///
/// Offsets past a transformation shift by its length difference. Offsets
/// inside one are interpolated over the original range.
pub fn correct_offset(offset: usize, transformations: &[Transformation]) -> usize {
    let mut corrected = offset as isize;
    for t in transformations {
        let original_len = (t.original_end - t.original_start) as isize;
        let new_len = (t.new_end - t.new_start) as isize;
        if offset >= t.new_end {
            corrected += original_len - new_len;
        } else if offset >= t.new_start {
            if new_len == 0 {
                return t.original_start;
            }
            let inside = (offset - t.new_start) as isize;
            return t.original_start + (inside * original_len / new_len) as usize;
        } else {
            break;
        }
    }
    corrected.max(0) as usize
}

pub mod iteration_mark;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_offset_after_shrinking_replacement() {
        // "ab" at 3..5 became "x" at 3..4.
        let transformations = vec![Transformation::new(3, 5, 3, 4)];

        assert_eq!(correct_offset(0, &transformations), 0);
        assert_eq!(correct_offset(3, &transformations), 3);
        assert_eq!(correct_offset(4, &transformations), 5);
        assert_eq!(correct_offset(7, &transformations), 8);
    }

    #[test]
    fn test_correct_offset_accumulates() {
        let transformations = vec![
            Transformation::new(0, 1, 0, 3),
            Transformation::new(4, 5, 6, 9),
        ];

        assert_eq!(correct_offset(3, &transformations), 1);
        assert_eq!(correct_offset(6, &transformations), 4);
        assert_eq!(correct_offset(9, &transformations), 5);
        assert_eq!(correct_offset(12, &transformations), 8);
    }

    #[test]
    fn test_correct_offset_without_transformations() {
        assert_eq!(correct_offset(42, &[]), 42);
    }
}
