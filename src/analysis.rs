//! Text analysis for Japanese search indexing.
//!
//! This module provides segmentation with a hot-reloadable user dictionary,
//! char filters, token filters and analysis pipelines.

pub mod analyzer;
pub mod char_filter;
pub mod segmenter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
