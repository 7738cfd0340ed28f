//! Pipeline analyzer that combines char filters, a tokenizer and token filters.
//!
//! Char filters rewrite the text before tokenization and token offsets are
//! mapped back to the caller's text afterwards. Filters are applied in the
//! order they were added. A pipeline may carry a
//! handle to the tokenizer's dictionary so that an application can reload or
//! inspect it without knowing the tokenizer's analyzer type.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::{CharFilter, Transformation, correct_offset};
use crate::analysis::segmenter::MorphologicalAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::{Reloadable, ReloadableTokenizer, Tokenizer};
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    dictionary: Option<Arc<dyn Reloadable>>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            dictionary: None,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Create a pipeline over a reloadable tokenizer, keeping its reload handle.
    pub fn reloadable<A>(tokenizer: ReloadableTokenizer<A>) -> Self
    where
        A: MorphologicalAnalyzer + 'static,
    {
        let tokenizer = Arc::new(tokenizer);
        let mut pipeline = Self::new(tokenizer.clone());
        pipeline.dictionary = Some(tokenizer);
        pipeline
    }

    /// Add a char filter, run on the text before tokenization.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the custom name of this analyzer.
    pub fn pipeline_name(&self) -> &str {
        &self.name
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the reload handle of the tokenizer's dictionary, if it has one.
    pub fn dictionary(&self) -> Option<&Arc<dyn Reloadable>> {
        self.dictionary.as_ref()
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        if self.char_filters.is_empty() {
            return self.apply_filters(self.tokenizer.tokenize(text)?);
        }

        let mut filtered_text = text.to_string();
        let mut steps: Vec<Vec<Transformation>> = Vec::with_capacity(self.char_filters.len());
        for char_filter in &self.char_filters {
            let (next, transformations) = char_filter.filter(&filtered_text);
            filtered_text = next;
            steps.push(transformations);
        }

        let tokens = self.apply_filters(self.tokenizer.tokenize(&filtered_text)?)?;
        if steps.iter().all(Vec::is_empty) {
            return Ok(tokens);
        }

        // Undo the char filters last to first.
        Ok(Box::new(tokens.map(move |mut token| {
            for transformations in steps.iter().rev() {
                token.start_offset = correct_offset(token.start_offset, transformations);
                token.end_offset = correct_offset(token.end_offset, transformations);
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl PipelineAnalyzer {
    fn apply_filters(&self, mut tokens: TokenStream) -> Result<TokenStream> {
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field(
                "char_filters",
                &self.char_filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
