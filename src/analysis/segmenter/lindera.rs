use std::borrow::Cow;
use std::path::Path;

use lindera::dictionary::{Dictionary, load_dictionary, load_user_dictionary};
use lindera::mode::{Mode as LinderaMode, Penalty};
use lindera::segmenter::Segmenter;

use super::{Mode, MorphologicalAnalyzer};
use crate::analysis::token::Token;
use crate::error::{Result, YomiError};

/// IPADIC detail columns.
const BASE_FORM_COLUMN: usize = 6;
const READING_COLUMN: usize = 7;
const POS_COLUMNS: usize = 4;

/// Morphological analyzer backed by Lindera.
///
/// The system dictionary is loaded once. Compiling a user dictionary produces
/// a complete [`Segmenter`] bound to it, so a session only ever reads one
/// immutable segmenter.
///
/// # Memory
///
/// [`Segmenter::new`] takes its system dictionary by value, so every compile
/// clones `dictionary`. While a reload is in flight up to four copies are
/// resident: this template, the one inside `base`, the published snapshot and
/// the one being compiled. The superseded snapshot is freed when the last
/// session holding it closes. Size the reload interval with that in mind when
/// the system dictionary is large.
pub struct LinderaSegmenter {
    mode: LinderaMode,
    dictionary: Dictionary,
    base: Segmenter,
}

impl LinderaSegmenter {
    /// Create a new Lindera segmenter.
    pub fn new(mode: Mode, dict_uri: &str) -> Result<Self> {
        let mode = match mode {
            Mode::Normal => LinderaMode::Normal,
            Mode::Search | Mode::Extended => LinderaMode::Decompose(Penalty::default()),
        };
        let dictionary = load_dictionary(dict_uri).map_err(|e| {
            YomiError::configuration(format!("Failed to load dictionary '{}': {}", dict_uri, e))
        })?;
        let base = Segmenter::new(mode.clone(), dictionary.clone(), None);

        Ok(Self {
            mode,
            dictionary,
            base,
        })
    }

    fn pos_tag(details: &[String]) -> Option<String> {
        let parts: Vec<&str> = details
            .iter()
            .take(POS_COLUMNS)
            .map(String::as_str)
            .filter(|d| !d.is_empty() && *d != "*")
            .collect();
        if parts.is_empty() || parts[0] == "UNK" {
            None
        } else {
            Some(parts.join("-"))
        }
    }

    fn column(details: &[String], idx: usize) -> Option<String> {
        details
            .get(idx)
            .filter(|d| !d.is_empty() && d.as_str() != "*")
            .cloned()
    }
}

impl MorphologicalAnalyzer for LinderaSegmenter {
    type Dictionary = Segmenter;

    fn compile(&self, source: &Path) -> Result<Self::Dictionary> {
        let uri = source.to_string_lossy();
        let user_dictionary = load_user_dictionary(&uri, &self.dictionary.metadata).map_err(|e| {
            YomiError::dictionary_source(format!(
                "Failed to load user dictionary '{}': {}",
                source.display(),
                e
            ))
        })?;

        // Full copy of the system dictionary, see the type docs.
        Ok(Segmenter::new(
            self.mode.clone(),
            self.dictionary.clone(),
            Some(user_dictionary),
        ))
    }

    fn segment(&self, text: &str, dictionary: Option<&Segmenter>) -> Result<Vec<Token>> {
        let segmenter = dictionary.unwrap_or(&self.base);
        let mut tokens = Vec::new();

        for mut token in segmenter
            .segment(Cow::Borrowed(text))
            .map_err(|e| YomiError::segmentation(format!("Failed to segment text: {}", e)))?
        {
            let details: Vec<String> = token.details().iter().map(|d| d.to_string()).collect();
            let mut out = Token::with_offsets(
                token.surface.to_string(),
                tokens.len(),
                token.byte_start,
                token.byte_end,
            );
            out.pos_tag = Self::pos_tag(&details);
            out.base_form = Self::column(&details, BASE_FORM_COLUMN);
            out.reading = Self::column(&details, READING_COLUMN);
            tokens.push(out);
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_tag_joins_categories() {
        let details: Vec<String> = ["名詞", "サ変接続", "*", "*", "*", "*", "設計", "セッケイ"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(
            LinderaSegmenter::pos_tag(&details).as_deref(),
            Some("名詞-サ変接続")
        );
        assert_eq!(
            LinderaSegmenter::column(&details, READING_COLUMN).as_deref(),
            Some("セッケイ")
        );
        assert_eq!(LinderaSegmenter::column(&details, 4), None);
    }

    #[test]
    fn test_unknown_has_no_pos_tag() {
        let details = vec!["UNK".to_string()];
        assert_eq!(LinderaSegmenter::pos_tag(&details), None);
    }
}
