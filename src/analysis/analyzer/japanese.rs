//! Japanese search analyzer preset.
//!
//! # Pipeline
//!
//! 1. Reloadable tokenizer (punctuation discarded)
//! 2. Base form filter
//! 3. Part-of-speech stop filter (particles, auxiliary verbs, symbols)
//! 4. Width folding (full-width Latin, half-width katakana)
//! 5. Katakana stem filter
//! 6. Lowercase filter
//!
//! [`JapaneseAnalyzer::from_config`] takes the char filters and tokenizer
//! from an [`AnalysisConfig`] and appends its filters after the preset.
//!
//! # Examples
//!
//! ```
//! use yomi::analysis::analyzer::Analyzer;
//! use yomi::analysis::analyzer::japanese::JapaneseAnalyzer;
//!
//! let analyzer = JapaneseAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("サーバーについて").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "サーバ");
//! ```

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::segmenter::{LexiconSegmenter, Mode, MorphologicalAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::base_form::BaseFormFilter;
use crate::analysis::token_filter::cjk_width::CjkWidthFilter;
use crate::analysis::token_filter::katakana_stem::KatakanaStemFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::pos_stop::PartOfSpeechStopFilter;
use crate::analysis::tokenizer::{Reloadable, ReloadableTokenizer};
use crate::config::AnalysisConfig;
use crate::error::Result;

/// Analyzer tuned for indexing Japanese text.
pub struct JapaneseAnalyzer {
    inner: PipelineAnalyzer,
}

impl JapaneseAnalyzer {
    /// Create an analyzer over the built-in segmenter in search mode, without
    /// a user dictionary.
    pub fn new() -> Self {
        Self::with_tokenizer(ReloadableTokenizer::new(LexiconSegmenter::new(Mode::Search)))
    }

    /// Create an analyzer over the given tokenizer.
    pub fn with_tokenizer<A>(tokenizer: ReloadableTokenizer<A>) -> Self
    where
        A: MorphologicalAnalyzer + 'static,
    {
        JapaneseAnalyzer {
            inner: Self::preset(PipelineAnalyzer::reloadable(tokenizer)),
        }
    }

    /// Create an analyzer from a configuration.
    ///
    /// The configured char filters and tokenizer run first, then the preset
    /// filters, then the configured `filters` and `pos_concat`.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let pipeline = Self::preset(config.tokenizer_pipeline()?);
        Ok(JapaneseAnalyzer {
            inner: config.apply_filters(pipeline)?,
        })
    }

    fn preset(pipeline: PipelineAnalyzer) -> PipelineAnalyzer {
        pipeline
            .add_filter(Arc::new(BaseFormFilter::new()))
            .add_filter(Arc::new(PartOfSpeechStopFilter::japanese()))
            .add_filter(Arc::new(CjkWidthFilter::new()))
            .add_filter(Arc::new(KatakanaStemFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("japanese")
    }

    /// Get the reload handle of the user dictionary.
    pub fn dictionary(&self) -> Option<&Arc<dyn Reloadable>> {
        self.inner.dictionary()
    }

    /// Get the underlying pipeline.
    pub fn pipeline(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Default for JapaneseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for JapaneseAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "japanese"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Debug for JapaneseAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JapaneseAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_japanese_analyzer() {
        let analyzer = JapaneseAnalyzer::new();
        let tokens: Vec<Token> = analyzer
            .analyze("東京でプリンターを買いました。")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["東京", "プリンタ", "買", "い"]);
        assert_eq!(analyzer.name(), "japanese");
    }

    #[test]
    fn test_japanese_analyzer_with_user_dictionary() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "関西国際空港,関西 国際 空港,カンサイ コクサイ クウコウ,名詞-固有名詞").unwrap();
        file.flush().unwrap();

        let tokenizer = ReloadableTokenizer::with_user_dictionary(
            LexiconSegmenter::new(Mode::Search),
            file.path(),
            Duration::from_secs(60),
        )
        .unwrap();
        let analyzer = JapaneseAnalyzer::with_tokenizer(tokenizer);

        let tokens: Vec<Token> = analyzer.analyze("関西国際空港に到着").unwrap().collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["関西", "国際", "空港", "到着"]);
        assert_eq!(tokens[3].position_increment, 2);
        assert!(analyzer.dictionary().is_some());
    }

    #[test]
    fn test_width_and_case_are_folded() {
        let analyzer = JapaneseAnalyzer::new();
        let tokens: Vec<Token> = analyzer.analyze("ＲｕｓｔとRustの本").unwrap().collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["rust", "rust", "本"]);
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 12);
    }

    #[test]
    fn test_half_width_katakana_is_stemmed() {
        let analyzer = JapaneseAnalyzer::new();
        let tokens: Vec<Token> = analyzer.analyze("ｺﾝﾋﾟｭｰﾀｰ").unwrap().collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "コンピュータ");
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("userdict.txt"),
            "関西国際空港,関西 国際 空港,カンサイ コクサイ クウコウ,名詞-固有名詞\n",
        )
        .unwrap();
        let config = AnalysisConfig::from_json(&format!(
            r#"{{
                "config_dir": {:?},
                "char_filters": [ {{ "type": "iteration_mark" }} ],
                "tokenizer": {{ "user_dictionary": "userdict.txt", "mode": "search" }},
                "pos_concat": {{ "tags": ["名詞-固有名詞"] }}
            }}"#,
            dir.path().to_string_lossy()
        ))
        .unwrap();

        let analyzer = JapaneseAnalyzer::from_config(&config).unwrap();
        let tokens: Vec<Token> = analyzer
            .analyze("関西国際空港で佐々木とＡＢＣ")
            .unwrap()
            .collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["関西国際空港", "佐佐", "木", "abc"]);
        assert_eq!(tokens[0].position_length, 3);
        assert!(analyzer.dictionary().is_some());
        assert_eq!(analyzer.pipeline().char_filters().len(), 1);
        assert_eq!(analyzer.pipeline().filters().len(), 6);
    }

    #[test]
    fn test_from_config_propagates_configuration_errors() {
        let config = AnalysisConfig::from_json(
            r#"{"config_dir": "/nonexistent", "tokenizer": {"user_dictionary": "userdict.txt"}}"#,
        )
        .unwrap();
        assert!(JapaneseAnalyzer::from_config(&config).is_err());
    }
}
