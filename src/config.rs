//! Analysis pipeline configuration.
//!
//! An [`AnalysisConfig`] is read from JSON and describes the char filters,
//! one tokenizer and an ordered filter chain:
//!
//! ```json
//! {
//!   "char_filters": [
//!     { "type": "iteration_mark" }
//!   ],
//!   "tokenizer": {
//!     "user_dictionary": "userdict_ja.txt",
//!     "reload_interval": "1m",
//!     "mode": "search",
//!     "discard_punctuation": true
//!   },
//!   "filters": [
//!     { "type": "base_form" },
//!     { "type": "cjk_width" },
//!     { "type": "katakana_stem", "minimum_length": 4 },
//!     { "type": "lowercase" }
//!   ],
//!   "pos_concat": {
//!     "tags_path": "concat_tags.txt"
//!   }
//! }
//! ```
//!
//! Relative paths are resolved against the configuration directory, which
//! defaults to the directory of the configuration file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::iteration_mark::IterationMarkCharFilter;
use crate::analysis::segmenter::{LexiconSegmenter, Mode, MorphologicalAnalyzer};
use crate::analysis::token_filter::base_form::BaseFormFilter;
use crate::analysis::token_filter::cjk_width::CjkWidthFilter;
use crate::analysis::token_filter::katakana_stem::{
    DEFAULT_MINIMUM_LENGTH, KatakanaStemFilter, SMALLEST_MINIMUM_LENGTH,
};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::pos_concat::{PosConcatFilter, PosTagSet};
use crate::analysis::token_filter::pos_stop::PartOfSpeechStopFilter;
use crate::analysis::token_filter::reading_form::ReadingFormFilter;
use crate::analysis::tokenizer::ReloadableTokenizer;
use crate::dictionary::policy::DEFAULT_RELOAD_INTERVAL;
use crate::error::{Result, YomiError};

/// Which morphological analyzer backs the tokenizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// Built-in lexicon segmenter.
    #[default]
    Lexicon,
    /// Lindera with a system dictionary (requires the `lindera` feature).
    Lindera,
}

/// Tokenizer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Morphological analyzer.
    #[serde(default)]
    pub analyzer: AnalyzerKind,

    /// System dictionary URI, required by the Lindera analyzer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<String>,

    /// User dictionary file watched for changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_dictionary: Option<PathBuf>,

    /// Minimum interval between two checks of the user dictionary.
    #[serde(
        default = "default_reload_interval",
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub reload_interval: Duration,

    /// Segmentation mode.
    #[serde(default)]
    pub mode: Mode,

    /// Drop tokens made only of punctuation.
    #[serde(default = "default_true")]
    pub discard_punctuation: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            analyzer: AnalyzerKind::default(),
            dictionary: None,
            user_dictionary: None,
            reload_interval: DEFAULT_RELOAD_INTERVAL,
            mode: Mode::default(),
            discard_punctuation: true,
        }
    }
}

/// Part-of-speech tag list given inline or as a side file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagListConfig {
    /// Inline tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Newline-delimited tag file. Wins over `tags` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_path: Option<PathBuf>,
}

impl TagListConfig {
    /// Load the tag set, resolving `tags_path` against `base_dir`.
    ///
    /// Neither option set gives an empty set.
    pub fn load_tags(&self, base_dir: &Path) -> Result<PosTagSet> {
        match (&self.tags_path, &self.tags) {
            (Some(path), tags) => {
                if tags.is_some() {
                    warn!(path = %path.display(), "both tags and tags_path are set, using tags_path");
                }
                PosTagSet::from_path(resolve_path(base_dir, path))
            }
            (None, Some(tags)) => Ok(PosTagSet::new(tags.iter().map(String::as_str))),
            (None, None) => Ok(PosTagSet::default()),
        }
    }
}

/// Part-of-speech concatenation configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosConcatConfig {
    /// Tags whose runs are concatenated.
    #[serde(flatten)]
    pub tags: TagListConfig,

    /// Tag given to merged tokens instead of their first constituent's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_tag: Option<String>,
}

impl PosConcatConfig {
    /// Build the filter.
    pub fn build(&self, base_dir: &Path) -> Result<PosConcatFilter> {
        let tags = self.tags.load_tags(base_dir)?;
        if tags.is_empty() {
            debug!("no concatenation tags configured, pos_concat passes tokens through");
        }
        let filter = PosConcatFilter::new(tags);
        Ok(match &self.merged_tag {
            Some(tag) => filter.with_merged_tag(tag.as_str()),
            None => filter,
        })
    }
}

/// One char filter, run on the text before tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CharFilterConfig {
    /// [`IterationMarkCharFilter`].
    IterationMark {
        #[serde(default = "default_true")]
        normalize_kanji: bool,
        #[serde(default = "default_true")]
        normalize_kana: bool,
    },
}

/// One entry of the filter chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    /// [`BaseFormFilter`].
    BaseForm,
    /// [`ReadingFormFilter`].
    ReadingForm {
        #[serde(default)]
        hiragana: bool,
        /// Romanize the reading; takes precedence over `hiragana`.
        #[serde(default)]
        romaji: bool,
    },
    /// [`PartOfSpeechStopFilter`]; the default Japanese stop tags when no
    /// tags are given.
    PosStop(TagListConfig),
    /// [`CjkWidthFilter`].
    CjkWidth,
    /// [`LowercaseFilter`].
    Lowercase,
    /// [`KatakanaStemFilter`]. `minimum_length` must be at least 2.
    KatakanaStem {
        #[serde(default = "default_minimum_length")]
        minimum_length: usize,
    },
    /// [`PosConcatFilter`].
    PosConcat(PosConcatConfig),
}

/// Complete analysis configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Directory that relative paths are resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<PathBuf>,

    /// Char filters applied in order before the tokenizer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub char_filters: Vec<CharFilterConfig>,

    /// Tokenizer settings.
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// Filters applied in order after the tokenizer.
    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    /// Concatenation applied after all other filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_concat: Option<PosConcatConfig>,
}

impl AnalysisConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| YomiError::configuration(format!("invalid analysis configuration: {e}")))
    }

    /// Read a configuration file. `config_dir` defaults to the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            YomiError::configuration(format!(
                "failed to read configuration '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut config = Self::from_json(&content)?;
        if config.config_dir.is_none() {
            config.config_dir = path.parent().map(Path::to_path_buf);
        }
        Ok(config)
    }

    /// Directory that relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.config_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Resolve a configured path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_path(self.base_dir(), path)
    }

    /// Build the configured pipeline.
    pub fn build(&self) -> Result<PipelineAnalyzer> {
        self.apply_filters(self.tokenizer_pipeline()?)
    }

    /// Build the configured pipeline over the given analyzer.
    pub fn build_with<A>(&self, analyzer: A) -> Result<PipelineAnalyzer>
    where
        A: MorphologicalAnalyzer + 'static,
    {
        self.apply_filters(self.tokenizer_pipeline_with(analyzer)?)
    }

    /// Build a pipeline holding only the char filters and the tokenizer.
    pub fn tokenizer_pipeline(&self) -> Result<PipelineAnalyzer> {
        let mode = self.tokenizer.mode;
        match self.tokenizer.analyzer {
            AnalyzerKind::Lexicon => self.tokenizer_pipeline_with(LexiconSegmenter::new(mode)),
            #[cfg(feature = "lindera")]
            AnalyzerKind::Lindera => {
                let uri = self.tokenizer.dictionary.as_deref().ok_or_else(|| {
                    YomiError::configuration("the lindera analyzer requires `dictionary`")
                })?;
                self.tokenizer_pipeline_with(crate::analysis::segmenter::LinderaSegmenter::new(
                    mode, uri,
                )?)
            }
            #[cfg(not(feature = "lindera"))]
            AnalyzerKind::Lindera => Err(YomiError::configuration(
                "the lindera analyzer requires building with the `lindera` feature",
            )),
        }
    }

    /// Build a pipeline holding only the char filters and a tokenizer over
    /// the given analyzer.
    pub fn tokenizer_pipeline_with<A>(&self, analyzer: A) -> Result<PipelineAnalyzer>
    where
        A: MorphologicalAnalyzer + 'static,
    {
        let tokenizer = match &self.tokenizer.user_dictionary {
            Some(path) => ReloadableTokenizer::with_user_dictionary(
                analyzer,
                self.resolve(path),
                self.tokenizer.reload_interval,
            )?,
            None => ReloadableTokenizer::new(analyzer),
        }
        .discard_punctuation(self.tokenizer.discard_punctuation);

        let mut pipeline = PipelineAnalyzer::reloadable(tokenizer);
        for char_filter in &self.char_filters {
            pipeline = match char_filter {
                CharFilterConfig::IterationMark {
                    normalize_kanji,
                    normalize_kana,
                } => pipeline.add_char_filter(Arc::new(IterationMarkCharFilter::new(
                    *normalize_kanji,
                    *normalize_kana,
                ))),
            };
        }
        Ok(pipeline)
    }

    /// Append the configured filters, then `pos_concat`, to a pipeline.
    pub fn apply_filters(&self, mut pipeline: PipelineAnalyzer) -> Result<PipelineAnalyzer> {
        for filter in &self.filters {
            pipeline = match filter {
                FilterConfig::BaseForm => pipeline.add_filter(Arc::new(BaseFormFilter::new())),
                FilterConfig::ReadingForm { hiragana, romaji } => pipeline.add_filter(Arc::new(
                    ReadingFormFilter::new().hiragana(*hiragana).romaji(*romaji),
                )),
                FilterConfig::PosStop(tags) => {
                    let stop = if tags.tags.is_none() && tags.tags_path.is_none() {
                        PartOfSpeechStopFilter::japanese()
                    } else {
                        PartOfSpeechStopFilter::new(tags.load_tags(self.base_dir())?)
                    };
                    pipeline.add_filter(Arc::new(stop))
                }
                FilterConfig::CjkWidth => pipeline.add_filter(Arc::new(CjkWidthFilter::new())),
                FilterConfig::Lowercase => pipeline.add_filter(Arc::new(LowercaseFilter::new())),
                FilterConfig::KatakanaStem { minimum_length } => {
                    if *minimum_length < SMALLEST_MINIMUM_LENGTH {
                        return Err(YomiError::configuration(format!(
                            "katakana_stem minimum_length must be at least \
                             {SMALLEST_MINIMUM_LENGTH}, got {minimum_length}"
                        )));
                    }
                    pipeline
                        .add_filter(Arc::new(KatakanaStemFilter::with_minimum_length(*minimum_length)))
                }
                FilterConfig::PosConcat(concat) => {
                    pipeline.add_filter(Arc::new(concat.build(self.base_dir())?))
                }
            };
        }
        if let Some(concat) = &self.pos_concat {
            pipeline = pipeline.add_filter(Arc::new(concat.build(self.base_dir())?));
        }

        Ok(pipeline)
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Parse a duration such as `500ms`, `30s`, `1m`, `2h`, `1d`, or a bare
/// number of milliseconds.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let text = text.trim();
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let value: u64 = number
        .parse()
        .map_err(|_| YomiError::configuration(format!("invalid duration '{text}'")))?;

    let millis = match unit.trim() {
        "" | "ms" => Some(value),
        "s" => value.checked_mul(1_000),
        "m" => value.checked_mul(60_000),
        "h" => value.checked_mul(3_600_000),
        "d" => value.checked_mul(86_400_000),
        other => {
            return Err(YomiError::configuration(format!(
                "invalid duration unit '{other}' in '{text}', expected ms, s, m, h or d"
            )));
        }
    };
    millis
        .map(Duration::from_millis)
        .ok_or_else(|| YomiError::configuration(format!("duration '{text}' is too large")))
}

fn default_reload_interval() -> Duration {
    DEFAULT_RELOAD_INTERVAL
}

fn default_true() -> bool {
    true
}

fn default_minimum_length() -> usize {
    DEFAULT_MINIMUM_LENGTH
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DurationValue {
    Millis(u64),
    Text(String),
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    match DurationValue::deserialize(deserializer)? {
        DurationValue::Millis(ms) => Ok(Duration::from_millis(ms)),
        DurationValue::Text(text) => parse_duration(&text).map_err(serde::de::Error::custom),
    }
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{}ms", duration.as_millis()))
}
