//! Tokenizer whose user dictionary can be replaced while it is in use.
//!
//! [`ReloadableTokenizer`] is a stable facade in front of a
//! [`MorphologicalAnalyzer`] and a [`DictionaryStore`]. Every call to
//! [`ReloadableTokenizer::open_session`]:
//!
//! 1. asks the store to check the dictionary source, which only touches the
//!    filesystem once per reload interval,
//! 2. rebuilds and publishes a new dictionary if the source changed,
//! 3. takes a snapshot of the published dictionary,
//! 4. returns a [`SegmentationSession`] bound to that snapshot.
//!
//! A session keeps its snapshot until it is closed or dropped, so a reload
//! never changes the tokens of a stream that is already open. Sessions opened
//! after a reload see the new dictionary.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use yomi::analysis::segmenter::{LexiconSegmenter, Mode};
//! use yomi::analysis::tokenizer::reloadable::ReloadableTokenizer;
//!
//! let tokenizer = ReloadableTokenizer::with_user_dictionary(
//!     LexiconSegmenter::new(Mode::Search),
//!     "config/userdict.txt",
//!     Duration::from_secs(60),
//! )
//! .unwrap();
//!
//! let mut session = tokenizer.open_session("関西国際空港に到着");
//! while let Some(token) = session.next_token().unwrap() {
//!     println!("{} {:?}", token.text, token.pos_tag);
//! }
//! session.close();
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::analysis::segmenter::{MorphologicalAnalyzer, is_punctuation};
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::dictionary::policy::ReloadPolicy;
use crate::dictionary::source::{DictionarySource, FileSource};
use crate::dictionary::store::{DictionarySnapshot, DictionaryStore, DictionaryVersion, ReloadOutcome};
use crate::error::Result;

/// Administrative access to a tokenizer's dictionary, independent of its analyzer type.
pub trait Reloadable: Send + Sync {
    /// Check the dictionary source now, ignoring the reload interval.
    fn reload(&self) -> ReloadOutcome;

    /// Version of the currently published dictionary.
    fn dictionary_version(&self) -> DictionaryVersion;
}

/// Japanese tokenizer that picks up user dictionary changes at runtime.
pub struct ReloadableTokenizer<A: MorphologicalAnalyzer> {
    analyzer: Arc<A>,
    store: DictionaryStore<A::Dictionary>,
    discard_punctuation: bool,
}

impl<A: MorphologicalAnalyzer> ReloadableTokenizer<A> {
    /// Create a tokenizer without a user dictionary.
    pub fn new(analyzer: A) -> Self {
        ReloadableTokenizer {
            analyzer: Arc::new(analyzer),
            store: DictionaryStore::empty(),
            discard_punctuation: true,
        }
    }

    /// Create a tokenizer that watches a user dictionary file.
    pub fn with_user_dictionary<P: Into<PathBuf>>(
        analyzer: A,
        path: P,
        reload_interval: Duration,
    ) -> Result<Self> {
        Self::with_source(analyzer, Box::new(FileSource::new(path)), reload_interval)
    }

    /// Create a tokenizer that watches an arbitrary dictionary source.
    ///
    /// The initial dictionary is compiled here; failing to compile it is a
    /// configuration error.
    pub fn with_source(
        analyzer: A,
        source: Box<dyn DictionarySource>,
        reload_interval: Duration,
    ) -> Result<Self> {
        let store = DictionaryStore::open(source, ReloadPolicy::new(reload_interval), |path| {
            analyzer.compile(path)
        })?;

        Ok(ReloadableTokenizer {
            analyzer: Arc::new(analyzer),
            store,
            discard_punctuation: true,
        })
    }

    /// Set whether tokens made only of punctuation are dropped (default: true).
    pub fn discard_punctuation(mut self, yes: bool) -> Self {
        self.discard_punctuation = yes;
        self
    }

    /// Open a token stream over `text`.
    ///
    /// Never fails because of the dictionary: a source that cannot be
    /// reloaded is logged and the last good dictionary is used.
    pub fn open_session(&self, text: &str) -> SegmentationSession<A> {
        let analyzer = &self.analyzer;
        let outcome = self.store.check(|path| analyzer.compile(path));
        if let ReloadOutcome::Reloaded(version) = &outcome {
            debug!("session opened right after reload to {}", version);
        }

        SegmentationSession {
            analyzer: self.analyzer.clone(),
            snapshot: Some(self.store.snapshot()),
            text: text.to_string(),
            discard_punctuation: self.discard_punctuation,
            state: SessionState::Pending,
        }
    }

    /// Check the dictionary source now, ignoring the reload interval.
    pub fn reload(&self) -> ReloadOutcome {
        let analyzer = &self.analyzer;
        self.store.force_check(|path| analyzer.compile(path))
    }

    /// Version of the currently published dictionary.
    pub fn version(&self) -> DictionaryVersion {
        self.store.version()
    }

    /// Get the dictionary store.
    pub fn store(&self) -> &DictionaryStore<A::Dictionary> {
        &self.store
    }

    /// Get the morphological analyzer.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }
}

impl<A: MorphologicalAnalyzer + 'static> Tokenizer for ReloadableTokenizer<A> {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        self.open_session(text).into_token_stream()
    }

    fn name(&self) -> &'static str {
        "reloadable"
    }
}

impl<A: MorphologicalAnalyzer> Reloadable for ReloadableTokenizer<A> {
    fn reload(&self) -> ReloadOutcome {
        ReloadableTokenizer::reload(self)
    }

    fn dictionary_version(&self) -> DictionaryVersion {
        self.version()
    }
}

impl<A: MorphologicalAnalyzer> fmt::Debug for ReloadableTokenizer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadableTokenizer")
            .field("analyzer", &self.analyzer.name())
            .field("store", &self.store)
            .field("discard_punctuation", &self.discard_punctuation)
            .finish()
    }
}

enum SessionState {
    Pending,
    Streaming(std::vec::IntoIter<Token>),
    Closed,
}

/// One token stream over one input text, bound to one dictionary version.
///
/// The text is segmented on the first call to [`next_token`](Self::next_token),
/// against the snapshot taken when the session was opened. A session cannot be
/// restarted; open a new one to analyze the text again.
pub struct SegmentationSession<A: MorphologicalAnalyzer> {
    analyzer: Arc<A>,
    snapshot: Option<Arc<DictionarySnapshot<A::Dictionary>>>,
    text: String,
    discard_punctuation: bool,
    state: SessionState,
}

impl<A: MorphologicalAnalyzer> SegmentationSession<A> {
    /// Version of the dictionary this session is bound to.
    ///
    /// Returns `None` once the session is closed.
    pub fn version(&self) -> Option<DictionaryVersion> {
        self.snapshot.as_ref().map(|snapshot| snapshot.version())
    }

    /// Whether the session has been closed.
    pub fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Closed)
    }

    /// Produce the next token, or `None` at the end of the stream.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if let SessionState::Pending = self.state {
            let tokens = self.segment()?;
            self.state = SessionState::Streaming(tokens.into_iter());
        }

        match &mut self.state {
            SessionState::Streaming(tokens) => Ok(tokens.next()),
            _ => Ok(None),
        }
    }

    /// Release the dictionary snapshot and any buffered tokens.
    ///
    /// Safe to call more than once. Other sessions and the store are not affected.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
        self.snapshot = None;
        self.text = String::new();
    }

    /// Drain the remaining tokens into a [`TokenStream`].
    pub fn into_token_stream(mut self) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        self.close();
        Ok(Box::new(tokens.into_iter()))
    }

    fn segment(&mut self) -> Result<Vec<Token>> {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return Ok(Vec::new());
        };
        let tokens = match self.analyzer.segment(&self.text, snapshot.dictionary()) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.close();
                return Err(e);
            }
        };

        let discard = self.discard_punctuation;
        Ok(tokens
            .into_iter()
            .filter(|token| !(discard && is_punctuation(&token.text)))
            .enumerate()
            .map(|(position, mut token)| {
                token.position = position;
                token.position_increment = 1;
                token.position_length = 1;
                token
            })
            .collect())
    }
}

impl<A: MorphologicalAnalyzer> Drop for SegmentationSession<A> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<A: MorphologicalAnalyzer> fmt::Debug for SegmentationSession<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentationSession")
            .field("version", &self.version())
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;
    use std::time::SystemTime;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::analysis::segmenter::{LexiconSegmenter, Mode};
    use crate::error::YomiError;

    fn texts(tokens: impl Iterator<Item = Token>) -> Vec<String> {
        tokens.map(|t| t.text).collect()
    }

    fn write_dictionary(file: &NamedTempFile, content: &str, secs: u64) {
        let mut handle = file.reopen().unwrap();
        handle.set_len(0).unwrap();
        handle.write_all(content.as_bytes()).unwrap();
        handle.flush().unwrap();
        handle
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    fn drain<A: MorphologicalAnalyzer>(session: &mut SegmentationSession<A>) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(token) = session.next_token().unwrap() {
            out.push(token.text);
        }
        out
    }

    #[test]
    fn test_plain_segmentation_without_dictionary() {
        let tokenizer = ReloadableTokenizer::new(LexiconSegmenter::new(Mode::Normal));
        let tokens = tokenizer.tokenize("東京の天気。").unwrap();

        assert_eq!(texts(tokens), vec!["東京", "の", "天気"]);
        assert_eq!(tokenizer.version().generation, 0);
        assert!(matches!(tokenizer.reload(), ReloadOutcome::NoSource));
    }

    #[test]
    fn test_keep_punctuation() {
        let tokenizer =
            ReloadableTokenizer::new(LexiconSegmenter::new(Mode::Normal)).discard_punctuation(false);
        let tokens: Vec<Token> = tokenizer.tokenize("東京、大阪。").unwrap().collect();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].text, "、");
        assert_eq!(tokens[3].position, 3);
    }

    #[test]
    fn test_positions_renumbered_after_discard() {
        let tokenizer = ReloadableTokenizer::new(LexiconSegmenter::new(Mode::Normal));
        let tokens: Vec<Token> = tokenizer.tokenize("「東京」と大阪").unwrap().collect();

        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(texts(tokens.into_iter()), vec!["東京", "と", "大阪"]);
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_session_binds_snapshot_at_open() {
        let file = NamedTempFile::new().unwrap();
        write_dictionary(&file, "関西国際空港,関西 国際空港,カンサイ コクサイクウコウ,カスタム名詞\n", 100);

        let tokenizer = ReloadableTokenizer::with_user_dictionary(
            LexiconSegmenter::new(Mode::Normal),
            file.path(),
            Duration::ZERO,
        )
        .unwrap();

        let mut first = tokenizer.open_session("関西国際空港");
        assert_eq!(first.version().unwrap().generation, 0);

        write_dictionary(
            &file,
            "関西国際空港,関西 国際 空港,カンサイ コクサイ クウコウ,カスタム名詞\n",
            200,
        );
        let mut second = tokenizer.open_session("関西国際空港");
        assert_eq!(second.version().unwrap().generation, 1);

        // The first session segments lazily but with the dictionary it was opened with.
        assert_eq!(drain(&mut first), vec!["関西", "国際空港"]);
        assert_eq!(drain(&mut second), vec!["関西", "国際", "空港"]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let tokenizer = ReloadableTokenizer::new(LexiconSegmenter::new(Mode::Normal));
        let mut session = tokenizer.open_session("東京の天気");

        assert_eq!(session.next_token().unwrap().unwrap().text, "東京");
        session.close();
        session.close();

        assert!(session.is_closed());
        assert!(session.version().is_none());
        assert!(session.next_token().unwrap().is_none());

        // Other sessions are unaffected.
        let mut other = tokenizer.open_session("東京の天気");
        assert_eq!(drain(&mut other).len(), 3);
    }

    #[test]
    fn test_stream_is_not_restartable() {
        let tokenizer = ReloadableTokenizer::new(LexiconSegmenter::new(Mode::Normal));
        let mut session = tokenizer.open_session("東京");

        assert_eq!(drain(&mut session), vec!["東京"]);
        assert!(session.next_token().unwrap().is_none());
    }

    #[test]
    fn test_broken_reload_keeps_last_good_dictionary() {
        let file = NamedTempFile::new().unwrap();
        write_dictionary(&file, "詳細設計,詳細 設計,ショウサイ セッケイ,名詞-サ変接続\n", 100);

        let tokenizer = ReloadableTokenizer::with_user_dictionary(
            LexiconSegmenter::new(Mode::Normal),
            file.path(),
            Duration::ZERO,
        )
        .unwrap();

        write_dictionary(&file, "詳細設計,詳細\n", 200);
        let mut session = tokenizer.open_session("詳細設計");

        assert_eq!(session.version().unwrap().generation, 0);
        assert_eq!(drain(&mut session), vec!["詳細", "設計"]);
        assert!(matches!(tokenizer.reload(), ReloadOutcome::Failed(_)));
    }

    #[test]
    fn test_unreadable_initial_dictionary_is_a_configuration_error() {
        let result = ReloadableTokenizer::with_user_dictionary(
            LexiconSegmenter::new(Mode::Normal),
            "/nonexistent/userdict.txt",
            Duration::ZERO,
        );
        assert!(matches!(result, Err(YomiError::Configuration(_))));
    }

    /// Analyzer that fails on a marker input.
    struct FailingSegmenter;

    impl MorphologicalAnalyzer for FailingSegmenter {
        type Dictionary = ();

        fn compile(&self, _source: &Path) -> Result<()> {
            Ok(())
        }

        fn segment(&self, text: &str, _dictionary: Option<&()>) -> Result<Vec<Token>> {
            if text == "boom" {
                Err(YomiError::segmentation("resource exhausted"))
            } else {
                Ok(vec![Token::with_offsets(text, 0, 0, text.len())])
            }
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_segmentation_error_is_local_to_the_session() {
        let tokenizer = ReloadableTokenizer::new(FailingSegmenter);

        let mut failing = tokenizer.open_session("boom");
        assert!(matches!(
            failing.next_token(),
            Err(YomiError::Segmentation(_))
        ));
        assert!(failing.is_closed());

        let tokens: Vec<Token> = tokenizer.tokenize("fine").unwrap().collect();
        assert_eq!(tokens.len(), 1);
    }
}
