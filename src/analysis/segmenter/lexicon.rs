//! Built-in lexicon segmenter.
//!
//! Segments text by longest match against the user dictionary, a small table
//! of function words, and character-class runs for everything else. It needs
//! no system dictionary, which makes it the default analyzer for tests and for
//! deployments where user dictionary entries carry the vocabulary that matters.

use std::path::Path;

use super::{CharClass, Mode, MorphologicalAnalyzer, hiragana_to_katakana};
use crate::analysis::token::Token;
use crate::dictionary::user::UserDictionary;
use crate::error::Result;

/// (surface, tag, base form, reading)
type FunctionWord = (&'static str, &'static str, &'static str, &'static str);

/// Function words recognized inside hiragana runs.
const FUNCTION_WORDS: &[FunctionWord] = &[
    ("について", "助詞-格助詞-連語", "について", "ニツイテ"),
    ("として", "助詞-格助詞-連語", "として", "トシテ"),
    ("ました", "助動詞", "ます", "マシタ"),
    ("でした", "助動詞", "です", "デシタ"),
    ("から", "助詞-格助詞-一般", "から", "カラ"),
    ("まで", "助詞-副助詞", "まで", "マデ"),
    ("より", "助詞-格助詞-一般", "より", "ヨリ"),
    ("です", "助動詞", "です", "デス"),
    ("ます", "助動詞", "ます", "マス"),
    ("は", "助詞-係助詞", "は", "ハ"),
    ("が", "助詞-格助詞-一般", "が", "ガ"),
    ("を", "助詞-格助詞-一般", "を", "ヲ"),
    ("に", "助詞-格助詞-一般", "に", "ニ"),
    ("の", "助詞-連体化", "の", "ノ"),
    ("で", "助詞-格助詞-一般", "で", "デ"),
    ("と", "助詞-格助詞-一般", "と", "ト"),
    ("も", "助詞-係助詞", "も", "モ"),
    ("へ", "助詞-格助詞-一般", "へ", "ヘ"),
    ("や", "助詞-並立助詞", "や", "ヤ"),
];

/// Unknown kanji runs longer than this are decomposed in search mode.
const SEARCH_KANJI_LENGTH: usize = 2;

/// Segmenter backed by the user dictionary and character classes.
///
/// # Examples
///
/// ```
/// use yomi::analysis::segmenter::{LexiconSegmenter, Mode, MorphologicalAnalyzer};
/// use yomi::dictionary::user::UserDictionary;
///
/// let segmenter = LexiconSegmenter::new(Mode::Normal);
/// let dictionary =
///     UserDictionary::parse("詳細設計,詳細 設計,ショウサイ セッケイ,名詞-サ変接続").unwrap();
///
/// let tokens = segmenter.segment("詳細設計を行う", Some(&dictionary)).unwrap();
/// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, vec!["詳細", "設計", "を", "行", "う"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LexiconSegmenter {
    mode: Mode,
}

impl LexiconSegmenter {
    /// Create a new segmenter in the given mode.
    pub fn new(mode: Mode) -> Self {
        LexiconSegmenter { mode }
    }

    /// Get the segmentation mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn function_word(text: &str) -> Option<&'static FunctionWord> {
        FUNCTION_WORDS
            .iter()
            .filter(|(surface, ..)| text.starts_with(surface))
            .max_by_key(|(surface, ..)| surface.len())
    }

    /// Byte length of the unknown run of `class` starting at the beginning of `text`.
    fn run_length(text: &str, class: CharClass, dictionary: Option<&UserDictionary>) -> usize {
        let mut end = 0;
        for (i, c) in text.char_indices() {
            if CharClass::of(c) != class {
                break;
            }
            if i > 0 {
                let rest = &text[i..];
                if dictionary.is_some_and(|d| d.longest_match(rest).is_some()) {
                    break;
                }
                if class == CharClass::Hiragana && Self::function_word(rest).is_some() {
                    break;
                }
            }
            end = i + c.len_utf8();
        }
        end
    }

    /// Split an unknown run into token byte ranges according to the mode.
    fn split_unknown(&self, run: &str, class: CharClass) -> Vec<(usize, usize)> {
        let bounds: Vec<usize> = run
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(run.len()))
            .collect();
        let chars = bounds.len() - 1;

        let chunk = match (self.mode, class) {
            (Mode::Extended, CharClass::Katakana) => 1,
            (Mode::Search | Mode::Extended, CharClass::Kanji) if chars > SEARCH_KANJI_LENGTH => {
                SEARCH_KANJI_LENGTH
            }
            _ => chars,
        };

        bounds
            .iter()
            .step_by(chunk)
            .zip(bounds.iter().skip(chunk).step_by(chunk).chain(std::iter::once(&run.len())))
            .map(|(&start, &end)| (start, end))
            .filter(|(start, end)| start < end)
            .collect()
    }

    fn unknown_tag(class: CharClass) -> &'static str {
        match class {
            CharClass::Digit => "名詞-数",
            CharClass::Alpha => "名詞-固有名詞-組織",
            CharClass::Punctuation => "記号-一般",
            _ => "名詞-一般",
        }
    }

    fn symbol_tag(c: char) -> &'static str {
        match c {
            '。' | '.' | '．' => "記号-句点",
            '、' | ',' | '，' => "記号-読点",
            '「' | '『' | '(' | '（' | '[' | '［' => "記号-括弧開",
            '」' | '』' | ')' | '）' | ']' | '］' => "記号-括弧閉",
            _ => "記号-一般",
        }
    }
}

impl MorphologicalAnalyzer for LexiconSegmenter {
    type Dictionary = UserDictionary;

    fn compile(&self, source: &Path) -> Result<Self::Dictionary> {
        UserDictionary::from_path(source)
    }

    fn segment(&self, text: &str, dictionary: Option<&UserDictionary>) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < text.len() {
            let rest = &text[offset..];
            let Some(c) = rest.chars().next() else {
                break;
            };
            let class = CharClass::of(c);

            if class == CharClass::Whitespace {
                offset += c.len_utf8();
                continue;
            }

            if let Some(entry) = dictionary.and_then(|d| d.longest_match(rest)) {
                let mut start = offset;
                for segment in &entry.segments {
                    let end = start + segment.surface.len();
                    tokens.push(
                        Token::with_offsets(segment.surface.as_str(), tokens.len(), start, end)
                            .with_pos_tag(entry.pos_tag.as_str())
                            .with_reading(segment.reading.as_str()),
                    );
                    start = end;
                }
                offset += entry.surface.len();
                continue;
            }

            if class == CharClass::Hiragana {
                if let Some((surface, tag, base_form, reading)) = Self::function_word(rest) {
                    tokens.push(
                        Token::with_offsets(*surface, tokens.len(), offset, offset + surface.len())
                            .with_pos_tag(*tag)
                            .with_base_form(*base_form)
                            .with_reading(*reading),
                    );
                    offset += surface.len();
                    continue;
                }
            }

            if class == CharClass::Punctuation {
                let end = offset + c.len_utf8();
                tokens.push(
                    Token::with_offsets(&text[offset..end], tokens.len(), offset, end)
                        .with_pos_tag(Self::symbol_tag(c)),
                );
                offset = end;
                continue;
            }

            let run = &rest[..Self::run_length(rest, class, dictionary)];
            for (start, end) in self.split_unknown(run, class) {
                let surface = &run[start..end];
                let mut token =
                    Token::with_offsets(surface, tokens.len(), offset + start, offset + end)
                        .with_pos_tag(Self::unknown_tag(class));
                match class {
                    CharClass::Katakana => token = token.with_reading(surface),
                    CharClass::Hiragana => token = token.with_reading(hiragana_to_katakana(surface)),
                    _ => {}
                }
                tokens.push(token);
            }
            offset += run.len();
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_segment_without_dictionary() {
        let segmenter = LexiconSegmenter::new(Mode::Normal);
        let tokens = segmenter.segment("東京都の天気は晴れ。", None).unwrap();

        assert_eq!(texts(&tokens), vec!["東京都", "の", "天気", "は", "晴", "れ", "。"]);
        assert_eq!(tokens[1].pos_tag(), Some("助詞-連体化"));
        assert_eq!(tokens[6].pos_tag(), Some("記号-句点"));
    }

    #[test]
    fn test_offsets_are_byte_offsets() {
        let segmenter = LexiconSegmenter::new(Mode::Normal);
        let text = "Rust で 検索";
        let tokens = segmenter.segment(text, None).unwrap();

        assert_eq!(texts(&tokens), vec!["Rust", "で", "検索"]);
        for token in &tokens {
            assert!(token.start_offset <= token.end_offset);
            assert_eq!(&text[token.start_offset..token.end_offset], token.text);
        }
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_user_dictionary_entry_is_split_into_segments() {
        let segmenter = LexiconSegmenter::new(Mode::Normal);
        let dictionary = UserDictionary::parse(
            "関西国際空港,関西 国際 空港,カンサイ コクサイ クウコウ,カスタム名詞",
        )
        .unwrap();

        let tokens = segmenter.segment("関西国際空港へ", Some(&dictionary)).unwrap();

        assert_eq!(texts(&tokens), vec!["関西", "国際", "空港", "へ"]);
        assert_eq!(tokens[0].pos_tag(), Some("カスタム名詞"));
        assert_eq!(tokens[2].reading.as_deref(), Some("クウコウ"));
        assert_eq!(tokens[1].start_offset, 6);
        assert_eq!(tokens[1].end_offset, 12);
    }

    #[test]
    fn test_unknown_run_stops_before_dictionary_word() {
        let segmenter = LexiconSegmenter::new(Mode::Normal);
        let dictionary = UserDictionary::parse("空港,空港,クウコウ,カスタム名詞").unwrap();

        let tokens = segmenter.segment("新空港", Some(&dictionary)).unwrap();

        assert_eq!(texts(&tokens), vec!["新", "空港"]);
    }

    #[test]
    fn test_search_mode_decomposes_long_kanji_runs() {
        let segmenter = LexiconSegmenter::new(Mode::Search);
        let tokens = segmenter.segment("形態素解析", None).unwrap();

        assert_eq!(texts(&tokens), vec!["形態", "素解", "析"]);
    }

    #[test]
    fn test_extended_mode_unigrams_katakana() {
        let normal = LexiconSegmenter::new(Mode::Normal);
        assert_eq!(texts(&normal.segment("ラーメン", None).unwrap()), vec!["ラーメン"]);

        let extended = LexiconSegmenter::new(Mode::Extended);
        let tokens = extended.segment("ラーメン", None).unwrap();
        assert_eq!(texts(&tokens), vec!["ラ", "ー", "メ", "ン"]);
    }

    #[test]
    fn test_readings() {
        let segmenter = LexiconSegmenter::new(Mode::Normal);
        let tokens = segmenter.segment("りんごとカレー", None).unwrap();

        assert_eq!(texts(&tokens), vec!["りんご", "と", "カレー"]);
        assert_eq!(tokens[0].reading.as_deref(), Some("リンゴ"));
        assert_eq!(tokens[2].reading.as_deref(), Some("カレー"));
    }

    #[test]
    fn test_function_word_base_form() {
        let segmenter = LexiconSegmenter::new(Mode::Normal);
        let tokens = segmenter.segment("行きました", None).unwrap();

        assert_eq!(texts(&tokens), vec!["行", "き", "ました"]);
        assert_eq!(tokens[2].base_form.as_deref(), Some("ます"));
    }

    #[test]
    fn test_segmenter_name() {
        assert_eq!(LexiconSegmenter::default().name(), "lexicon");
    }
}
