//! Reading form filter implementation.
//!
//! Replaces token text with its reading, which lets queries written in kana
//! match text written in kanji. Readings can also be romanized in Hepburn,
//! so that `東京` indexes as `tokyo`.

use crate::analysis::segmenter::{hiragana_to_katakana, katakana_to_hiragana};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that rewrites token text to the token's katakana reading.
///
/// # Examples
///
/// ```
/// use yomi::analysis::token::Token;
/// use yomi::analysis::token_filter::Filter;
/// use yomi::analysis::token_filter::reading_form::ReadingFormFilter;
///
/// let filter = ReadingFormFilter::new().hiragana(true);
/// let tokens = vec![Token::new("設計", 0).with_reading("セッケイ")];
///
/// let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
/// assert_eq!(result[0].text, "せっけい");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReadingFormFilter {
    hiragana: bool,
    romaji: bool,
}

impl ReadingFormFilter {
    /// Create a filter emitting katakana readings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit readings in hiragana instead of katakana.
    pub fn hiragana(mut self, yes: bool) -> Self {
        self.hiragana = yes;
        self
    }

    /// Emit readings romanized in Hepburn. Takes precedence over
    /// [`hiragana`](Self::hiragana).
    pub fn romaji(mut self, yes: bool) -> Self {
        self.romaji = yes;
        self
    }
}

impl Filter for ReadingFormFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let (hiragana, romaji) = (self.hiragana, self.romaji);
        Ok(Box::new(tokens.map(move |mut token| {
            if let Some(reading) = token.reading.as_deref().filter(|r| !r.is_empty()) {
                token.text = if romaji {
                    to_romaji(reading)
                } else if hiragana {
                    katakana_to_hiragana(reading)
                } else {
                    reading.to_string()
                };
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "reading_form"
    }
}

fn syllable(c: char) -> Option<&'static str> {
    let romaji = match c {
        'ア' | 'ァ' => "a",
        'イ' | 'ィ' | 'ヰ' => "i",
        'ウ' | 'ゥ' => "u",
        'エ' | 'ェ' | 'ヱ' => "e",
        'オ' | 'ォ' | 'ヲ' => "o",
        'カ' | 'ヵ' => "ka",
        'キ' => "ki",
        'ク' => "ku",
        'ケ' | 'ヶ' => "ke",
        'コ' => "ko",
        'ガ' => "ga",
        'ギ' => "gi",
        'グ' => "gu",
        'ゲ' => "ge",
        'ゴ' => "go",
        'サ' => "sa",
        'シ' => "shi",
        'ス' => "su",
        'セ' => "se",
        'ソ' => "so",
        'ザ' => "za",
        'ジ' | 'ヂ' => "ji",
        'ズ' | 'ヅ' => "zu",
        'ゼ' => "ze",
        'ゾ' => "zo",
        'タ' => "ta",
        'チ' => "chi",
        'ツ' => "tsu",
        'テ' => "te",
        'ト' => "to",
        'ダ' => "da",
        'デ' => "de",
        'ド' => "do",
        'ナ' => "na",
        'ニ' => "ni",
        'ヌ' => "nu",
        'ネ' => "ne",
        'ノ' => "no",
        'ハ' => "ha",
        'ヒ' => "hi",
        'フ' => "fu",
        'ヘ' => "he",
        'ホ' => "ho",
        'バ' => "ba",
        'ビ' => "bi",
        'ブ' => "bu",
        'ベ' => "be",
        'ボ' => "bo",
        'パ' => "pa",
        'ピ' => "pi",
        'プ' => "pu",
        'ペ' => "pe",
        'ポ' => "po",
        'マ' => "ma",
        'ミ' => "mi",
        'ム' => "mu",
        'メ' => "me",
        'モ' => "mo",
        'ヤ' | 'ャ' => "ya",
        'ユ' | 'ュ' => "yu",
        'ヨ' | 'ョ' => "yo",
        'ラ' => "ra",
        'リ' => "ri",
        'ル' => "ru",
        'レ' => "re",
        'ロ' => "ro",
        'ワ' | 'ヮ' => "wa",
        'ン' => "n",
        'ヴ' => "vu",
        _ => return None,
    };
    Some(romaji)
}

fn is_small_y(c: char) -> bool {
    matches!(c, 'ャ' | 'ュ' | 'ョ')
}

fn is_small_vowel(c: char) -> bool {
    matches!(c, 'ァ' | 'ィ' | 'ゥ' | 'ェ' | 'ォ')
}

/// Romanize a kana reading in Hepburn.
///
/// Contracted sounds combine (`キョ` to `kyo`, `シュ` to `shu`, `ファ` to
/// `fa`), `ッ` doubles the next consonant and `ー` repeats the previous
/// vowel. Characters that are not kana pass through.
pub fn to_romaji(reading: &str) -> String {
    let katakana = hiragana_to_katakana(reading);
    let chars: Vec<char> = katakana.chars().collect();
    let mut romaji = String::with_capacity(chars.len() * 2);
    let mut geminate = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;

        if c == 'ッ' {
            geminate = true;
            continue;
        }
        if c == 'ー' {
            if let Some(vowel) = romaji.chars().rev().find(|v| "aiueo".contains(*v)) {
                romaji.push(vowel);
            }
            continue;
        }
        let Some(base) = syllable(c) else {
            geminate = false;
            romaji.push(c);
            continue;
        };

        let mut unit = base.to_string();
        if let Some(&next) = chars.get(i) {
            let small = syllable(next).unwrap_or_default();
            if is_small_y(next) && base.len() > 1 {
                unit.pop();
                if !matches!(base, "shi" | "chi" | "ji") {
                    unit.push('y');
                }
                unit.push_str(&small[1..]);
                i += 1;
            } else if is_small_vowel(next) && base.len() > 1 {
                unit.pop();
                unit.push_str(small);
                i += 1;
            } else if is_small_vowel(next) && base == "u" {
                unit = format!("w{small}");
                i += 1;
            }
        }

        if geminate {
            geminate = false;
            if unit.starts_with("ch") {
                romaji.push('t');
            } else if let Some(first) = unit.chars().next().filter(|f| !"aiueon".contains(*f)) {
                romaji.push(first);
            }
        }
        romaji.push_str(&unit);
    }
    romaji
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn apply(filter: &ReadingFormFilter, tokens: Vec<Token>) -> Vec<String> {
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_katakana_reading() {
        let tokens = vec![
            Token::new("詳細", 0).with_reading("ショウサイ"),
            Token::new("Rust", 1),
        ];
        assert_eq!(apply(&ReadingFormFilter::new(), tokens), vec!["ショウサイ", "Rust"]);
    }

    #[test]
    fn test_hiragana_reading() {
        let tokens = vec![Token::new("カレー", 0).with_reading("カレー")];
        assert_eq!(apply(&ReadingFormFilter::new().hiragana(true), tokens), vec!["かれー"]);
    }

    #[test]
    fn test_romaji_reading() {
        let tokens = vec![
            Token::new("東京", 0).with_reading("トウキョウ"),
            Token::new("の", 1).with_reading("ノ"),
            Token::new("Rust", 2),
        ];
        let filter = ReadingFormFilter::new().hiragana(true).romaji(true);
        assert_eq!(apply(&filter, tokens), vec!["toukyou", "no", "Rust"]);
    }

    #[test]
    fn test_to_romaji() {
        assert_eq!(to_romaji("シンブン"), "shinbun");
        assert_eq!(to_romaji("ショウサイ"), "shousai");
        assert_eq!(to_romaji("チャ"), "cha");
        assert_eq!(to_romaji("ジュウ"), "juu");
        assert_eq!(to_romaji("キョウト"), "kyouto");
        assert_eq!(to_romaji("ザッシ"), "zasshi");
        assert_eq!(to_romaji("マッチ"), "matchi");
        assert_eq!(to_romaji("コーヒー"), "koohii");
        assert_eq!(to_romaji("ファイル"), "fairu");
        assert_eq!(to_romaji("ウェブ"), "webu");
        assert_eq!(to_romaji("ヴァイオリン"), "vaiorin");
        assert_eq!(to_romaji("ティー"), "tii");
        assert_eq!(to_romaji("デュエット"), "dyuetto");
        assert_eq!(to_romaji("すもも"), "sumomo");
        assert_eq!(to_romaji("ABC"), "ABC");
    }
}
