//! Width folding for mixed-width Japanese text.
//!
//! Full-width ASCII variants (`Ｒｕｓｔ`, `１２３`) fold to ASCII and
//! half-width katakana (`ｻｰﾊﾞｰ`) widens to full-width katakana, merging a
//! following voiced or semi-voiced sound mark into the kana before it.
//!
//! # Examples
//!
//! ```
//! use yomi::analysis::token::Token;
//! use yomi::analysis::token_filter::Filter;
//! use yomi::analysis::token_filter::cjk_width::CjkWidthFilter;
//!
//! let filter = CjkWidthFilter::new();
//! let tokens = vec![Token::new("Ｒｕｓｔ", 0), Token::new("ｻｰﾊﾞｰ", 1)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(result[0].text, "Rust");
//! assert_eq!(result[1].text, "サーバー");
//! ```

use crate::analysis::char_filter::iteration_mark::add_dakuon;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Full-width forms of U+FF61 through U+FF9F, in code point order.
const HALF_WIDTH_KANA: &str = "。「」、・ヲァィゥェォャュョッーアイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワン゛゜";

const HALF_WIDTH_VOICED_MARK: char = 'ﾞ';
const HALF_WIDTH_SEMI_VOICED_MARK: char = 'ﾟ';

fn widen_kana(c: char) -> char {
    HALF_WIDTH_KANA
        .chars()
        .nth((c as u32 - 0xFF61) as usize)
        .unwrap_or(c)
}

fn add_handakuon(c: char) -> Option<char> {
    let code = c as u32;
    match code {
        0x30CF..=0x30DB if code % 3 == 0 => char::from_u32(code + 2),
        _ => None,
    }
}

/// Fold the width of one string.
pub fn fold_width(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{FF01}'..='\u{FF5E}' => {
                folded.push(char::from_u32(c as u32 - 0xFEE0).unwrap_or(c));
            }
            HALF_WIDTH_VOICED_MARK | HALF_WIDTH_SEMI_VOICED_MARK => {
                let combined = folded.chars().next_back().and_then(|previous| {
                    if c == HALF_WIDTH_VOICED_MARK {
                        Some(add_dakuon(previous)).filter(|&voiced| voiced != previous)
                    } else {
                        add_handakuon(previous)
                    }
                });
                match combined {
                    Some(combined) => {
                        folded.pop();
                        folded.push(combined);
                    }
                    None => folded.push(widen_kana(c)),
                }
            }
            '\u{FF61}'..='\u{FF9D}' => folded.push(widen_kana(c)),
            _ => folded.push(c),
        }
    }
    folded
}

/// A filter that folds full-width ASCII and widens half-width katakana.
#[derive(Clone, Debug, Default)]
pub struct CjkWidthFilter;

impl CjkWidthFilter {
    /// Create a new width folding filter.
    pub fn new() -> Self {
        CjkWidthFilter
    }
}

impl Filter for CjkWidthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if token.text.chars().any(|c| matches!(c, '\u{FF01}'..='\u{FF9F}')) {
                token.text = fold_width(&token.text);
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "cjk_width"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_full_width_ascii_folds() {
        assert_eq!(fold_width("Ｒｕｓｔ"), "Rust");
        assert_eq!(fold_width("２０２４年"), "2024年");
        assert_eq!(fold_width("Ａ＆Ｂ"), "A&B");
    }

    #[test]
    fn test_half_width_katakana_widens() {
        assert_eq!(fold_width("ｶﾀｶﾅ"), "カタカナ");
        assert_eq!(fold_width("ﾃﾞｰﾀﾍﾞｰｽ"), "データベース");
        assert_eq!(fold_width("ﾊﾟｿｺﾝ"), "パソコン");
        assert_eq!(fold_width("ｳﾞｧｲｵﾘﾝ"), "ヴァイオリン");
    }

    #[test]
    fn test_stray_sound_marks_widen() {
        assert_eq!(fold_width("ｱﾞ"), "ア゛");
        assert_eq!(fold_width("ｶﾟ"), "カ゜");
        assert_eq!(fold_width("ﾞ"), "゛");
    }

    #[test]
    fn test_filter_keeps_offsets() {
        let filter = CjkWidthFilter::new();
        let tokens = vec![
            Token::with_offsets("ﾃﾞｰﾀ", 0, 0, 15),
            Token::with_offsets("東京", 1, 15, 21),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result[0].text, "データ");
        assert_eq!(result[0].end_offset, 15);
        assert_eq!(result[1].text, "東京");
    }
}
