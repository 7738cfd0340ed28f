//! Expansion of Japanese iteration marks.
//!
//! `々` repeats the preceding kanji, `ゝ`/`ゞ` the preceding hiragana and
//! `ヽ`/`ヾ` the preceding katakana. The voiced marks add a dakuten to the
//! repeated kana and the plain ones remove it. A run of `n` marks repeats the
//! `n` characters before it, so `馬鹿々々` becomes `馬鹿馬鹿`. A mark that has
//! nothing suitable to repeat is kept as written.

use crate::analysis::segmenter::CharClass;

use super::{CharFilter, Transformation};

const KANJI_ITERATION_MARK: char = '々';
const HIRAGANA_ITERATION_MARK: char = 'ゝ';
const HIRAGANA_DAKUON_ITERATION_MARK: char = 'ゞ';
const KATAKANA_ITERATION_MARK: char = 'ヽ';
const KATAKANA_DAKUON_ITERATION_MARK: char = 'ヾ';

fn shift(c: char, delta: i32) -> char {
    char::from_u32((c as u32).wrapping_add_signed(delta)).unwrap_or(c)
}

/// Voice a kana if it has a voiced counterpart, e.g. `す` to `ず`.
pub(crate) fn add_dakuon(c: char) -> char {
    let code = c as u32;
    match code {
        // か..ぢ and カ..ヂ: the unvoiced kana sit on odd code points
        0x304B..=0x3062 | 0x30AB..=0x30C2 if code % 2 == 1 => shift(c, 1),
        // つ..ど and ツ..ド
        0x3064..=0x3069 | 0x30C4..=0x30C9 if code % 2 == 0 => shift(c, 1),
        // は..ぽ and ハ..ポ come in triples
        0x306F..=0x307D | 0x30CF..=0x30DD if code % 3 == 0 => shift(c, 1),
        0x3046 => 'ゔ',
        0x30A6 => 'ヴ',
        _ => c,
    }
}

/// Remove the dakuten or handakuten of a kana, e.g. `ず` to `す`.
pub(crate) fn remove_dakuon(c: char) -> char {
    let code = c as u32;
    match code {
        0x304B..=0x3062 | 0x30AB..=0x30C2 if code % 2 == 0 => shift(c, -1),
        0x3064..=0x3069 | 0x30C4..=0x30C9 if code % 2 == 1 => shift(c, -1),
        0x306F..=0x307D | 0x30CF..=0x30DD if code % 3 == 1 => shift(c, -1),
        0x306F..=0x307D | 0x30CF..=0x30DD if code % 3 == 2 => shift(c, -2),
        0x3094 => 'う',
        0x30F4 => 'ウ',
        _ => c,
    }
}

/// Char filter that replaces iteration marks with the characters they repeat.
#[derive(Clone, Debug)]
pub struct IterationMarkCharFilter {
    normalize_kanji: bool,
    normalize_kana: bool,
}

impl IterationMarkCharFilter {
    /// Create a filter, choosing which kinds of marks to expand.
    pub fn new(normalize_kanji: bool, normalize_kana: bool) -> Self {
        IterationMarkCharFilter {
            normalize_kanji,
            normalize_kana,
        }
    }

    fn is_mark(&self, c: char) -> bool {
        match c {
            KANJI_ITERATION_MARK => self.normalize_kanji,
            HIRAGANA_ITERATION_MARK
            | HIRAGANA_DAKUON_ITERATION_MARK
            | KATAKANA_ITERATION_MARK
            | KATAKANA_DAKUON_ITERATION_MARK => self.normalize_kana,
            _ => false,
        }
    }

    /// The character `mark` stands for when it repeats `source`, if it may.
    fn expand(mark: char, source: char) -> Option<char> {
        let class = CharClass::of(source);
        match mark {
            KANJI_ITERATION_MARK if class == CharClass::Kanji && source != mark => Some(source),
            HIRAGANA_ITERATION_MARK if is_hiragana(source) => Some(remove_dakuon(source)),
            HIRAGANA_DAKUON_ITERATION_MARK if is_hiragana(source) => Some(add_dakuon(source)),
            KATAKANA_ITERATION_MARK if is_katakana(source) => Some(remove_dakuon(source)),
            KATAKANA_DAKUON_ITERATION_MARK if is_katakana(source) => Some(add_dakuon(source)),
            _ => None,
        }
    }
}

fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}')
}

fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A1}'..='\u{30FA}')
}

impl Default for IterationMarkCharFilter {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl CharFilter for IterationMarkCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();
        // Characters already written, used as the source of repetition.
        let mut written: Vec<char> = Vec::with_capacity(input.len() / 3);

        let mut chars = input.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            if !self.is_mark(c) {
                output.push(c);
                written.push(c);
                continue;
            }

            let mut run = vec![(start, c)];
            while let Some(&(next_start, next)) = chars.peek() {
                if !self.is_mark(next) {
                    break;
                }
                run.push((next_start, next));
                chars.next();
            }

            let sources = if written.len() >= run.len() {
                written[written.len() - run.len()..].to_vec()
            } else {
                Vec::new()
            };

            for (k, &(mark_start, mark)) in run.iter().enumerate() {
                let replacement = sources.get(k).and_then(|&source| Self::expand(mark, source));
                match replacement {
                    Some(replacement) => {
                        let new_start = output.len();
                        output.push(replacement);
                        transformations.push(Transformation::new(
                            mark_start,
                            mark_start + mark.len_utf8(),
                            new_start,
                            output.len(),
                        ));
                        written.push(replacement);
                    }
                    None => {
                        output.push(mark);
                        written.push(mark);
                    }
                }
            }
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "iteration_mark"
    }
}
