//! Integration tests for part-of-speech concatenation in a full pipeline.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use yomi::analysis::analyzer::Analyzer;
use yomi::analysis::analyzer::pipeline::PipelineAnalyzer;
use yomi::analysis::segmenter::{LexiconSegmenter, Mode};
use yomi::analysis::token::Token;
use yomi::analysis::token_filter::Filter;
use yomi::analysis::token_filter::pos_concat::{PosConcatFilter, PosTagSet};
use yomi::analysis::tokenizer::ReloadableTokenizer;
use yomi::error::Result;

const USER_DICTIONARY: &str = "\
# compound parts
詳細,詳細,ショウサイ,名詞-形容動詞語幹
設計,設計,セッケイ,名詞-サ変接続
検討,検討,ケントウ,名詞-サ変接続
";

fn pipeline(dir: &TempDir) -> Result<PipelineAnalyzer> {
    let path = dir.path().join("userdict.txt");
    std::fs::write(&path, USER_DICTIONARY)?;

    let tokenizer = ReloadableTokenizer::with_user_dictionary(
        LexiconSegmenter::new(Mode::Normal),
        path,
        Duration::from_secs(60),
    )?;
    Ok(PipelineAnalyzer::reloadable(tokenizer).add_filter(Arc::new(
        PosConcatFilter::from_tags(["名詞-形容動詞語幹", "名詞-サ変接続"]),
    )))
}

#[test]
fn test_compound_is_concatenated() -> Result<()> {
    let dir = TempDir::new()?;
    let analyzer = pipeline(&dir)?;

    let tokens: Vec<Token> = analyzer.analyze("詳細設計")?.collect();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text, "詳細設計");
    assert_eq!(tokens[0].start_offset, 0);
    assert_eq!(tokens[0].end_offset, "詳細設計".len());
    assert_eq!(tokens[0].pos_tag(), Some("名詞-形容動詞語幹"));
    assert_eq!(tokens[0].reading.as_deref(), Some("ショウサイセッケイ"));

    Ok(())
}

#[test]
fn test_offsets_point_into_the_input() -> Result<()> {
    let dir = TempDir::new()?;
    let analyzer = pipeline(&dir)?;
    let text = "今日は詳細設計と検討を行う。";

    let tokens: Vec<Token> = analyzer.analyze(text)?.collect();

    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["今日", "は", "詳細設計", "と", "検討", "を", "行", "う"]);
    for token in &tokens {
        assert!(token.start_offset <= token.end_offset);
        assert_eq!(&text[token.start_offset..token.end_offset], token.text);
    }
    assert_eq!(tokens[2].position_length, 2);
    assert_eq!(tokens[4].position_length, 1);

    Ok(())
}

#[test]
fn test_filter_is_idempotent_on_analyzer_output() -> Result<()> {
    let dir = TempDir::new()?;
    let analyzer = pipeline(&dir)?;
    let filter = PosConcatFilter::new(PosTagSet::new(["名詞-形容動詞語幹", "名詞-サ変接続"]));

    let once: Vec<Token> = analyzer.analyze("詳細設計検討の詳細")?.collect();
    let twice: Vec<Token> = filter.filter(Box::new(once.clone().into_iter()))?.collect();

    assert_eq!(once, twice);
    assert_eq!(once[0].text, "詳細設計検討");
    assert_eq!(once[0].position_length, 3);

    Ok(())
}
