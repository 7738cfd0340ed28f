//! Integration tests for configuration-driven pipelines.

use std::time::Duration;

use tempfile::TempDir;

use yomi::analysis::analyzer::Analyzer;
use yomi::analysis::token::Token;
use yomi::config::AnalysisConfig;
use yomi::error::{Result, YomiError};

fn write(dir: &TempDir, name: &str, content: &str) -> Result<()> {
    std::fs::write(dir.path().join(name), content)?;
    Ok(())
}

#[test]
fn test_japanese_search_pipeline_from_file() -> Result<()> {
    let dir = TempDir::new()?;
    write(
        &dir,
        "userdict.txt",
        "詳細,詳細,ショウサイ,名詞-形容動詞語幹\n設計,設計,セッケイ,名詞-サ変接続\n",
    )?;
    write(&dir, "concat.txt", "# merged\n名詞-形容動詞語幹\n名詞-サ変接続\n")?;
    write(
        &dir,
        "analysis.json",
        r#"{
            "tokenizer": {
                "user_dictionary": "userdict.txt",
                "reload_interval": "10m",
                "mode": "normal"
            },
            "filters": [
                { "type": "base_form" },
                { "type": "pos_stop" },
                { "type": "katakana_stem" }
            ],
            "pos_concat": { "tags_path": "concat.txt" }
        }"#,
    )?;

    let config = AnalysisConfig::from_file(dir.path().join("analysis.json"))?;
    assert_eq!(config.tokenizer.reload_interval, Duration::from_secs(600));

    let analyzer = config.build()?;
    let tokens: Vec<Token> = analyzer.analyze("詳細設計のサーバー")?.collect();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

    assert_eq!(texts, vec!["詳細設計", "サーバ"]);
    assert_eq!(tokens[1].position_increment, 2);

    Ok(())
}

#[test]
fn test_reading_form_pipeline() -> Result<()> {
    let config = AnalysisConfig::from_json(
        r#"{ "filters": [ { "type": "reading_form", "hiragana": true } ] }"#,
    )?;
    let analyzer = config.build()?;

    let tokens: Vec<Token> = analyzer.analyze("カレーとりんご")?.collect();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

    assert_eq!(texts, vec!["かれー", "と", "りんご"]);

    Ok(())
}

#[test]
fn test_romaji_reading_pipeline() -> Result<()> {
    let config = AnalysisConfig::from_json(
        r#"{ "filters": [ { "type": "reading_form", "romaji": true } ] }"#,
    )?;
    let analyzer = config.build()?;

    let tokens: Vec<Token> = analyzer.analyze("カレーとりんご")?.collect();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

    assert_eq!(texts, vec!["karee", "to", "ringo"]);

    Ok(())
}

#[test]
fn test_unreadable_tag_file_fails_build() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = AnalysisConfig::from_json(r#"{ "pos_concat": { "tags_path": "missing.txt" } }"#)?;
    config.config_dir = Some(dir.path().to_path_buf());

    assert!(matches!(config.build(), Err(YomiError::Configuration(_))));

    Ok(())
}
