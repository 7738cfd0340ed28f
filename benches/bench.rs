//! Criterion benchmarks for yomi.
//!
//! Covers the hot paths of a long-lived pipeline:
//! - Session open with a throttled dictionary check
//! - Segmentation with and without a user dictionary
//! - Part-of-speech concatenation
//! - Concurrent sessions against one tokenizer

use std::hint::black_box;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use tempfile::TempDir;

use yomi::analysis::analyzer::Analyzer;
use yomi::analysis::analyzer::japanese::JapaneseAnalyzer;
use yomi::analysis::segmenter::{LexiconSegmenter, Mode};
use yomi::analysis::token::Token;
use yomi::analysis::token_filter::Filter;
use yomi::analysis::token_filter::pos_concat::PosConcatFilter;
use yomi::analysis::tokenizer::{ReloadableTokenizer, Tokenizer};

const SENTENCES: &[&str] = &[
    "関西国際空港に到着してから詳細設計の検討を行いました。",
    "東京都の天気は晴れ、サーバーのメンテナンスは明日です。",
    "形態素解析の結果をもとにユーザー辞書を更新します。",
    "プリンターとコンピューターについての問い合わせ。",
];

const USER_DICTIONARY: &str = "\
関西国際空港,関西 国際 空港,カンサイ コクサイ クウコウ,名詞-固有名詞
詳細,詳細,ショウサイ,名詞-形容動詞語幹
設計,設計,セッケイ,名詞-サ変接続
検討,検討,ケントウ,名詞-サ変接続
形態素解析,形態素 解析,ケイタイソ カイセキ,名詞-一般
ユーザー辞書,ユーザー 辞書,ユーザー ジショ,名詞-一般
";

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let sentences = 1 + i % 5;
            (0..sentences)
                .map(|j| SENTENCES[(i + j) % SENTENCES.len()])
                .collect::<String>()
        })
        .collect()
}

fn tokenizer_with_dictionary(dir: &TempDir) -> ReloadableTokenizer<LexiconSegmenter> {
    let path = dir.path().join("userdict.txt");
    std::fs::write(&path, USER_DICTIONARY).unwrap();
    ReloadableTokenizer::with_user_dictionary(
        LexiconSegmenter::new(Mode::Search),
        path,
        Duration::from_secs(60),
    )
    .unwrap()
}

/// Benchmark tokenization.
fn bench_tokenization(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenization");
    let dir = TempDir::new().unwrap();
    let plain = ReloadableTokenizer::new(LexiconSegmenter::new(Mode::Search));
    let with_dictionary = tokenizer_with_dictionary(&dir);
    let texts = generate_test_documents(100);

    group.bench_function("open_session", |b| {
        b.iter(|| black_box(with_dictionary.open_session(black_box(&texts[0]))))
    });

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("tokenize_without_dictionary", |b| {
        b.iter(|| {
            for text in &texts {
                let count = plain.tokenize(black_box(text)).unwrap().count();
                black_box(count);
            }
        })
    });
    group.bench_function("tokenize_with_dictionary", |b| {
        b.iter(|| {
            for text in &texts {
                let count = with_dictionary.tokenize(black_box(text)).unwrap().count();
                black_box(count);
            }
        })
    });

    group.finish();
}

/// Benchmark the concatenation filter on its own.
fn bench_pos_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("pos_concat");
    let dir = TempDir::new().unwrap();
    let tokenizer = tokenizer_with_dictionary(&dir);
    let filter = PosConcatFilter::from_tags(["名詞-形容動詞語幹", "名詞-サ変接続", "名詞-一般"]);
    let tokens: Vec<Token> = generate_test_documents(100)
        .iter()
        .flat_map(|text| tokenizer.tokenize(text).unwrap())
        .collect();

    group.throughput(Throughput::Elements(tokens.len() as u64));
    group.bench_function("filter_stream", |b| {
        b.iter(|| {
            let merged = filter
                .filter(Box::new(black_box(tokens.clone()).into_iter()))
                .unwrap()
                .count();
            black_box(merged)
        })
    });

    group.finish();
}

/// Benchmark the full Japanese analyzer.
fn bench_japanese_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("japanese_analyzer");
    let dir = TempDir::new().unwrap();
    let analyzer = JapaneseAnalyzer::with_tokenizer(tokenizer_with_dictionary(&dir));
    let texts = generate_test_documents(100);

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("analyze_batch_documents", |b| {
        b.iter(|| {
            for text in &texts {
                let result = analyzer.analyze(black_box(text));
                let _ = black_box(result.map(|tokens| tokens.count()));
            }
        })
    });

    group.finish();
}

/// Benchmark sessions opened concurrently against one tokenizer.
fn bench_concurrent_sessions(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_sessions");
    let dir = TempDir::new().unwrap();
    let tokenizer = Arc::new(tokenizer_with_dictionary(&dir));
    let texts = Arc::new(generate_test_documents(100));

    group.throughput(Throughput::Elements(4 * texts.len() as u64));
    group.bench_function("four_threads", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let tokenizer = tokenizer.clone();
                    let texts = texts.clone();
                    thread::spawn(move || {
                        texts
                            .iter()
                            .map(|text| tokenizer.tokenize(text).unwrap().count())
                            .sum::<usize>()
                    })
                })
                .collect();
            for handle in handles {
                black_box(handle.join().unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenization,
    bench_pos_concat,
    bench_japanese_analyzer,
    bench_concurrent_sessions
);

criterion_main!(benches);
