//! Criterion benchmarks for the Rocchio expansion core.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rocchio::analysis::analyzer::Analyzer;
use rocchio::document::{JudgedSet, Relevance, ResultRecord};
use rocchio::expansion::{QueryExpander, TfIdfVectorizer};
use std::hint::black_box;

/// Generate result records for benchmarking.
fn generate_records(count: usize) -> Vec<ResultRecord> {
    let words = [
        "jaguar", "cars", "luxury", "sedan", "engine", "cat", "rainforest", "species", "habitat",
        "price", "dealer", "review", "speed", "prey", "america", "model", "electric", "wild",
        "predator", "coupe",
    ];

    (0..count)
        .map(|i| {
            let title: Vec<&str> = (0..4).map(|j| words[(i * 3 + j * 7) % words.len()]).collect();
            let summary: Vec<&str> = (0..25)
                .map(|j| words[(i * 7 + j * 13) % words.len()]) // Pseudo-random distribution
                .collect();
            ResultRecord::new(
                format!("https://example.com/{i}"),
                title.join(" "),
                summary.join(" "),
            )
        })
        .collect()
}

/// Benchmark document processing.
fn bench_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("processing");

    let expander = QueryExpander::with_defaults().unwrap();
    let records = generate_records(10);

    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("process_documents", |b| {
        b.iter(|| {
            for record in &records {
                let _ = black_box(expander.process_document(black_box(record)));
            }
        })
    });

    let analyzer = rocchio::analysis::analyzer::PipelineAnalyzer::new(
        rocchio::analysis::tokenizer::TokenizerKind::UnicodeWord
            .build()
            .unwrap(),
    );
    group.bench_function("unicode_word_terms", |b| {
        b.iter(|| black_box(analyzer.terms(black_box(&records[0].summary))))
    });

    group.finish();
}

/// Benchmark TF-IDF weighting and term selection.
fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");

    let vectorizer = TfIdfVectorizer::new().unwrap();
    let expander = QueryExpander::with_defaults().unwrap();

    for size in [10, 100].iter() {
        let records = generate_records(*size);
        let documents: Vec<String> = records
            .iter()
            .map(|record| format!("{} {}", record.title, record.summary))
            .collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("fit_transform", size), &documents, |b, docs| {
            b.iter(|| black_box(vectorizer.fit_transform(black_box(docs.as_slice())).column_sums()))
        });

        let judged: JudgedSet = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let relevance = if i % 3 == 0 {
                    Relevance::Relevant
                } else {
                    Relevance::NonRelevant
                };
                (record.clone(), relevance)
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("expand", size), &judged, |b, judged| {
            b.iter(|| black_box(expander.expand(black_box("jaguar"), judged)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_processing, bench_expansion);
criterion_main!(benches);
