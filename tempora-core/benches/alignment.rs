//! Alignment throughput benchmarks
//!
//! Run with: cargo bench --bench alignment

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tempora_core::{AlignConfig, Aligner, Document, Edge, TemporalExpression, TimeSeries};

const SENTENCE: &[&str] = &[
    "În", "perioada", "1856", "-", "1857", "secolul", "XIX", "a", "adus", "schimbări", ".",
];

/// Document made of `repeat` copies of one sentence
fn generate_document(repeat: usize) -> Document {
    let words = SENTENCE
        .iter()
        .cycle()
        .take(SENTENCE.len() * repeat)
        .enumerate()
        .map(|(i, word)| (*word, (i + 2) % SENTENCE.len() != 0));
    Document::from_words(words).unwrap()
}

fn expressions() -> Vec<TemporalExpression> {
    let series = |value: &str| {
        TimeSeries::new(value, value, Edge::new("start"), Edge::new("end")).with_matches([value])
    };
    vec![
        TemporalExpression::new(["perioada 1856 - 1857"], vec![series("1856"), series("1857")]),
        TemporalExpression::new(["secolul XIX"], vec![series("secolul XIX")]),
        TemporalExpression::new(["in perioada"], vec![series("perioada")]),
    ]
}

fn bench_document_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_sizes");
    let expressions = expressions();

    for repeat in [1, 10, 100, 1_000] {
        let doc = generate_document(repeat);
        group.throughput(Throughput::Elements(doc.tokens().len() as u64));

        for (name, config) in [
            ("series", AlignConfig::series()),
            ("expression", AlignConfig::expression()),
        ] {
            let aligner = Aligner::new(config);
            group.bench_with_input(BenchmarkId::new(name, repeat), &doc, |b, doc| {
                b.iter(|| {
                    let mut doc = doc.clone();
                    aligner.align(&mut doc, black_box(&expressions)).unwrap();
                    doc
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_document_sizes);
criterion_main!(benches);
