//! Tests for the temporal normalizer API

use tempora_engine::{
    ApiError, DiagnosticKind, Document, ExecutionMode, FixtureExtractor, Input, ProcessorConfig,
    SimpleTokenizer, TemporalExpression, TemporalNormalizer, TemporalNormalizerBuilder,
    TimeSeries,
};
use tempora_core::Edge;

fn series(value: &str, start: &str, end: &str) -> TimeSeries {
    TimeSeries::new(value, value, Edge::new(start), Edge::new(end)).with_matches([value])
}

fn extractor() -> FixtureExtractor {
    FixtureExtractor::new()
        .with_entry(
            "Secolul XX a fost important.",
            vec![TemporalExpression::new(
                ["Secolul XX"],
                vec![series("Secolul XX", "century:20:start", "century:20:end")],
            )],
        )
        .with_entry(
            "Născut în anul 1846 la Dimăcheni.",
            vec![
                TemporalExpression::new(Vec::<String>::new(), Vec::new()),
                TemporalExpression::new(
                    ["in anul 1846"],
                    vec![series("anul 1846", "year:1846:start", "year:1846:end")],
                ),
            ],
        )
}

#[test]
fn test_basic_text_processing() {
    let normalizer = TemporalNormalizer::new(extractor()).expect("Failed to create normalizer");
    let output = normalizer
        .process_text("Secolul XX a fost important.")
        .expect("Failed to process text");

    assert_eq!(output.report.promoted, 1);
    assert_eq!(output.metadata.extractor, "fixture");
    assert_eq!(output.metadata.tokens_before, 6);
    assert_eq!(output.metadata.tokens_after, 5);

    let entity = &output.document.entities()[0];
    assert_eq!(output.document.span_text(entity), Some("Secolul XX"));
    assert_eq!(
        entity.metadata().unwrap().time_series()[0].edges.start.uri,
        "century:20:start"
    );
}

#[test]
fn test_unknown_text_is_untouched() {
    let normalizer = TemporalNormalizer::new(extractor()).unwrap();
    let output = normalizer.process_text("Nimic de văzut aici.").unwrap();

    assert!(output.document.entities().is_empty());
    assert_eq!(output.metadata.expressions, 0);
    assert_eq!(output.report.candidates, 0);
}

#[test]
fn test_expression_preset_skips_invalid_expressions() {
    let normalizer = TemporalNormalizer::with_preset(extractor(), "expression").unwrap();
    let output = normalizer
        .process_text("Născut în anul 1846 la Dimăcheni.")
        .unwrap();

    assert_eq!(output.metadata.invalid_expressions, 1);
    assert_eq!(output.metadata.expressions, 1);
    assert_eq!(output.document.tokens().len(), output.metadata.tokens_before);

    let entity = &output.document.entities()[0];
    assert_eq!(entity.label(), "DATE");
    assert_eq!(output.document.span_text(entity), Some("în anul 1846"));
}

#[test]
fn test_unknown_preset() {
    let err = TemporalNormalizer::with_preset(extractor(), "accurate").unwrap_err();
    assert!(matches!(err, ApiError::UnsupportedPreset { name } if name == "accurate"));
}

#[test]
fn test_pretokenized_document_keeps_entities() {
    let doc = Document::from_words([
        ("Secolul", true),
        ("XX", true),
        ("a", true),
        ("fost", true),
        ("important", false),
        (".", false),
    ])
    .unwrap()
    .with_entities(vec![tempora_engine::Span::new(
        tempora_engine::TokenRange::new(0, 1),
        "PERIOD",
    )])
    .unwrap();

    let normalizer = TemporalNormalizer::new(extractor()).unwrap();
    let output = normalizer.process(Input::from_document(doc)).unwrap();

    assert_eq!(output.report.updated, 1);
    assert_eq!(output.document.entities()[0].label(), "PERIOD");
    assert!(output.report.diagnostics.is_empty());
}

#[test]
fn test_boundary_mismatch_reported() {
    let extractor = FixtureExtractor::new().with_entry(
        "Sec al II-lea a.ch.",
        vec![TemporalExpression::new(["II"], vec![series("II", "c2:start", "c2:end")])],
    );
    let normalizer = TemporalNormalizer::new(extractor).unwrap();
    let output = normalizer.process_text("Sec al II-lea a.ch.").unwrap();

    assert_eq!(
        output.report.diagnostics.count(DiagnosticKind::BoundaryMismatch),
        1
    );
    assert!(output.document.entities().is_empty());
}

#[test]
fn test_builder() {
    let normalizer = TemporalNormalizerBuilder::new()
        .extractor(extractor())
        .expression()
        .fuse_tokens(true)
        .label("TIMEX")
        .tokenizer(SimpleTokenizer::new().with_abbreviations(["dr."]))
        .build()
        .expect("Failed to build normalizer");

    assert_eq!(normalizer.align_config().label, "TIMEX");
    let output = normalizer
        .process_text("Născut în anul 1846 la Dimăcheni.")
        .unwrap();
    assert_eq!(output.document.tokens()[1].text(), "în anul 1846");
}

#[test]
fn test_builder_requires_extractor() {
    let err = TemporalNormalizerBuilder::new().build().unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_batch_keeps_order() {
    let config = ProcessorConfig {
        execution_mode: ExecutionMode::Parallel,
        thread_count: Some(2),
        ..ProcessorConfig::series()
    };
    let normalizer = TemporalNormalizer::with_config(extractor(), config).unwrap();

    let inputs: Vec<Input> = (0..20)
        .map(|i| {
            if i % 2 == 0 {
                Input::from_text("Secolul XX a fost important.")
            } else {
                Input::from_text("Nimic.")
            }
        })
        .collect();
    let batch = normalizer.process_batch(inputs).unwrap();

    assert_eq!(batch.outputs.len(), 20);
    assert_eq!(batch.failures(), 0);
    for (i, output) in batch.outputs.iter().enumerate() {
        let output = output.as_ref().unwrap();
        assert_eq!(output.document.entities().len(), usize::from(i % 2 == 0));
    }
}

#[test]
fn test_small_batch_runs_sequentially() {
    let normalizer = TemporalNormalizer::new(extractor()).unwrap();
    let batch = normalizer
        .process_batch(vec![Input::from_text("Nimic."), Input::from_bytes(vec![0xff])])
        .unwrap();

    assert_eq!(batch.execution_mode, ExecutionMode::Sequential);
    assert_eq!(batch.failures(), 1);
}
