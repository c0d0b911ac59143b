//! Property tests for entity set invariants

use proptest::prelude::*;
use proptest::sample::{select, subsequence, Index};
use tempora_core::{
    fold_accents, AlignConfig, Aligner, Document, Edge, Span, TemporalExpression, TimeSeries,
    TokenRange,
};

const WORDS: &[&str] = &[
    "Secolul", "XX", "anul", "1962", "în", "perioada", "1856", "-", "1857", "a", "fost", ".",
    "Dimăcheni",
];

const PHRASES: &[&str] = &[
    "Secolul XX",
    "XX",
    "anul 1962",
    "1962",
    "1856 - 1857",
    "în perioada",
    "a fost",
    "in perioada",
];

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec((select(WORDS), any::<bool>()), 1..14)
        .prop_map(|words| Document::from_words(words).unwrap())
}

fn expressions() -> impl Strategy<Value = Vec<TemporalExpression>> {
    subsequence(PHRASES, 0..=PHRASES.len()).prop_map(|phrases| {
        phrases
            .into_iter()
            .map(|phrase| {
                let series = TimeSeries::new(phrase, phrase, Edge::new("start"), Edge::new("end"))
                    .with_matches([phrase]);
                TemporalExpression::new([phrase], vec![series])
            })
            .collect()
    })
}

fn config() -> impl Strategy<Value = AlignConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(expression, fold, fuse)| {
        let mut config = if expression {
            AlignConfig::expression()
        } else {
            AlignConfig::series()
        };
        config.accent_fold = fold;
        config.fuse_tokens = fuse;
        config
    })
}

fn assert_consistent(doc: &Document) -> Result<(), TestCaseError> {
    let rebuilt = Document::new(doc.text(), doc.tokens().to_vec(), doc.entities().to_vec());
    prop_assert!(rebuilt.is_ok(), "inconsistent document: {:?}", rebuilt.err());

    for pair in doc.entities().windows(2) {
        prop_assert!(pair[0].end() < pair[1].start());
    }
    Ok(())
}

proptest! {
    /// Entities stay in bounds, sorted and disjoint, and tokens keep matching the text.
    #[test]
    fn entities_never_overlap(
        doc in document(),
        expressions in expressions(),
        config in config(),
        existing in prop::option::of(any::<Index>()),
    ) {
        let mut doc = match existing {
            Some(index) => {
                let at = index.index(doc.tokens().len());
                doc.with_entities(vec![Span::new(TokenRange::single(at), "LOC")]).unwrap()
            }
            None => doc,
        };
        let text = doc.text().to_string();

        Aligner::new(config).align(&mut doc, &expressions).unwrap();

        prop_assert_eq!(doc.text(), text.as_str());
        assert_consistent(&doc)?;
    }

    /// A second pass over the output changes nothing.
    #[test]
    fn alignment_is_idempotent(
        doc in document(),
        expressions in expressions(),
        config in config(),
    ) {
        let aligner = Aligner::new(config);
        let mut doc = doc;
        aligner.align(&mut doc, &expressions).unwrap();
        let once = doc.clone();

        let report = aligner.align(&mut doc, &expressions).unwrap();
        prop_assert_eq!(report.promoted, 0);
        prop_assert_eq!(report.fused, 0);
        prop_assert_eq!(doc, once);
    }

    /// Every new entity covers exactly a supplied literal, modulo case and accents.
    #[test]
    fn promoted_spans_match_their_literal(
        doc in document(),
        expressions in expressions(),
        config in config(),
    ) {
        let literals: Vec<String> = expressions
            .iter()
            .flat_map(|expression| expression.matches.iter())
            .map(|literal| fold_accents(literal).to_lowercase())
            .collect();

        let mut doc = doc;
        let report = Aligner::new(config).align(&mut doc, &expressions).unwrap();
        prop_assert_eq!(report.promoted, doc.entities().len());

        for entity in doc.entities() {
            prop_assert!(entity.metadata().is_some());
            let text = doc.span_text(entity);
            prop_assert!(text.is_some());
            let folded = text.map(|t| fold_accents(t).to_lowercase()).unwrap_or_default();
            prop_assert!(
                literals.contains(&folded),
                "span {:?} matches none of {:?}",
                folded,
                literals
            );
        }
    }
}
