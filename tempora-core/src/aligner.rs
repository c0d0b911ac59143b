//! Per-document alignment pass
//!
//! [`Aligner::align`] runs the whole pipeline for one document:
//! fold, compile, scan, map to tokens, resolve, bind, and finally commit the
//! entity set. The document is left untouched if the pass fails.

use crate::binder::SemanticBinder;
use crate::boundary::TokenBoundaries;
use crate::config::AlignConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::document::Document;
use crate::error::Result;
use crate::finalizer::EntitySetFinalizer;
use crate::normalizer::FoldedText;
use crate::pattern::CandidateMatcher;
use crate::resolver::{resolve, Resolution};
use crate::temporal::TemporalExpression;
use serde::{Deserialize, Serialize};

/// What one alignment pass did to a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    /// Occurrences found by the scanner
    pub candidates: usize,
    /// New entities in the committed collection
    pub promoted: usize,
    /// Existing entities whose metadata was replaced
    pub updated: usize,
    /// Multi-token spans fused into single tokens
    pub fused: usize,
    /// Recoverable problems, in the order they were met
    pub diagnostics: Diagnostics,
}

/// Aligns engine results with the tokens and entities of a document
///
/// The aligner holds only its configuration, so one instance can be shared
/// across threads.
///
/// ```
/// use tempora_core::{AlignConfig, Aligner, Document, Edge, TemporalExpression, TimeSeries};
///
/// let mut doc = Document::from_words([("Secolul", true), ("XX", false), (".", false)]).unwrap();
/// let series = TimeSeries::new(
///     "Secolul XX",
///     "secolul XX",
///     Edge::new("c20:start"),
///     Edge::new("c20:end"),
/// )
/// .with_matches(["Secolul XX"]);
/// let expressions = vec![TemporalExpression::new(["Secolul XX"], vec![series])];
///
/// let report = Aligner::new(AlignConfig::series()).align(&mut doc, &expressions).unwrap();
/// assert_eq!(report.promoted, 1);
/// assert_eq!(doc.tokens()[0].text(), "Secolul XX");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    config: AlignConfig,
}

impl Aligner {
    /// Create an aligner
    pub fn new(config: AlignConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Align `expressions` with `document` and commit the resulting entities
    ///
    /// Expressions without any non-empty match are ignored. On error the
    /// document is not modified.
    pub fn align(
        &self,
        document: &mut Document,
        expressions: &[TemporalExpression],
    ) -> Result<AlignmentReport> {
        let config = &self.config;
        let literals = expressions
            .iter()
            .filter(|expression| expression.is_valid())
            .flat_map(|expression| expression.matches.iter());
        let matcher = CandidateMatcher::compile(literals, config.accent_fold)?;

        let mut report = AlignmentReport::default();
        if matcher.is_empty() {
            tracing::debug!("no candidate literals, document left unchanged");
            return Ok(report);
        }

        let finalizer = {
            let text = FoldedText::prepare(document.text(), config.accent_fold);
            let boundaries = TokenBoundaries::new(document.tokens());
            let binder = SemanticBinder::new(expressions, config.binding, config.accent_fold);
            let mut finalizer = EntitySetFinalizer::new(document.entities(), config.fuse_tokens);

            for found in matcher.scan(&text) {
                report.candidates += 1;

                let Some(tokens) = boundaries.map(found.range) else {
                    let text = document.slice(found.range).unwrap_or(found.text.as_str());
                    report.diagnostics.push(Diagnostic::BoundaryMismatch {
                        text: text.to_string(),
                        start_char: found.range.start,
                        end_char: found.range.end,
                    });
                    continue;
                };

                let resolution =
                    resolve(document, finalizer.entities(), found.range, tokens, &config.label);
                let span = match &resolution {
                    Resolution::Existing { index } => &finalizer.entities()[*index],
                    Resolution::New(span) => span,
                };
                let span_range = span.range();
                let span_text = document.span_text(span).unwrap_or_default().to_string();

                let Some(metadata) = binder.bind(&span_text) else {
                    report.diagnostics.push(Diagnostic::NoSemanticMatch {
                        text: span_text,
                        tokens: span_range,
                    });
                    continue;
                };

                match resolution {
                    Resolution::Existing { index } => {
                        tracing::debug!(range = %span_range, "updating existing entity");
                        if finalizer.update_existing(index, metadata) {
                            report.updated += 1;
                        }
                    }
                    Resolution::New(span) => {
                        let kept = finalizer.insert(span, metadata);
                        tracing::debug!(range = %span_range, kept, "inserted new entity");
                    }
                }
            }

            finalizer
        };

        let summary = finalizer.commit(document);
        report.promoted = summary.promoted;
        report.fused = summary.fused;

        tracing::debug!(
            candidates = report.candidates,
            promoted = report.promoted,
            updated = report.updated,
            diagnostics = report.diagnostics.len(),
            "alignment finished"
        );
        Ok(report)
    }
}
