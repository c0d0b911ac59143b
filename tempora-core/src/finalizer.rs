//! Entity set finalization
//!
//! The finalizer owns a working copy of the entity collection for one pass.
//! Candidates are applied to that copy one at a time, and the document is
//! only written once, by [`EntitySetFinalizer::commit`].

use crate::document::{Document, Span, Token, TokenRange};
use crate::temporal::Normalization;

/// Working entity collection for one alignment pass
#[derive(Debug, Clone)]
pub struct EntitySetFinalizer {
    spans: Vec<Span>,
    fresh: Vec<bool>,
    fuse_tokens: bool,
}

/// What a commit changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Entities in the final collection
    pub entities: usize,
    /// New spans that survived overlap resolution
    pub promoted: usize,
    /// Multi-token spans fused into single tokens
    pub fused: usize,
}

impl EntitySetFinalizer {
    /// Start from the document's existing entities
    pub fn new(existing: &[Span], fuse_tokens: bool) -> Self {
        Self {
            spans: existing.to_vec(),
            fresh: vec![false; existing.len()],
            fuse_tokens,
        }
    }

    /// Current working collection, in insertion order
    pub fn entities(&self) -> &[Span] {
        &self.spans
    }

    /// Replace the metadata of an entity in place
    ///
    /// Returns false if `index` is out of range.
    pub fn update_existing(&mut self, index: usize, metadata: Normalization) -> bool {
        match self.spans.get_mut(index) {
            Some(span) => {
                span.set_metadata(metadata);
                true
            }
            None => false,
        }
    }

    /// Add a new span and resolve overlaps
    ///
    /// Longer spans win; between equal lengths the one seen first wins.
    /// Returns true if the new span survived.
    pub fn insert(&mut self, span: Span, metadata: Normalization) -> bool {
        let range = span.range();
        self.spans.push(span.with_metadata(metadata));
        self.fresh.push(true);
        self.resolve_overlaps();

        self.spans
            .iter()
            .zip(&self.fresh)
            .any(|(kept, fresh)| *fresh && kept.range() == range)
    }

    fn resolve_overlaps(&mut self) {
        let mut order: Vec<usize> = (0..self.spans.len()).collect();
        // stable: equal lengths keep collection order
        order.sort_by_key(|&i| std::cmp::Reverse(self.spans[i].len()));

        let mut kept: Vec<usize> = Vec::with_capacity(order.len());
        for i in order {
            let range = self.spans[i].range();
            if kept.iter().all(|&k| !self.spans[k].range().overlaps(&range)) {
                kept.push(i);
            }
        }

        if kept.len() == self.spans.len() {
            return;
        }
        kept.sort_unstable();

        for (i, span) in self.spans.iter().enumerate() {
            if kept.binary_search(&i).is_err() {
                tracing::debug!(
                    range = %span.range(),
                    label = span.label(),
                    "entity removed by a longer overlapping span"
                );
            }
        }

        let mut spans = std::mem::take(&mut self.spans)
            .into_iter()
            .map(Some)
            .collect::<Vec<_>>();
        self.spans = kept.iter().filter_map(|&i| spans[i].take()).collect();
        self.fresh = kept.iter().map(|&i| self.fresh[i]).collect();
    }

    /// Write the final collection into the document
    ///
    /// Entities are sorted by start token. With token fusion enabled, every
    /// new multi-token span that survived is merged into a single token and
    /// all entity ranges are renumbered to the new token stream.
    pub fn commit(self, document: &mut Document) -> CommitSummary {
        let mut entries: Vec<(Span, bool)> = self.spans.into_iter().zip(self.fresh).collect();
        entries.sort_by_key(|(span, _)| span.range());

        let mut fused = 0;
        if self.fuse_tokens {
            let ranges: Vec<TokenRange> = entries
                .iter()
                .filter(|(span, fresh)| *fresh && span.len() > 1)
                .map(|(span, _)| span.range())
                .collect();

            if !ranges.is_empty() {
                let (tokens, renumber) = fuse(document, &ranges);
                for (span, _) in &mut entries {
                    let range = span.range();
                    span.set_range(TokenRange::new(renumber[range.start], renumber[range.end]));
                }
                document.replace_tokens(tokens);
                fused = ranges.len();
            }
        }

        let promoted = entries.iter().filter(|(_, fresh)| *fresh).count();
        let entities: Vec<Span> = entries.into_iter().map(|(span, _)| span).collect();
        let summary = CommitSummary {
            entities: entities.len(),
            promoted,
            fused,
        };
        document.replace_entities(entities);
        summary
    }
}

/// Merge each range into one token; `ranges` must be sorted and disjoint
///
/// Returns the new token stream and, for every old token index, the index of
/// the token that now holds it.
fn fuse(document: &Document, ranges: &[TokenRange]) -> (Vec<Token>, Vec<usize>) {
    let old = document.tokens();
    let mut tokens = Vec::with_capacity(old.len());
    let mut renumber = vec![0; old.len()];
    let mut pending = ranges.iter().peekable();
    let mut i = 0;

    while i < old.len() {
        let index = tokens.len();
        match pending.peek() {
            Some(range) if range.start == i => {
                let first = &old[range.start];
                let text = document.range_text(**range).unwrap_or_default();
                tokens.push(Token::new(index, text, first.char_offset()));
                renumber[range.start..=range.end].fill(index);
                i = range.end + 1;
                pending.next();
            }
            _ => {
                let token = &old[i];
                tokens.push(Token::new(index, token.text(), token.char_offset()));
                renumber[i] = index;
                i += 1;
            }
        }
    }

    (tokens, renumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::TemporalExpression;

    fn document() -> Document {
        Document::from_words([
            ("în", true),
            ("perioada", true),
            ("1856-1857", true),
            (",", true),
            ("secolul", true),
            ("XIX", false),
        ])
        .unwrap()
    }

    fn meta(label: &str) -> Normalization {
        Normalization::Expression(TemporalExpression::new([label], Vec::new()))
    }

    #[test]
    fn test_longer_new_span_replaces_shorter() {
        let existing = vec![Span::new(TokenRange::single(2), "DATETIME")];
        let mut finalizer = EntitySetFinalizer::new(&existing, false);

        let kept = finalizer.insert(Span::new(TokenRange::new(1, 2), "PERIOD"), meta("p"));
        assert!(kept);
        assert_eq!(finalizer.entities().len(), 1);
        assert_eq!(finalizer.entities()[0].label(), "PERIOD");
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let existing = vec![Span::new(TokenRange::new(1, 2), "PERIOD")];
        let mut finalizer = EntitySetFinalizer::new(&existing, false);

        let kept = finalizer.insert(Span::new(TokenRange::new(2, 3), "DATETIME"), meta("d"));
        assert!(!kept);
        assert_eq!(finalizer.entities(), &existing[..]);
    }

    #[test]
    fn test_update_existing_in_place() {
        let existing = vec![Span::new(TokenRange::new(4, 5), "PERIOD")];
        let mut finalizer = EntitySetFinalizer::new(&existing, true);

        assert!(finalizer.update_existing(0, meta("XIX")));
        assert!(!finalizer.update_existing(3, meta("none")));

        let mut doc = document().with_entities(existing).unwrap();
        let summary = finalizer.commit(&mut doc);
        assert_eq!(summary.fused, 0);
        assert_eq!(doc.tokens().len(), 6);
        assert!(doc.entities()[0].metadata().is_some());
    }

    #[test]
    fn test_commit_fuses_and_renumbers() {
        let mut doc = document()
            .with_entities(vec![Span::new(TokenRange::single(3), "PUNCT")])
            .unwrap();
        let mut finalizer = EntitySetFinalizer::new(doc.entities(), true);
        assert!(finalizer.insert(Span::new(TokenRange::new(4, 5), "DATETIME"), meta("XIX")));
        assert!(finalizer.insert(Span::new(TokenRange::new(1, 2), "PERIOD"), meta("p")));

        let summary = finalizer.commit(&mut doc);
        assert_eq!(
            summary,
            CommitSummary {
                entities: 3,
                promoted: 2,
                fused: 2
            }
        );

        let texts: Vec<&str> = doc.tokens().iter().map(Token::text).collect();
        assert_eq!(texts, vec!["în", "perioada 1856-1857", ",", "secolul XIX"]);
        assert_eq!(doc.tokens()[3].char_offset(), 24);
        assert_eq!(doc.tokens()[3].index(), 3);

        let ranges: Vec<TokenRange> = doc.entities().iter().map(Span::range).collect();
        assert_eq!(
            ranges,
            vec![TokenRange::single(1), TokenRange::single(2), TokenRange::single(3)]
        );
        assert_eq!(doc.span_text(&doc.entities()[2]), Some("secolul XIX"));
    }

    #[test]
    fn test_removed_span_is_not_fused() {
        let mut doc = document()
            .with_entities(vec![Span::new(TokenRange::new(2, 4), "PERIOD")])
            .unwrap();
        let mut finalizer = EntitySetFinalizer::new(doc.entities(), true);
        assert!(!finalizer.insert(Span::new(TokenRange::new(4, 5), "DATETIME"), meta("XIX")));

        let summary = finalizer.commit(&mut doc);
        assert_eq!(summary.fused, 0);
        assert_eq!(doc.tokens().len(), 6);
    }
}
