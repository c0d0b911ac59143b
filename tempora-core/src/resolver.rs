//! Entity resolution
//!
//! Decides whether an aligned candidate is already covered by an entity.
//! Nothing is mutated here; the finalizer applies the decision.

use crate::document::{CharRange, Document, Span, TokenRange};

/// Outcome of resolving one candidate
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// An entity already covers the candidate's chars
    Existing {
        /// Position of the entity in the working collection
        index: usize,
    },
    /// The candidate needs a new entity
    New(Span),
}

impl Resolution {
    /// True if the candidate resolved to an existing entity
    pub fn is_pre_existing(&self) -> bool {
        matches!(self, Resolution::Existing { .. })
    }
}

/// Resolve a candidate against the current entity collection
///
/// `chars` is the candidate's raw char range and `tokens` the token range it
/// was mapped onto. The first entity whose char range contains `chars` wins.
pub fn resolve(
    document: &Document,
    entities: &[Span],
    chars: CharRange,
    tokens: TokenRange,
    label: &str,
) -> Resolution {
    let covering = entities.iter().position(|entity| {
        document
            .char_range(entity.range())
            .is_some_and(|range| range.contains(&chars))
    });

    match covering {
        Some(index) => Resolution::Existing { index },
        None => Resolution::New(Span::new(tokens, label)),
    }
}
