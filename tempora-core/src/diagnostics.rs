//! Per-document diagnostics
//!
//! Recoverable conditions are collected here instead of aborting the pass.
//! Every entry is also emitted as a `tracing` event when it is recorded.

use crate::document::TokenRange;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Kind of a [`Diagnostic`], for counting and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Match offsets did not coincide with token edges
    BoundaryMismatch,
    /// Aligned candidate had no matching semantics
    NoSemanticMatch,
    /// Tagged span mixed two category types
    TagTypeInconsistency,
}

impl DiagnosticKind {
    /// Snake-case name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::BoundaryMismatch => "boundary_mismatch",
            DiagnosticKind::NoSemanticMatch => "no_semantic_match",
            DiagnosticKind::TagTypeInconsistency => "tag_type_inconsistency",
        }
    }
}

/// A recoverable problem met while processing one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A candidate occurrence straddles token edges and was dropped
    BoundaryMismatch {
        /// Text of the occurrence
        text: String,
        /// Raw char offset where it starts
        start_char: usize,
        /// Raw char offset where it ends
        end_char: usize,
    },
    /// A token-aligned candidate had no semantics and was dropped
    NoSemanticMatch {
        /// Rendered text of the resolved span
        text: String,
        /// Tokens of the resolved span
        tokens: TokenRange,
    },
    /// A continuation tag disagreed with the open span's type; the first type was kept
    TagTypeInconsistency {
        /// Type of the open span
        expected: String,
        /// Type carried by the continuation tag
        found: String,
        /// Index of the continuation token
        token_index: usize,
    },
}

impl Diagnostic {
    /// Kind of this diagnostic
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::BoundaryMismatch { .. } => DiagnosticKind::BoundaryMismatch,
            Diagnostic::NoSemanticMatch { .. } => DiagnosticKind::NoSemanticMatch,
            Diagnostic::TagTypeInconsistency { .. } => DiagnosticKind::TagTypeInconsistency,
        }
    }

    fn emit(&self) {
        match self {
            Diagnostic::NoSemanticMatch { .. } => tracing::debug!("{self}"),
            _ => tracing::warn!("{self}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::BoundaryMismatch {
                text,
                start_char,
                end_char,
            } => write!(
                f,
                "could not find tokens for match '{text}' at {start_char}-{end_char}"
            ),
            Diagnostic::NoSemanticMatch { text, tokens } => {
                write!(f, "no time series matches '{text}' at tokens {tokens}")
            }
            Diagnostic::TagTypeInconsistency {
                expected,
                found,
                token_index,
            } => write!(
                f,
                "tag type {expected} but received {found} at token {token_index}"
            ),
        }
    }
}

/// Diagnostics accumulated for one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: SmallVec<[Diagnostic; 4]>,
}

impl Diagnostics {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it as a log event
    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.entries.push(diagnostic);
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded diagnostics in order
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Number of diagnostics of one kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind() == kind).count()
    }

    /// Append every diagnostic of `other`
    pub fn append(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Convert into a plain vector
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries.into_vec()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = smallvec::IntoIter<[Diagnostic; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
