//! Span alignment and entity merge for normalized temporal expressions
//!
//! An external engine reads a document and returns the substrings it
//! recognized as temporal expressions together with their normalized
//! semantics. This crate reconciles those results with the document's own
//! tokens and entities:
//!
//! 1. the text is optionally accent-folded for matching ([`FoldedText`])
//! 2. all candidate substrings are compiled into one escaped,
//!    case-insensitive alternation ([`CandidateMatcher`])
//! 3. occurrences are scanned left to right in char offsets ([`OffsetScanner`])
//! 4. each occurrence must start and end on token edges ([`TokenBoundaries`])
//! 5. it either lands in an existing entity or becomes a new span ([`resolve`])
//! 6. semantics are attached by matching the span text ([`SemanticBinder`])
//! 7. the entity set is merged, longest span wins, and committed
//!    ([`EntitySetFinalizer`])
//!
//! Recoverable problems are collected as [`Diagnostic`]s; only a pattern
//! that fails to compile aborts a document.
//!
//! # Example
//!
//! ```rust
//! use tempora_core::{Aligner, AlignConfig, Document, Edge, TemporalExpression, TimeSeries};
//!
//! let mut doc = Document::from_words([
//!     ("Secolul", true),
//!     ("XX", true),
//!     ("a", true),
//!     ("fost", true),
//!     ("important", false),
//!     (".", false),
//! ])
//! .unwrap();
//!
//! let century = TimeSeries::new(
//!     "Secolul XX",
//!     "secolul XX",
//!     Edge::new("century:20:start"),
//!     Edge::new("century:20:end"),
//! )
//! .with_matches(["Secolul XX"]);
//! let expressions = vec![TemporalExpression::new(["Secolul XX"], vec![century])];
//!
//! let aligner = Aligner::new(AlignConfig::series());
//! let report = aligner.align(&mut doc, &expressions).unwrap();
//!
//! assert!(report.diagnostics.is_empty());
//! assert_eq!(doc.entities().len(), 1);
//! assert_eq!(doc.tokens()[0].text(), "Secolul XX");
//! ```

#![warn(missing_docs)]

pub mod aligner;
pub mod binder;
pub mod boundary;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod finalizer;
pub mod normalizer;
pub mod pattern;
pub mod resolver;
pub mod scanner;
pub mod temporal;

pub use aligner::{Aligner, AlignmentReport};
pub use binder::{BindingMode, SemanticBinder};
pub use boundary::TokenBoundaries;
pub use config::{AlignConfig, DATETIME_LABEL, DATE_LABEL};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use document::{CharRange, Document, Span, Token, TokenRange};
pub use error::{AlignError, DocumentError, Result};
pub use finalizer::{CommitSummary, EntitySetFinalizer};
pub use normalizer::{fold_accents, FoldedText, OffsetMap};
pub use pattern::CandidateMatcher;
pub use resolver::{resolve, Resolution};
pub use scanner::{OffsetScanner, ScanMatch};
pub use temporal::{Edge, Edges, Normalization, Period, TemporalExpression, TimeSeries};
