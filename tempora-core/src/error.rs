//! Core error types
//!
//! Only conditions that abort a whole document live here. Per-candidate
//! problems are reported as [`Diagnostic`](crate::Diagnostic)s instead.

use crate::document::TokenRange;
use thiserror::Error;

/// Errors that abort an alignment pass for a document
#[derive(Error, Debug)]
pub enum AlignError {
    /// The candidate alternation could not be compiled
    #[error("failed to compile candidate pattern: {0}")]
    PatternCompilation(#[from] regex::Error),
}

/// Structural problems found while building a [`Document`](crate::Document)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Token indices must run `0..n` in order
    #[error("token at position {expected} carries index {found}")]
    TokenIndex {
        /// Position of the token in the sequence
        expected: usize,
        /// Index stored on the token
        found: usize,
    },

    /// Token extends past the end of the text
    #[error("token {index} ends at char {end}, text has {len} chars")]
    TokenOutOfBounds {
        /// Token index
        index: usize,
        /// Exclusive end offset of the token
        end: usize,
        /// Text length in chars
        len: usize,
    },

    /// Token starts before the previous token ends
    #[error("token {index} overlaps the previous token")]
    TokenOverlap {
        /// Token index
        index: usize,
    },

    /// Token text differs from the document text at its offsets
    #[error("token {index} is {expected:?} but the text holds {found:?}")]
    TokenTextMismatch {
        /// Token index
        index: usize,
        /// Token text
        expected: String,
        /// Document text at the token offsets
        found: String,
    },

    /// Entity start token is after its end token
    #[error("invalid token range {start}..={end}")]
    InvalidRange {
        /// Start token index
        start: usize,
        /// End token index
        end: usize,
    },

    /// Entity references tokens past the end of the document
    #[error("entity {range} is out of bounds for {token_count} tokens")]
    EntityOutOfBounds {
        /// Offending range
        range: TokenRange,
        /// Number of tokens in the document
        token_count: usize,
    },

    /// Two entities share at least one token
    #[error("entities {first} and {second} overlap")]
    EntityOverlap {
        /// Earlier entity
        first: TokenRange,
        /// Later entity
        second: TokenRange,
    },
}

/// Result type for alignment operations
pub type Result<T> = std::result::Result<T, AlignError>;
