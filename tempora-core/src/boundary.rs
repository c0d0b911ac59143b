//! Token boundary mapping

use crate::document::{CharRange, Token, TokenRange};
use std::collections::HashMap;

/// Start and end offsets of every token, indexed for exact lookup
#[derive(Debug, Clone, Default)]
pub struct TokenBoundaries {
    starts: HashMap<usize, usize>,
    ends: HashMap<usize, usize>,
}

impl TokenBoundaries {
    /// Index the token sequence of a document
    pub fn new(tokens: &[Token]) -> Self {
        let mut starts = HashMap::with_capacity(tokens.len());
        let mut ends = HashMap::with_capacity(tokens.len());

        for token in tokens {
            starts.insert(token.char_offset(), token.index());
            ends.insert(token.char_end(), token.index());
        }

        Self { starts, ends }
    }

    /// Token range whose edges coincide exactly with `range`
    ///
    /// Returns `None` when either edge falls inside a token or between
    /// tokens; such matches are not guessed at.
    pub fn map(&self, range: CharRange) -> Option<TokenRange> {
        let start = *self.starts.get(&range.start)?;
        let end = *self.ends.get(&range.end)?;
        (start <= end).then(|| TokenRange::new(start, end))
    }
}
