//! Offset scanning
//!
//! The regex engine reports byte offsets into the scanned text. They are
//! turned into char offsets incrementally, then into raw document offsets.

use crate::document::CharRange;
use crate::normalizer::OffsetMap;
use regex::{Matches, Regex};

/// A candidate occurrence in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    /// Raw char offsets of the occurrence
    pub range: CharRange,
    /// Matched text as it appears in the scanned (possibly folded) text
    pub text: String,
}

/// Lazy left-to-right scan over one text
///
/// Matches never overlap and come out in increasing offset order. The scan
/// is single-pass; rerun [`CandidateMatcher::scan`](crate::CandidateMatcher::scan)
/// to start over.
pub struct OffsetScanner<'r, 'h> {
    matches: Option<Matches<'r, 'h>>,
    haystack: &'h str,
    offsets: OffsetMap<'h>,
    byte_cursor: usize,
    char_cursor: usize,
}

impl<'r, 'h> OffsetScanner<'r, 'h> {
    pub(crate) fn new(regex: Option<&'r Regex>, haystack: &'h str, offsets: OffsetMap<'h>) -> Self {
        Self {
            matches: regex.map(|regex| regex.find_iter(haystack)),
            haystack,
            offsets,
            byte_cursor: 0,
            char_cursor: 0,
        }
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        self.char_cursor += self.haystack[self.byte_cursor..byte].chars().count();
        self.byte_cursor = byte;
        self.char_cursor
    }
}

impl Iterator for OffsetScanner<'_, '_> {
    type Item = ScanMatch;

    fn next(&mut self) -> Option<Self::Item> {
        let found = self.matches.as_mut()?.next()?;
        let start = self.char_offset(found.start());
        let end = self.char_offset(found.end());

        Some(ScanMatch {
            range: self.offsets.to_raw(CharRange::new(start, end)),
            text: found.as_str().to_string(),
        })
    }
}
