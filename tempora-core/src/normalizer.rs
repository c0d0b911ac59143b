//! Accent folding for matching
//!
//! Folded text is only ever scanned, never emitted. Offsets found in folded
//! text are mapped back to raw char offsets through [`OffsetMap`].

use crate::document::CharRange;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Canonically decompose `text` and drop every nonspacing mark (`Mn`)
///
/// Spacing and enclosing marks are kept.
///
/// ```
/// assert_eq!(
///     tempora_core::fold_accents("În secolul trecut, Ștefan"),
///     "In secolul trecut, Stefan"
/// );
/// ```
pub fn fold_accents(text: &str) -> String {
    text.nfd().filter(|ch| !is_nonspacing_mark(*ch)).collect()
}

fn is_nonspacing_mark(ch: char) -> bool {
    ch.general_category() == GeneralCategory::NonspacingMark
}

/// Text prepared for scanning, with a route back to raw offsets
#[derive(Debug, Clone)]
pub struct FoldedText<'a> {
    text: Cow<'a, str>,
    origin: Option<Vec<usize>>,
    raw_len: usize,
}

impl<'a> FoldedText<'a> {
    /// Scan the raw text as is
    pub fn raw(text: &'a str) -> Self {
        Self {
            raw_len: text.chars().count(),
            text: Cow::Borrowed(text),
            origin: None,
        }
    }

    /// Scan an accent-folded copy of the text
    pub fn fold(text: &'a str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());
        let mut raw_len = 0;

        for (raw_index, ch) in text.chars().enumerate() {
            for decomposed in std::iter::once(ch).nfd() {
                if !is_nonspacing_mark(decomposed) {
                    folded.push(decomposed);
                    origin.push(raw_index);
                }
            }
            raw_len = raw_index + 1;
        }

        Self {
            text: Cow::Owned(folded),
            origin: Some(origin),
            raw_len,
        }
    }

    /// Build the view the configuration asks for
    pub fn prepare(text: &'a str, accent_fold: bool) -> Self {
        if accent_fold {
            Self::fold(text)
        } else {
            Self::raw(text)
        }
    }

    /// Text to scan
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True if the text was folded
    pub fn is_folded(&self) -> bool {
        self.origin.is_some()
    }

    /// Offset translation for ranges found in [`as_str`](Self::as_str)
    pub fn offsets(&self) -> OffsetMap<'_> {
        OffsetMap {
            origin: self.origin.as_deref(),
            raw_len: self.raw_len,
        }
    }
}

/// Maps char ranges of a scanned text onto the raw document text
#[derive(Debug, Clone, Copy)]
pub struct OffsetMap<'a> {
    origin: Option<&'a [usize]>,
    raw_len: usize,
}

impl OffsetMap<'_> {
    /// Translate a scanned range into raw char offsets
    ///
    /// The raw end runs up to the next kept char, so marks dropped after the
    /// last matched char stay inside the range.
    pub fn to_raw(&self, range: CharRange) -> CharRange {
        let Some(origin) = self.origin else {
            return range;
        };

        let start = origin.get(range.start).copied().unwrap_or(self.raw_len);
        let end = match range.end {
            0 => 0,
            end => {
                let last = origin.get(end - 1).map_or(self.raw_len, |raw| raw + 1);
                // a raw char folded into several kept chars is never split
                origin.get(end).copied().unwrap_or(self.raw_len).max(last)
            }
        };
        CharRange::new(start, end.max(start))
    }
}
