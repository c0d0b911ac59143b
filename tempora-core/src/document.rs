//! Tokenized documents and their entity spans
//!
//! All offsets are counted in Unicode scalar values (`char`s), not bytes.
//! A [`Document`] keeps a byte index per char so slicing stays O(1).

use crate::error::DocumentError;
use crate::temporal::Normalization;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open range of char offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharRange {
    /// First char of the range
    pub start: usize,
    /// One past the last char of the range
    pub end: usize,
}

impl CharRange {
    /// Create a new char range
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of chars covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True if the range covers no chars
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `other` lies entirely inside this range
    pub fn contains(&self, other: &CharRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Inclusive range of token indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenRange {
    /// First token of the range
    pub start: usize,
    /// Last token of the range (inclusive)
    pub end: usize,
}

#[allow(clippy::len_without_is_empty)]
impl TokenRange {
    /// Create a new token range; `start` must not exceed `end`
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "token range {start}..={end} is reversed");
        Self { start, end }
    }

    /// Range covering a single token
    pub fn single(index: usize) -> Self {
        Self::new(index, index)
    }

    /// Number of tokens covered (always at least one)
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// True if the two ranges share a token
    pub fn overlaps(&self, other: &TokenRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True if the token index lies in the range
    pub fn contains_index(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// A token produced by the upstream tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    index: usize,
    text: String,
    char_offset: usize,
    length: usize,
}

impl Token {
    /// Create a token; its length is the char count of `text`
    pub fn new(index: usize, text: impl Into<String>, char_offset: usize) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self {
            index,
            text,
            char_offset,
            length,
        }
    }

    /// Position of the token in its document
    pub fn index(&self) -> usize {
        self.index
    }

    /// Token text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Char offset of the first char
    pub fn char_offset(&self) -> usize {
        self.char_offset
    }

    /// Length in chars
    pub fn length(&self) -> usize {
        self.length
    }

    /// Char offset one past the last char
    pub fn char_end(&self) -> usize {
        self.char_offset + self.length
    }

    /// Char range covered by the token
    pub fn char_range(&self) -> CharRange {
        CharRange::new(self.char_offset, self.char_end())
    }
}

/// An entity span over a contiguous run of tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    range: TokenRange,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Normalization>,
}

impl Span {
    /// Create a span without metadata
    pub fn new(range: TokenRange, label: impl Into<String>) -> Self {
        Self {
            range,
            label: label.into(),
            metadata: None,
        }
    }

    /// Attach normalized semantics
    pub fn with_metadata(mut self, metadata: Normalization) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Token range of the span
    pub fn range(&self) -> TokenRange {
        self.range
    }

    /// First token index
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Last token index (inclusive)
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Number of tokens covered
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Always false; spans cover at least one token
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Category label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Bound semantics, if any
    pub fn metadata(&self) -> Option<&Normalization> {
        self.metadata.as_ref()
    }

    pub(crate) fn set_metadata(&mut self, metadata: Normalization) {
        self.metadata = Some(metadata);
    }

    pub(crate) fn set_range(&mut self, range: TokenRange) {
        self.range = range;
    }
}

/// A tokenized document with its entity collection
///
/// Construction validates the token stream against the text and checks that
/// entities are in bounds and pairwise disjoint, so every accessor can rely
/// on those invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
    entities: Vec<Span>,
    #[serde(skip)]
    char_bytes: Vec<usize>,
}

impl Document {
    /// Build a document from text, tokens and pre-existing entities
    pub fn new(
        text: impl Into<String>,
        tokens: Vec<Token>,
        entities: Vec<Span>,
    ) -> Result<Self, DocumentError> {
        let text = text.into();
        let char_bytes = char_byte_index(&text);
        let document = Self {
            text,
            tokens,
            entities,
            char_bytes,
        };
        document.validate_tokens()?;
        validate_entities(&document.entities, document.tokens.len())?;
        Ok(document)
    }

    /// Build a document from pre-split words and their trailing-space flags
    ///
    /// ```
    /// use tempora_core::Document;
    ///
    /// let doc = Document::from_words([("Secolul", true), ("XX", false), (".", false)]).unwrap();
    /// assert_eq!(doc.text(), "Secolul XX.");
    /// assert_eq!(doc.tokens()[2].char_offset(), 10);
    /// ```
    pub fn from_words<I, S>(words: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut tokens = Vec::new();
        let mut offset = 0;

        for (index, (word, space_after)) in words.into_iter().enumerate() {
            let word = word.as_ref();
            let token = Token::new(index, word, offset);
            offset = token.char_end();
            text.push_str(word);
            if space_after {
                text.push(' ');
                offset += 1;
            }
            tokens.push(token);
        }

        Self::new(text, tokens, Vec::new())
    }

    /// Replace the entity collection, re-checking bounds and overlaps
    pub fn with_entities(mut self, entities: Vec<Span>) -> Result<Self, DocumentError> {
        validate_entities(&entities, self.tokens.len())?;
        self.entities = entities;
        Ok(self)
    }

    /// Full document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Token sequence
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Entity collection
    pub fn entities(&self) -> &[Span] {
        &self.entities
    }

    /// Text length in chars
    pub fn char_len(&self) -> usize {
        self.char_bytes.len() - 1
    }

    /// Char range covered by a token range
    pub fn char_range(&self, range: TokenRange) -> Option<CharRange> {
        let start = self.tokens.get(range.start)?;
        let end = self.tokens.get(range.end)?;
        Some(CharRange::new(start.char_offset(), end.char_end()))
    }

    /// Text between two char offsets
    pub fn slice(&self, range: CharRange) -> Option<&str> {
        if range.start > range.end {
            return None;
        }
        let start = *self.char_bytes.get(range.start)?;
        let end = *self.char_bytes.get(range.end)?;
        self.text.get(start..end)
    }

    /// Text covered by a token range, including inner whitespace
    pub fn range_text(&self, range: TokenRange) -> Option<&str> {
        self.slice(self.char_range(range)?)
    }

    /// Rendered text of an entity span
    pub fn span_text(&self, span: &Span) -> Option<&str> {
        self.range_text(span.range())
    }

    pub(crate) fn replace_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
    }

    pub(crate) fn replace_entities(&mut self, entities: Vec<Span>) {
        self.entities = entities;
    }

    fn validate_tokens(&self) -> Result<(), DocumentError> {
        let len = self.char_len();
        let mut previous_end = 0;

        for (position, token) in self.tokens.iter().enumerate() {
            if token.index != position {
                return Err(DocumentError::TokenIndex {
                    expected: position,
                    found: token.index,
                });
            }
            if token.char_end() > len {
                return Err(DocumentError::TokenOutOfBounds {
                    index: position,
                    end: token.char_end(),
                    len,
                });
            }
            if token.char_offset < previous_end {
                return Err(DocumentError::TokenOverlap { index: position });
            }

            let found = self.slice(token.char_range()).unwrap_or_default();
            if found != token.text {
                return Err(DocumentError::TokenTextMismatch {
                    index: position,
                    expected: token.text.clone(),
                    found: found.to_string(),
                });
            }
            previous_end = token.char_end();
        }

        Ok(())
    }
}

fn char_byte_index(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect()
}

fn validate_entities(entities: &[Span], token_count: usize) -> Result<(), DocumentError> {
    for span in entities {
        let range = span.range();
        if range.start > range.end {
            return Err(DocumentError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end >= token_count {
            return Err(DocumentError::EntityOutOfBounds { range, token_count });
        }
    }

    let mut ranges: Vec<TokenRange> = entities.iter().map(Span::range).collect();
    ranges.sort();
    for pair in ranges.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(DocumentError::EntityOverlap {
                first: pair[0],
                second: pair[1],
            });
        }
    }

    Ok(())
}

/// Wire shape of a token; `index` and `length` may be omitted
#[derive(Debug, Deserialize)]
struct RawToken {
    #[serde(default)]
    index: Option<usize>,
    text: String,
    char_offset: usize,
    #[serde(default)]
    length: Option<usize>,
}

/// Wire shape of a document, validated on conversion
#[derive(Debug, Deserialize)]
struct RawDocument {
    text: String,
    tokens: Vec<RawToken>,
    #[serde(default)]
    entities: Vec<Span>,
}

impl TryFrom<RawDocument> for Document {
    type Error = DocumentError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let tokens = raw
            .tokens
            .into_iter()
            .enumerate()
            .map(|(position, token)| {
                let mut built = Token::new(
                    token.index.unwrap_or(position),
                    token.text,
                    token.char_offset,
                );
                if let Some(length) = token.length {
                    built.length = length;
                }
                built
            })
            .collect();

        Document::new(raw.text, tokens, raw.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secolul() -> Document {
        Document::from_words([
            ("Secolul", true),
            ("XX", true),
            ("a", true),
            ("fost", true),
            ("important", false),
            (".", false),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_words_offsets() {
        let doc = secolul();
        assert_eq!(doc.text(), "Secolul XX a fost important.");
        let offsets: Vec<usize> = doc.tokens().iter().map(Token::char_offset).collect();
        assert_eq!(offsets, vec![0, 8, 11, 13, 18, 27]);
    }

    #[test]
    fn test_range_text_includes_whitespace() {
        let doc = secolul();
        assert_eq!(doc.range_text(TokenRange::new(0, 1)), Some("Secolul XX"));
        assert_eq!(doc.range_text(TokenRange::new(4, 9)), None);
    }

    #[test]
    fn test_multibyte_slicing() {
        let doc =
            Document::from_words([("În", true), ("secolul", true), ("trecut", false)]).unwrap();
        assert_eq!(doc.char_len(), 17);
        assert_eq!(doc.range_text(TokenRange::new(0, 1)), Some("În secolul"));
        assert_eq!(doc.tokens()[1].char_offset(), 3);
    }

    #[test]
    fn test_rejects_mismatched_token_text() {
        let tokens = vec![Token::new(0, "Secolul", 0), Token::new(1, "XY", 8)];
        let err = Document::new("Secolul XX", tokens, Vec::new()).unwrap_err();
        assert!(matches!(err, DocumentError::TokenTextMismatch { index: 1, .. }));
    }

    #[test]
    fn test_rejects_bad_token_index() {
        let tokens = vec![Token::new(0, "Secolul", 0), Token::new(5, "XX", 8)];
        let err = Document::new("Secolul XX", tokens, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            DocumentError::TokenIndex {
                expected: 1,
                found: 5
            }
        );
    }

    #[test]
    fn test_rejects_overlapping_entities() {
        let err = secolul()
            .with_entities(vec![
                Span::new(TokenRange::new(0, 1), "DATETIME"),
                Span::new(TokenRange::new(1, 2), "PERIOD"),
            ])
            .unwrap_err();
        assert!(matches!(err, DocumentError::EntityOverlap { .. }));
    }

    #[test]
    fn test_rejects_out_of_bounds_entity() {
        let err = secolul()
            .with_entities(vec![Span::new(TokenRange::new(5, 6), "DATETIME")])
            .unwrap_err();
        assert!(matches!(err, DocumentError::EntityOutOfBounds { .. }));
    }

    #[test]
    fn test_deserialize_fills_index_and_length() {
        let json = r#"{
            "text": "Sec. 21",
            "tokens": [
                {"text": "Sec.", "char_offset": 0},
                {"text": "21", "char_offset": 5}
            ]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.tokens()[1].index(), 1);
        assert_eq!(doc.tokens()[1].length(), 2);
        assert_eq!(doc.slice(CharRange::new(5, 7)), Some("21"));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"text": "ab", "tokens": [{"text": "abc", "char_offset": 0}]}"#;
        assert!(serde_json::from_str::<Document>(json).is_err());
    }

    #[test]
    fn test_token_range_overlap() {
        let a = TokenRange::new(0, 2);
        assert!(a.overlaps(&TokenRange::new(2, 4)));
        assert!(!a.overlaps(&TokenRange::new(3, 4)));
        assert_eq!(a.len(), 3);
        assert!(a.contains_index(1));
    }
}
