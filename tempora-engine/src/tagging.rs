//! BIO-tagged corpora
//!
//! Tagged sentences come one token per line as `word<TAB>tag<TAB>space_after`,
//! with a blank line between sentences. Temporal tags are `B-`/`I-` followed
//! by `DATETIME` or `PERIOD`; anything else counts as outside.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tempora_core::{Diagnostic, Diagnostics, Document, Span, TokenRange};

/// Category of a tagged temporal span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagType {
    /// A point or interval in time
    Datetime,
    /// A duration
    Period,
}

impl TagType {
    /// Tag suffix as it appears in the corpus
    pub fn as_str(&self) -> &'static str {
        match self {
            TagType::Datetime => "DATETIME",
            TagType::Period => "PERIOD",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "DATETIME" => Some(TagType::Datetime),
            "PERIOD" => Some(TagType::Period),
            _ => None,
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run of tokens tagged as one temporal expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timespan {
    /// First token index
    pub start: usize,
    /// Last token index (inclusive)
    pub end: usize,
    /// Token texts joined by single spaces
    pub text: String,
    /// Category of the opening tag
    pub tag_type: TagType,
}

impl Timespan {
    /// Token range of the timespan
    pub fn range(&self) -> TokenRange {
        TokenRange::new(self.start, self.end)
    }
}

enum Tag {
    Begin(TagType),
    Inside(TagType),
    Outside,
}

fn classify(tag: &str) -> Tag {
    let (prefix, name) = match tag.split_once('-') {
        Some(parts) => parts,
        None => return Tag::Outside,
    };
    let Some(tag_type) = TagType::parse(name) else {
        if prefix == "B" || prefix == "I" {
            tracing::warn!(tag, "not a temporal tag type, treated as outside");
        }
        return Tag::Outside;
    };
    match prefix {
        "B" => Tag::Begin(tag_type),
        "I" => Tag::Inside(tag_type),
        _ => Tag::Outside,
    }
}

/// Group BIO tags into timespans
///
/// An `I-` tag continues the open span even if its category differs; the
/// span keeps its first category and a
/// [`TagTypeInconsistency`](Diagnostic::TagTypeInconsistency) is recorded.
/// An `I-` tag with no open span is ignored. Outside tags close the open span.
pub fn group_timespans<W, T>(
    words: &[W],
    tags: &[T],
    diagnostics: &mut Diagnostics,
) -> Vec<Timespan>
where
    W: AsRef<str>,
    T: AsRef<str>,
{
    let mut timespans = Vec::new();
    let mut open: Option<Timespan> = None;

    for (index, (word, tag)) in words.iter().zip(tags).enumerate() {
        match classify(tag.as_ref()) {
            Tag::Begin(tag_type) => {
                timespans.extend(open.take());
                open = Some(Timespan {
                    start: index,
                    end: index,
                    text: word.as_ref().to_string(),
                    tag_type,
                });
            }
            Tag::Inside(tag_type) => {
                if let Some(span) = open.as_mut() {
                    if span.tag_type != tag_type {
                        diagnostics.push(Diagnostic::TagTypeInconsistency {
                            expected: span.tag_type.to_string(),
                            found: tag_type.to_string(),
                            token_index: index,
                        });
                    }
                    span.end = index;
                    span.text.push(' ');
                    span.text.push_str(word.as_ref());
                }
            }
            Tag::Outside => timespans.extend(open.take()),
        }
    }
    timespans.extend(open);

    timespans
}

/// One sentence of a tagged corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSentence {
    /// Token texts
    pub words: Vec<String>,
    /// One tag per token
    pub tags: Vec<String>,
    /// Whether a space follows each token
    pub space_after: Vec<bool>,
}

impl TaggedSentence {
    /// Sentence text rebuilt from words and spacing
    pub fn text(&self) -> String {
        self.words
            .iter()
            .zip(&self.space_after)
            .map(|(word, space)| if *space { format!("{word} ") } else { word.clone() })
            .collect()
    }

    /// Build a document whose entities are the tagged timespans
    pub fn to_document(&self, diagnostics: &mut Diagnostics) -> Result<(Document, Vec<Timespan>)> {
        let doc = Document::from_words(
            self.words
                .iter()
                .zip(&self.space_after)
                .map(|(word, space)| (word.as_str(), *space)),
        )?;
        let timespans = group_timespans(&self.words, &self.tags, diagnostics);
        let entities = timespans
            .iter()
            .map(|span| Span::new(span.range(), span.tag_type.as_str()))
            .collect();
        let doc = doc.with_entities(entities)?;
        Ok((doc, timespans))
    }
}

/// Parse a tagged corpus into sentences
///
/// The third column is optional and defaults to a trailing space. It accepts
/// `1`/`0`, `true`/`false` and `yes`/`no`.
pub fn parse_tagged(input: &str) -> Result<Vec<TaggedSentence>> {
    let mut sentences = Vec::new();
    let mut sentence = TaggedSentence::default();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !sentence.words.is_empty() {
                sentences.push(std::mem::take(&mut sentence));
            }
            continue;
        }

        let mut columns = line.split('\t');
        let (Some(word), Some(tag)) = (columns.next(), columns.next()) else {
            return Err(EngineError::ParseError {
                line: number + 1,
                reason: "expected word and tag separated by a tab".to_string(),
            });
        };
        if word.is_empty() {
            return Err(EngineError::ParseError {
                line: number + 1,
                reason: "empty word".to_string(),
            });
        }
        let space_after = match columns.next().map(str::trim) {
            None | Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => {
                return Err(EngineError::ParseError {
                    line: number + 1,
                    reason: format!("invalid space_after value '{other}'"),
                })
            }
        };

        sentence.words.push(word.to_string());
        sentence.tags.push(tag.trim().to_string());
        sentence.space_after.push(space_after);
    }

    if !sentence.words.is_empty() {
        sentences.push(sentence);
    }
    Ok(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_core::DiagnosticKind;

    #[test]
    fn test_groups_begin_and_inside() {
        let words = ["Secolul", "XX", "a", "fost", "important"];
        let tags = ["B-DATETIME", "I-DATETIME", "O", "O", "O"];
        let mut diagnostics = Diagnostics::new();

        let spans = group_timespans(&words, &tags, &mut diagnostics);
        assert_eq!(
            spans,
            vec![Timespan {
                start: 0,
                end: 1,
                text: "Secolul XX".to_string(),
                tag_type: TagType::Datetime,
            }]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_mixed_type_keeps_first() {
        let words = ["între", "1856", "și", "1857"];
        let tags = ["B-PERIOD", "I-PERIOD", "I-DATETIME", "I-PERIOD"];
        let mut diagnostics = Diagnostics::new();

        let spans = group_timespans(&words, &tags, &mut diagnostics);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].tag_type, TagType::Period);
        assert_eq!(spans[0].text, "între 1856 și 1857");
        assert_eq!(diagnostics.count(DiagnosticKind::TagTypeInconsistency), 1);
    }

    #[test]
    fn test_adjacent_begins_and_outside() {
        let words = ["ieri", "azi", "și", "mâine", "dimineață"];
        let tags = ["B-DATETIME", "B-DATETIME", "O", "I-DATETIME", "B-PER"];
        let mut diagnostics = Diagnostics::new();

        let spans = group_timespans(&words, &tags, &mut diagnostics);
        let ranges: Vec<TokenRange> = spans.iter().map(Timespan::range).collect();
        assert_eq!(ranges, vec![TokenRange::single(0), TokenRange::single(1)]);
    }

    #[test]
    fn test_parse_and_build_document() {
        let corpus = "Secolul\tB-DATETIME\t1\nXX\tI-DATETIME\t0\n.\tO\t0\n\n\nAnul\tB-DATETIME\nx\tO\tno\n";
        let sentences = parse_tagged(corpus).unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text(), "Secolul XX.");
        assert_eq!(sentences[1].text(), "Anul x");

        let mut diagnostics = Diagnostics::new();
        let (doc, timespans) = sentences[0].to_document(&mut diagnostics).unwrap();
        assert_eq!(timespans.len(), 1);
        assert_eq!(doc.entities()[0].label(), "DATETIME");
        assert_eq!(doc.span_text(&doc.entities()[0]), Some("Secolul XX"));
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = parse_tagged("Secolul\tB-DATETIME\nXX\n").unwrap_err();
        assert!(matches!(err, EngineError::ParseError { line: 2, .. }));

        let err = parse_tagged("XX\tO\tmaybe\n").unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }
}
