//! Data Transfer Objects for API

use crate::error::Result;
use std::io::Read;
use std::path::PathBuf;
use tempora_engine::{Diagnostic, Document, Normalization, Span, TimeSeries, Token};

/// Input source for processing
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Raw text string, tokenized before alignment
    Text(String),
    /// File path
    File(PathBuf),
    /// Raw bytes (UTF-8)
    Bytes(Vec<u8>),
    /// Reader (not serializable)
    #[cfg_attr(feature = "serde", serde(skip))]
    Reader(Box<dyn Read + Send>),
    /// Pre-tokenized document, possibly carrying entities
    Document(Document),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<dyn Read>").finish(),
            Input::Document(doc) => f.debug_tuple("Document").field(&doc.tokens().len()).finish(),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from file path
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Create input from a tokenized document
    pub fn from_document(document: Document) -> Self {
        Input::Document(document)
    }

    pub(crate) fn into_engine(self) -> tempora_engine::Input {
        match self {
            Input::Text(text) => tempora_engine::Input::Text(text),
            Input::File(path) => tempora_engine::Input::File(path),
            Input::Bytes(bytes) => tempora_engine::Input::Bytes(bytes),
            Input::Reader(reader) => tempora_engine::Input::Reader(reader),
            Input::Document(doc) => tempora_engine::Input::Document(doc),
        }
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::from_text(text)
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<Document> for Input {
    fn from(doc: Document) -> Self {
        Input::Document(doc)
    }
}

/// Token of the processed document
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenDTO {
    /// Position in the token sequence
    pub index: usize,
    /// Token text
    pub text: String,
    /// Char offset in the document text
    pub char_offset: usize,
}

impl From<&Token> for TokenDTO {
    fn from(token: &Token) -> Self {
        Self {
            index: token.index(),
            text: token.text().to_string(),
            char_offset: token.char_offset(),
        }
    }
}

/// Normalized time series attached to an entity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeriesDTO {
    /// Text the engine was given
    pub input_value: String,
    /// Text after engine preprocessing
    pub prepared_value: String,
    /// Surface texts this series was recognized from
    pub matches: Vec<String>,
    /// Start edge URI
    pub start_uri: String,
    /// Start edge label
    pub start_label: String,
    /// End edge URI
    pub end_uri: String,
    /// End edge label
    pub end_label: String,
    /// Period URIs
    pub periods: Vec<String>,
}

impl From<&TimeSeries> for TimeSeriesDTO {
    fn from(series: &TimeSeries) -> Self {
        Self {
            input_value: series.input_value.clone(),
            prepared_value: series.prepared_value.clone(),
            matches: series.matches.clone(),
            start_uri: series.edges.start.uri.clone(),
            start_label: series.edges.start.label.clone(),
            end_uri: series.edges.end.uri.clone(),
            end_label: series.edges.end.label.clone(),
            periods: series.period_uris().map(str::to_string).collect(),
        }
    }
}

/// Entity of the processed document
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityDTO {
    /// First token index
    pub start_token: usize,
    /// Last token index (inclusive)
    pub end_token: usize,
    /// Char offset of the first token
    pub start_char: usize,
    /// Char offset just past the last token
    pub end_char: usize,
    /// Covered text
    pub text: String,
    /// Category label
    pub label: String,
    /// `series` or `expression` when semantics are bound
    pub binding: Option<String>,
    /// Matches of the bound expression (expression binding only)
    pub matches: Vec<String>,
    /// Bound time series
    pub time_series: Vec<TimeSeriesDTO>,
}

impl EntityDTO {
    /// Describe a span of `document`
    pub fn from_span(document: &Document, span: &Span) -> Self {
        let (start_char, end_char) = document
            .char_range(span.range())
            .map(|range| (range.start, range.end))
            .unwrap_or_default();
        let (binding, matches) = match span.metadata() {
            Some(Normalization::Series(_)) => (Some("series".to_string()), Vec::new()),
            Some(Normalization::Expression(expression)) => {
                (Some("expression".to_string()), expression.matches.clone())
            }
            None => (None, Vec::new()),
        };
        Self {
            start_token: span.start(),
            end_token: span.end(),
            start_char,
            end_char,
            text: document.span_text(span).unwrap_or_default().to_string(),
            label: span.label().to_string(),
            binding,
            matches,
            time_series: span
                .metadata()
                .map(|metadata| metadata.time_series().iter().map(TimeSeriesDTO::from).collect())
                .unwrap_or_default(),
        }
    }

    /// Whether the entity carries semantics
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }
}

/// Recoverable problem met while processing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticDTO {
    /// Snake-case kind name
    pub kind: String,
    /// Human readable description
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticDTO {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            kind: diagnostic.kind().as_str().to_string(),
            message: diagnostic.to_string(),
        }
    }
}

/// Processing metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Extractor that produced the expressions
    pub extractor: String,
    /// Expressions used for alignment
    pub expressions: usize,
    /// Expressions skipped for having no matches
    pub invalid_expressions: usize,
    /// Occurrences found in the text
    pub candidates: usize,
    /// New entities added
    pub promoted: usize,
    /// Existing entities that received semantics
    pub updated: usize,
    /// Spans fused into single tokens
    pub fused: usize,
    /// Token count before alignment
    pub tokens_before: usize,
    /// Token count after alignment
    pub tokens_after: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
}

/// Processing output
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output {
    /// Document text
    pub text: String,
    /// Tokens after alignment
    pub tokens: Vec<TokenDTO>,
    /// Finalized entities, ordered by start token
    pub entities: Vec<EntityDTO>,
    /// Diagnostics in the order they were recorded
    pub diagnostics: Vec<DiagnosticDTO>,
    /// Processing metadata
    pub metadata: Metadata,
}

impl Output {
    pub(crate) fn from_engine(output: tempora_engine::Output) -> Self {
        let tempora_engine::Output {
            document,
            report,
            metadata,
        } = output;
        Self {
            text: document.text().to_string(),
            tokens: document.tokens().iter().map(TokenDTO::from).collect(),
            entities: document
                .entities()
                .iter()
                .map(|span| EntityDTO::from_span(&document, span))
                .collect(),
            diagnostics: report.diagnostics.iter().map(DiagnosticDTO::from).collect(),
            metadata: Metadata {
                extractor: metadata.extractor,
                expressions: metadata.expressions,
                invalid_expressions: metadata.invalid_expressions,
                candidates: report.candidates,
                promoted: report.promoted,
                updated: report.updated,
                fused: report.fused,
                tokens_before: metadata.tokens_before,
                tokens_after: metadata.tokens_after,
                processing_time_ms: metadata.processing_time_ms,
            },
        }
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether there are no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities carrying semantics
    pub fn bound_entities(&self) -> impl Iterator<Item = &EntityDTO> {
        self.entities.iter().filter(|entity| entity.is_bound())
    }

    /// Serialize as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
