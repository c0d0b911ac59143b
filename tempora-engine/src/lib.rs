//! Orchestration for temporal span alignment
//!
//! This crate connects an external temporal extractor to the core aligner:
//! it tokenizes plain text, reads BIO-tagged corpora, and runs batches of
//! documents sequentially or on a rayon pool.

#![warn(missing_docs)]

pub mod error;
pub mod executor;
pub mod extractor;
pub mod input;
pub mod processor;
pub mod processor_config;
pub mod tagging;
pub mod tokenizer;

// Re-export key types
pub use error::{ApiError, ApiResult, EngineError, ExtractorError, Result};
pub use executor::{ExecutionMode, Executor};
pub use extractor::{FixtureEntry, FixtureExtractor, TemporalExtractor};
pub use input::Input;
pub use processor::{
    BatchOutput, Output, ProcessingMetadata, TemporalNormalizer, TemporalNormalizerBuilder,
};
pub use processor_config::{ProcessorConfig, ProcessorConfigBuilder};
pub use tagging::{group_timespans, parse_tagged, TagType, TaggedSentence, Timespan};
pub use tokenizer::SimpleTokenizer;

// Re-export from core for convenience
pub use tempora_core::{
    AlignConfig, AlignmentReport, BindingMode, Diagnostic, DiagnosticKind, Diagnostics, Document,
    Normalization, Span, TemporalExpression, TimeSeries, Token, TokenRange,
};
