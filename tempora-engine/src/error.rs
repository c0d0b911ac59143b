//! Layered error types
//!
//! Core errors are wrapped by [`EngineError`], which in turn is wrapped by
//! [`ApiError`] at the public boundary.

use tempora_core::{AlignError, DocumentError};
use thiserror::Error;

/// Failure reported by a [`TemporalExtractor`](crate::TemporalExtractor)
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The extractor could not be reached or produced no answer
    #[error("extractor unavailable: {0}")]
    Unavailable(String),

    /// The extractor answered with something that is not a list of expressions
    #[error("malformed extractor response: {0}")]
    MalformedResponse(String),
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Alignment failed for a document
    #[error("alignment error: {0}")]
    Align(#[from] AlignError),

    /// A document was structurally invalid
    #[error("invalid document: {0}")]
    Document(#[from] DocumentError),

    /// The external extractor failed
    #[error("extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    /// Thread pool could not be created
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// Encoding error (UTF-8, etc.)
    #[error("encoding error: {0}")]
    EncodingError(String),

    /// Input could not be parsed
    #[error("parse error at line {line}: {reason}")]
    ParseError {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },
}

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unknown alignment preset
    #[error("preset '{name}' not supported")]
    UnsupportedPreset {
        /// The preset name that is not supported
        name: String,
    },

    /// Invalid input
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// The reason why the input is invalid
        reason: String,
    },

    /// Configuration error with path information
    #[error("configuration error in {path}: {error}")]
    ConfigurationError {
        /// The configuration file path
        path: String,
        /// The specific error that occurred
        error: String,
    },

    /// Engine layer error
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for EngineError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        EngineError::EncodingError(err.to_string())
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(err: serde_json::Error) -> Self {
        ExtractorError::MalformedResponse(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Result type for API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;
