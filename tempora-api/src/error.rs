//! Error types for the public API

use thiserror::Error;

/// Errors surfaced by the public API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Failure inside the alignment engine
    #[error("Engine error: {0}")]
    Engine(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extractor answers or documents could not be (de)serialized
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<tempora_engine::ApiError> for ApiError {
    fn from(error: tempora_engine::ApiError) -> Self {
        match error {
            tempora_engine::ApiError::UnsupportedPreset { name } => {
                ApiError::Config(format!("unknown preset '{name}'"))
            }
            tempora_engine::ApiError::ConfigurationError { path, error } => {
                ApiError::Config(format!("{path}: {error}"))
            }
            tempora_engine::ApiError::Engine(inner) => inner.into(),
            other => ApiError::Engine(other.to_string()),
        }
    }
}

impl From<tempora_engine::EngineError> for ApiError {
    fn from(error: tempora_engine::EngineError) -> Self {
        match error {
            tempora_engine::EngineError::ConfigError(message) => ApiError::Config(message),
            other => ApiError::Engine(other.to_string()),
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
