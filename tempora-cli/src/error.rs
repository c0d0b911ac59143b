//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Input file could not be turned into documents
    InvalidInput(String),
    /// Processing error from the engine
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("corpus.tsv".to_string()).to_string(),
            "File not found: corpus.tsv"
        );
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::ConfigError("unknown preset 'fast'".to_string()).to_string(),
            "Configuration error: unknown preset 'fast'"
        );
        assert_eq!(
            CliError::InvalidInput("line 3: empty word".to_string()).to_string(),
            "Invalid input: line 3: empty word"
        );
        assert!(CliError::ProcessingError("extractor unavailable".to_string())
            .to_string()
            .starts_with("Processing error:"));
    }

    #[test]
    fn test_error_with_diacritics() {
        let error = CliError::FileNotFound("date/secolul_XX_ștefan.txt".to_string());
        assert_eq!(
            error.to_string(),
            "File not found: date/secolul_XX_ștefan.txt"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        let result: CliResult<()> = Err(CliError::ConfigError("bad".to_string()).into());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
