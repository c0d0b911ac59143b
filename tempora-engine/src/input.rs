//! Input abstraction for document processing
//!
//! Plain text inputs are tokenized with the processor's
//! [`SimpleTokenizer`](crate::SimpleTokenizer); pre-tokenized documents go
//! through [`Input::Document`] untouched.

use crate::error::{EngineError, Result};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tempora_core::Document;

/// Unified input abstraction
pub enum Input {
    /// Direct text string
    Text(String),
    /// File path to read text from
    File(PathBuf),
    /// Bytes to decode as UTF-8 text
    Bytes(Vec<u8>),
    /// Reader stream (for stdin, pipes, etc.)
    Reader(Box<dyn Read + Send>),
    /// Already tokenized document, possibly with entities
    Document(Document),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
            Input::Document(doc) => f
                .debug_tuple("Document")
                .field(&format!("<{} tokens>", doc.tokens().len()))
                .finish(),
        }
    }
}

impl Input {
    /// Create input from a text string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
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

    /// Read the raw text, or hand back the document as is
    pub(crate) fn resolve(self) -> Result<Resolved> {
        match self {
            Input::Text(text) => Ok(Resolved::Text(text)),
            Input::File(path) => fs::read_to_string(&path)
                .map(Resolved::Text)
                .map_err(|e| EngineError::IoError(format!("Failed to read file {path:?}: {e}"))),
            Input::Bytes(bytes) => String::from_utf8(bytes)
                .map(Resolved::Text)
                .map_err(|e| EngineError::EncodingError(format!("Invalid UTF-8: {e}"))),
            Input::Reader(mut reader) => {
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer).map_err(|e| {
                    EngineError::IoError(format!("Failed to read from stream: {e}"))
                })?;
                String::from_utf8(buffer).map(Resolved::Text).map_err(|e| {
                    EngineError::EncodingError(format!("Invalid UTF-8 from stream: {e}"))
                })
            }
            Input::Document(doc) => Ok(Resolved::Document(doc)),
        }
    }

    /// Size of the text in bytes, if known without reading
    pub fn estimated_size(&self) -> Option<usize> {
        match self {
            Input::Text(text) => Some(text.len()),
            Input::Bytes(bytes) => Some(bytes.len()),
            Input::File(path) => fs::metadata(path).ok().map(|m| m.len() as usize),
            Input::Reader(_) => None,
            Input::Document(doc) => Some(doc.text().len()),
        }
    }
}

pub(crate) enum Resolved {
    Text(String),
    Document(Document),
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl From<Document> for Input {
    fn from(doc: Document) -> Self {
        Input::Document(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_utf8_bytes() {
        let err = Input::from_bytes(vec![0xff, 0xfe]).resolve().err().unwrap();
        assert!(matches!(err, EngineError::EncodingError(_)));
    }

    #[test]
    fn test_reader_input() {
        let input = Input::from_reader(std::io::Cursor::new("anul 1962".as_bytes().to_vec()));
        assert_eq!(input.estimated_size(), None);
        match input.resolve().ok() {
            Some(Resolved::Text(text)) => assert_eq!(text, "anul 1962"),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Input::from_file("/nonexistent/input.txt").resolve().err().unwrap();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
