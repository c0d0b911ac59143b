//! Output formatting module

use anyhow::Result;
use tempora_api::Output;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the result for one document
    fn format_document(&mut self, source: &str, output: &Output) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod pipe;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use pipe::PipeFormatter;
pub use text::TextFormatter;
