//! Input handling module

pub mod documents;
pub mod file_reader;
pub mod glob_resolver;

pub use documents::{load_documents, InputFormat, SourceDocument};
pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;
