//! Temporal extraction collaborators
//!
//! The engine that interprets temporal language lives outside this crate.
//! It is reached through [`TemporalExtractor`]; anything that can turn a
//! document text into [`TemporalExpression`]s can be plugged in.

use crate::error::{EngineError, ExtractorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tempora_core::TemporalExpression;

/// Source of temporal expressions for a document text
pub trait TemporalExtractor: Send + Sync {
    /// Extract every temporal expression found in `text`
    fn extract(&self, text: &str) -> std::result::Result<Vec<TemporalExpression>, ExtractorError>;

    /// Name used in logs
    fn name(&self) -> &str {
        "extractor"
    }
}

impl<T: TemporalExtractor + ?Sized> TemporalExtractor for Arc<T> {
    fn extract(&self, text: &str) -> std::result::Result<Vec<TemporalExpression>, ExtractorError> {
        (**self).extract(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: TemporalExtractor + ?Sized> TemporalExtractor for Box<T> {
    fn extract(&self, text: &str) -> std::result::Result<Vec<TemporalExpression>, ExtractorError> {
        (**self).extract(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// One recorded extractor answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureEntry {
    /// Exact document text
    pub text: String,
    /// Expressions returned for that text
    #[serde(default)]
    pub expressions: Vec<TemporalExpression>,
}

/// Extractor that replays recorded answers keyed by exact text
///
/// Texts without a recording yield no expressions.
///
/// ```
/// use tempora_engine::{FixtureExtractor, TemporalExtractor};
///
/// let json = r#"[{"text": "Secolul XX", "expressions": [{"matches": ["Secolul XX"]}]}]"#;
/// let extractor = FixtureExtractor::from_json_str(json).unwrap();
/// assert_eq!(extractor.extract("Secolul XX").unwrap().len(), 1);
/// assert!(extractor.extract("ieri").unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureExtractor {
    entries: HashMap<String, Vec<TemporalExpression>>,
}

impl FixtureExtractor {
    /// Create an empty extractor
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer for a text, replacing any earlier one
    pub fn insert(&mut self, text: impl Into<String>, expressions: Vec<TemporalExpression>) {
        self.entries.insert(text.into(), expressions);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_entry(
        mut self,
        text: impl Into<String>,
        expressions: Vec<TemporalExpression>,
    ) -> Self {
        self.insert(text, expressions);
        self
    }

    /// Load recordings from a JSON array of `{text, expressions}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<FixtureEntry> =
            serde_json::from_str(json).map_err(ExtractorError::from)?;
        Ok(Self::from_entries(entries))
    }

    /// Load recordings from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Vec<FixtureEntry> =
            serde_json::from_reader(reader).map_err(ExtractorError::from)?;
        Ok(Self::from_entries(entries))
    }

    /// Load recordings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            EngineError::IoError(format!("Failed to open fixtures {}: {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Build from already parsed entries
    pub fn from_entries(entries: impl IntoIterator<Item = FixtureEntry>) -> Self {
        let mut extractor = Self::new();
        for entry in entries {
            extractor.insert(entry.text, entry.expressions);
        }
        extractor
    }

    /// Number of recorded texts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TemporalExtractor for FixtureExtractor {
    fn extract(&self, text: &str) -> std::result::Result<Vec<TemporalExpression>, ExtractorError> {
        Ok(self.entries.get(text).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "fixture"
    }
}
