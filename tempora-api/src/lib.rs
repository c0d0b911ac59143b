//! Public API for tempora temporal span alignment
//!
//! This crate provides a stable interface over the alignment engine: inputs
//! go in, plain data transfer objects come out, and engine types stay
//! behind the [`TemporalProcessor`] facade.
//!
//! ```
//! use tempora_api::{Edge, FixtureExtractor, TemporalExpression, TemporalProcessor, TimeSeries};
//!
//! let century = TimeSeries::new(
//!     "Secolul XX",
//!     "secolul XX",
//!     Edge::new("http://example.org/1901"),
//!     Edge::new("http://example.org/2000"),
//! )
//! .with_matches(["Secolul XX"]);
//! let extractor = FixtureExtractor::new().with_entry(
//!     "Secolul XX a fost important.",
//!     vec![TemporalExpression::new(["Secolul XX"], vec![century])],
//! );
//!
//! let processor = TemporalProcessor::new(extractor).unwrap();
//! let output = processor.process_text("Secolul XX a fost important.").unwrap();
//! assert_eq!(output.entities.len(), 1);
//! assert_eq!(output.entities[0].text, "Secolul XX");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use error::Result;
use std::sync::Arc;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{DiagnosticDTO, EntityDTO, Input, Metadata, Output, TimeSeriesDTO, TokenDTO};
pub use error::ApiError;
pub use tempora_engine::{
    BindingMode, Document, ExecutionMode, ExtractorError, FixtureEntry, FixtureExtractor,
    TemporalExpression, TemporalExtractor, TimeSeries,
};
pub use tempora_core::{Edge, Period};

/// Main entry point for temporal alignment
///
/// Wraps the engine normalizer; cheap to clone and safe to share across
/// threads.
#[derive(Clone)]
pub struct TemporalProcessor {
    inner: Arc<tempora_engine::TemporalNormalizer>,
    config: Config,
}

impl std::fmt::Debug for TemporalProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporalProcessor")
            .field("inner", &self.inner)
            .field("config", &self.config)
            .finish()
    }
}

impl TemporalProcessor {
    /// Create a processor with the default (series) configuration
    pub fn new<E: TemporalExtractor + 'static>(extractor: E) -> Result<Self> {
        Self::with_config(extractor, Config::default())
    }

    /// Create a processor from a named preset
    pub fn with_preset<E: TemporalExtractor + 'static>(extractor: E, preset: &str) -> Result<Self> {
        Self::with_config(extractor, Config::preset(preset)?)
    }

    /// Create a processor with custom configuration
    pub fn with_config<E: TemporalExtractor + 'static>(
        extractor: E,
        config: Config,
    ) -> Result<Self> {
        let inner = tempora_engine::TemporalNormalizer::with_config(
            extractor,
            config.processor_config().clone(),
        )?;
        Ok(Self {
            inner: Arc::new(inner),
            config,
        })
    }

    /// Process input and return the finalized entities
    pub fn process(&self, input: Input) -> Result<Output> {
        let output = self.inner.process(input.into_engine())?;
        Ok(Output::from_engine(output))
    }

    /// Process text directly (convenience method)
    pub fn process_text(&self, text: &str) -> Result<Output> {
        self.process(Input::from_text(text))
    }

    /// Process several inputs; one result per input, in input order
    pub fn process_batch(&self, inputs: Vec<Input>) -> Result<Vec<Result<Output>>> {
        let batch = self
            .inner
            .process_batch(inputs.into_iter().map(Input::into_engine).collect())?;
        Ok(batch
            .outputs
            .into_iter()
            .map(|output| output.map(Output::from_engine).map_err(ApiError::from))
            .collect())
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// Convenience functions

/// Process text with the default configuration
pub fn process_text<E: TemporalExtractor + 'static>(text: &str, extractor: E) -> Result<Output> {
    TemporalProcessor::new(extractor)?.process(Input::from_text(text))
}

/// Process a file with the default configuration
pub fn process_file<P, E>(path: P, extractor: E) -> Result<Output>
where
    P: AsRef<std::path::Path>,
    E: TemporalExtractor + 'static,
{
    TemporalProcessor::new(extractor)?.process(Input::from_file(path.as_ref().to_path_buf()))
}

/// Process text with a named preset
pub fn process_text_with_preset<E: TemporalExtractor + 'static>(
    text: &str,
    extractor: E,
    preset: &str,
) -> Result<Output> {
    TemporalProcessor::with_preset(extractor, preset)?.process(Input::from_text(text))
}
