//! Temporal normalizer and builder
//!
//! [`TemporalNormalizer`] composes an extractor with an aligner: the
//! extractor reads the document text, invalid expressions are dropped, and
//! the aligner merges the rest into the document's entities.

use crate::{
    error::{ApiError, ApiResult, EngineError},
    executor::{auto_select, ExecutionMode, Executor, SequentialExecutor},
    extractor::TemporalExtractor,
    input::{Input, Resolved},
    processor_config::{ProcessorConfig, ProcessorConfigBuilder},
    tokenizer::SimpleTokenizer,
};
use std::sync::Arc;
use std::time::Instant;
use tempora_core::{AlignConfig, Aligner, AlignmentReport, Document};

/// Extracts, aligns and normalizes temporal expressions in documents
pub struct TemporalNormalizer {
    extractor: Arc<dyn TemporalExtractor>,
    aligner: Aligner,
    tokenizer: SimpleTokenizer,
    config: ProcessorConfig,
}

/// Processed document with its report
#[derive(Debug, Clone)]
pub struct Output {
    /// Document with the committed entity set
    pub document: Document,
    /// What alignment did
    pub report: AlignmentReport,
    /// Processing metadata
    pub metadata: ProcessingMetadata,
}

/// Processing metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingMetadata {
    /// Name of the extractor that produced the expressions
    pub extractor: String,
    /// Expressions passed to alignment
    pub expressions: usize,
    /// Expressions skipped for having no usable match
    pub invalid_expressions: usize,
    /// Token count before alignment
    pub tokens_before: usize,
    /// Token count after alignment
    pub tokens_after: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
}

/// Results of a batch, in input order
#[derive(Debug)]
pub struct BatchOutput {
    /// One result per input
    pub outputs: Vec<ApiResult<Output>>,
    /// Execution mode that was actually used
    pub execution_mode: ExecutionMode,
    /// Wall time for the whole batch in milliseconds
    pub processing_time_ms: f64,
}

impl BatchOutput {
    /// Number of inputs that failed
    pub fn failures(&self) -> usize {
        self.outputs.iter().filter(|output| output.is_err()).count()
    }
}

impl std::fmt::Debug for TemporalNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporalNormalizer")
            .field("extractor", &self.extractor.name())
            .field("config", &self.config)
            .finish()
    }
}

impl TemporalNormalizer {
    /// Create a normalizer with the default configuration
    pub fn new<E: TemporalExtractor + 'static>(extractor: E) -> ApiResult<Self> {
        Self::with_config(extractor, ProcessorConfig::default())
    }

    /// Create a normalizer with a named preset
    pub fn with_preset<E: TemporalExtractor + 'static>(
        extractor: E,
        preset: &str,
    ) -> ApiResult<Self> {
        let config = ProcessorConfig::preset(preset).ok_or_else(|| ApiError::UnsupportedPreset {
            name: preset.to_string(),
        })?;
        Self::with_config(extractor, config)
    }

    /// Create a normalizer with custom configuration
    pub fn with_config<E: TemporalExtractor + 'static>(
        extractor: E,
        config: ProcessorConfig,
    ) -> ApiResult<Self> {
        Self::with_shared(Arc::new(extractor), config)
    }

    /// Create a normalizer around an extractor shared with other owners
    pub fn with_shared(
        extractor: Arc<dyn TemporalExtractor>,
        config: ProcessorConfig,
    ) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self {
            extractor,
            aligner: Aligner::new(config.align.clone()),
            tokenizer: SimpleTokenizer::new(),
            config,
        })
    }

    /// Replace the tokenizer used for plain text inputs
    pub fn with_tokenizer(mut self, tokenizer: SimpleTokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Alignment settings
    pub fn align_config(&self) -> &AlignConfig {
        self.aligner.config()
    }

    /// Process one input
    pub fn process(&self, input: Input) -> ApiResult<Output> {
        let document = match input.resolve()? {
            Resolved::Text(text) => self
                .tokenizer
                .document(text)
                .map_err(EngineError::Document)?,
            Resolved::Document(doc) => doc,
        };
        self.process_document(document)
    }

    /// Process text string directly (convenience method)
    pub fn process_text(&self, text: &str) -> ApiResult<Output> {
        self.process(Input::from_text(text))
    }

    /// Extract expressions for a tokenized document and align them
    pub fn process_document(&self, mut document: Document) -> ApiResult<Output> {
        let started = Instant::now();
        let tokens_before = document.tokens().len();

        let mut expressions = self
            .extractor
            .extract(document.text())
            .map_err(EngineError::Extractor)?;
        let total = expressions.len();
        expressions.retain(|expression| expression.is_valid());
        let invalid_expressions = total - expressions.len();
        if invalid_expressions > 0 {
            tracing::debug!(invalid_expressions, "skipping expressions without matches");
        }

        let report = self
            .aligner
            .align(&mut document, &expressions)
            .map_err(EngineError::Align)?;

        Ok(Output {
            metadata: ProcessingMetadata {
                extractor: self.extractor.name().to_string(),
                expressions: expressions.len(),
                invalid_expressions,
                tokens_before,
                tokens_after: document.tokens().len(),
                processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            },
            document,
            report,
        })
    }

    /// Process many inputs; results keep input order
    pub fn process_batch(&self, inputs: Vec<Input>) -> ApiResult<BatchOutput> {
        let mode = match self.config.execution_mode {
            ExecutionMode::Adaptive => auto_select(inputs.len(), self.config.parallel_threshold),
            mode => mode,
        };
        self.process_batch_with_mode(inputs, mode)
    }

    /// Process many inputs with a specific execution mode
    pub fn process_batch_with_mode(
        &self,
        inputs: Vec<Input>,
        mode: ExecutionMode,
    ) -> ApiResult<BatchOutput> {
        let started = Instant::now();
        let len = inputs.len();
        let job = |input: Input| self.process(input);

        let (outputs, mode) = match mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                let executor = crate::executor::ParallelExecutor::new(self.config.thread_count);
                (executor.execute(inputs, job)?, executor.mode())
            }
            _ => {
                let executor = SequentialExecutor;
                (executor.execute(inputs, job)?, executor.mode())
            }
        };

        tracing::debug!(documents = len, mode = mode.as_str(), "batch finished");
        Ok(BatchOutput {
            outputs,
            execution_mode: mode,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

/// Builder for TemporalNormalizer
pub struct TemporalNormalizerBuilder {
    config_builder: ProcessorConfigBuilder,
    extractor: Option<Arc<dyn TemporalExtractor>>,
    tokenizer: Option<SimpleTokenizer>,
}

impl Default for TemporalNormalizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TemporalNormalizerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config_builder: ProcessorConfigBuilder::new(),
            extractor: None,
            tokenizer: None,
        }
    }

    /// Set the extractor
    pub fn extractor<E: TemporalExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    /// Set the tokenizer for plain text inputs
    pub fn tokenizer(mut self, tokenizer: SimpleTokenizer) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Use series preset
    pub fn series(mut self) -> Self {
        self.config_builder = self.config_builder.series();
        self
    }

    /// Use expression preset
    pub fn expression(mut self) -> Self {
        self.config_builder = self.config_builder.expression();
        self
    }

    /// Match against accent-folded text
    pub fn accent_fold(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.accent_fold(enabled);
        self
    }

    /// Fuse retained new spans into single tokens
    pub fn fuse_tokens(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.fuse_tokens(enabled);
        self
    }

    /// Set the label of new spans
    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.config_builder = self.config_builder.label(label);
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config_builder = self.config_builder.execution_mode(mode);
        self
    }

    /// Set the thread count
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.config_builder = self.config_builder.threads(count);
        self
    }

    /// Build the normalizer
    pub fn build(self) -> ApiResult<TemporalNormalizer> {
        let config = self.config_builder.build()?;
        let extractor = self.extractor.ok_or_else(|| ApiError::InvalidInput {
            reason: "an extractor is required".to_string(),
        })?;
        let normalizer = TemporalNormalizer::with_shared(extractor, config)?;
        Ok(match self.tokenizer {
            Some(tokenizer) => normalizer.with_tokenizer(tokenizer),
            None => normalizer,
        })
    }
}
