//! Processor configuration
//!
//! Wraps the core [`AlignConfig`] with batch execution settings.

use crate::error::{EngineError, Result};
use crate::executor::ExecutionMode;
use tempora_core::{AlignConfig, BindingMode};

/// Default number of documents before a batch goes parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Public processor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorConfig {
    /// Alignment settings applied to every document
    pub align: AlignConfig,
    /// Execution mode preference for batches
    pub execution_mode: ExecutionMode,
    /// Thread count override (None = auto-detect)
    pub thread_count: Option<usize>,
    /// Minimum batch size for parallel processing in adaptive mode
    pub parallel_threshold: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            align: AlignConfig::default(),
            execution_mode: ExecutionMode::Adaptive,
            thread_count: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ProcessorConfig {
    /// Create a configuration around alignment settings
    pub fn new(align: AlignConfig) -> Self {
        Self {
            align,
            ..Default::default()
        }
    }

    /// Series preset: raw matching, all matching time series, fused tokens
    pub fn series() -> Self {
        Self::new(AlignConfig::series())
    }

    /// Expression preset: folded matching, one expression per span, tokens kept
    pub fn expression() -> Self {
        Self::new(AlignConfig::expression())
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        AlignConfig::preset(name).map(Self::new)
    }

    /// Names of the available presets
    pub fn preset_names() -> &'static [&'static str] {
        &["series", "expression"]
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.align.label.trim().is_empty() {
            return Err(EngineError::ConfigError("Label cannot be empty".to_string()));
        }
        if self.thread_count == Some(0) {
            return Err(EngineError::ConfigError("Thread count must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Builder for ProcessorConfig
#[derive(Debug, Default)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the alignment settings
    pub fn align(mut self, align: AlignConfig) -> Self {
        self.config.align = align;
        self
    }

    /// Use series preset
    pub fn series(mut self) -> Self {
        self.config.align = AlignConfig::series();
        self
    }

    /// Use expression preset
    pub fn expression(mut self) -> Self {
        self.config.align = AlignConfig::expression();
        self
    }

    /// Match against accent-folded text
    pub fn accent_fold(mut self, enabled: bool) -> Self {
        self.config.align.accent_fold = enabled;
        self
    }

    /// Set the binding mode
    pub fn binding(mut self, binding: BindingMode) -> Self {
        self.config.align.binding = binding;
        self
    }

    /// Fuse retained new spans into single tokens
    pub fn fuse_tokens(mut self, enabled: bool) -> Self {
        self.config.align.fuse_tokens = enabled;
        self
    }

    /// Set the label of new spans
    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.config.align.label = label.into();
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.config.thread_count = count;
        self
    }

    /// Set the parallel threshold in documents
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ProcessorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
