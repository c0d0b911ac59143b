//! High-level configuration API

use crate::error::{ApiError, Result};
use crate::TemporalProcessor;
use tempora_engine::{
    AlignConfig, BindingMode, ExecutionMode, ProcessorConfig, TemporalExtractor,
};

/// High-level configuration for temporal alignment
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    inner: ProcessorConfig,
    preset: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::series()
    }
}

impl Config {
    /// Raw matching, every matching time series attached, spans fused
    pub fn series() -> Self {
        Self {
            inner: ProcessorConfig::series(),
            preset: "series".to_string(),
        }
    }

    /// Accent-folded matching, one expression per span, tokens kept
    pub fn expression() -> Self {
        Self {
            inner: ProcessorConfig::expression(),
            preset: "expression".to_string(),
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Result<Self> {
        let inner = ProcessorConfig::preset(name)
            .ok_or_else(|| ApiError::Config(format!("unknown preset '{name}'")))?;
        Ok(Self {
            inner,
            preset: name.to_string(),
        })
    }

    /// Names accepted by [`Config::preset`]
    pub fn preset_names() -> &'static [&'static str] {
        ProcessorConfig::preset_names()
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Preset the configuration started from
    pub fn preset_name(&self) -> &str {
        &self.preset
    }

    /// Alignment settings
    pub fn align(&self) -> &AlignConfig {
        &self.inner.align
    }

    /// Batch execution mode
    pub fn execution_mode(&self) -> ExecutionMode {
        self.inner.execution_mode
    }

    /// Thread count override
    pub fn threads(&self) -> Option<usize> {
        self.inner.thread_count
    }

    pub(crate) fn processor_config(&self) -> &ProcessorConfig {
        &self.inner
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from a named preset, discarding earlier alignment settings
    pub fn preset(mut self, name: &str) -> Result<Self> {
        let preset = Config::preset(name)?;
        self.config.inner.align = preset.inner.align;
        self.config.preset = preset.preset;
        Ok(self)
    }

    /// Match against accent-folded text
    pub fn accent_fold(mut self, enabled: bool) -> Self {
        self.config.inner.align.accent_fold = enabled;
        self
    }

    /// Set how engine results are bound to spans
    pub fn binding(mut self, binding: BindingMode) -> Self {
        self.config.inner.align.binding = binding;
        self
    }

    /// Fuse new multi-token spans into single tokens
    pub fn fuse_tokens(mut self, enabled: bool) -> Self {
        self.config.inner.align.fuse_tokens = enabled;
        self
    }

    /// Set the label given to new spans
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.inner.align.label = label.into();
        self
    }

    /// Set batch execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.inner.execution_mode = mode;
        self
    }

    /// Set thread count
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.inner.thread_count = threads;
        self
    }

    /// Set the batch size from which adaptive mode goes parallel
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.inner.parallel_threshold = threshold;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config.inner.validate()?;
        Ok(self.config)
    }

    /// Build a processor directly
    pub fn build_processor<E: TemporalExtractor + 'static>(
        self,
        extractor: E,
    ) -> Result<TemporalProcessor> {
        TemporalProcessor::with_config(extractor, self.build()?)
    }
}
