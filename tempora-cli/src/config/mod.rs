//! Configuration module
//!
//! CLI settings live in a TOML file with `[alignment]`, `[output]` and
//! `[performance]` tables. Command-line flags override file values.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tempora_api::{Config, ExecutionMode};

/// Output formats understood by `[output] default_format`
pub const FORMAT_NAMES: &[&str] = &["text", "json", "markdown", "pipe"];

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Alignment configuration
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Alignment-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AlignmentConfig {
    /// Preset to start from (`series` or `expression`)
    pub preset: String,

    /// Override the preset's accent folding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fold: Option<bool>,

    /// Override the preset's token fusion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuse_tokens: Option<bool>,

    /// Override the preset's label for new entities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            preset: "series".to_string(),
            accent_fold: None,
            fuse_tokens: None,
            label: None,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Include metadata in output
    pub include_metadata: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            include_metadata: false,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Documents per batch before going parallel
    pub parallel_threshold: usize,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
            worker_threads: 0,
        }
    }
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot work
    pub fn validate(&self) -> Result<(), CliError> {
        if !Config::preset_names().contains(&self.alignment.preset.as_str()) {
            return Err(CliError::ConfigError(format!(
                "unknown preset '{}', expected one of: {}",
                self.alignment.preset,
                Config::preset_names().join(", ")
            )));
        }
        if matches!(&self.alignment.label, Some(label) if label.trim().is_empty()) {
            return Err(CliError::ConfigError("label cannot be empty".to_string()));
        }
        if !FORMAT_NAMES.contains(&self.output.default_format.as_str()) {
            return Err(CliError::ConfigError(format!(
                "unknown output format '{}'",
                self.output.default_format
            )));
        }
        Ok(())
    }

    /// Thread count for the engine (`None` lets rayon decide)
    pub fn threads(&self) -> Option<usize> {
        match self.performance.worker_threads {
            0 => None,
            n => Some(n),
        }
    }

    /// Build the API configuration described by this file
    pub fn to_api_config(&self) -> Result<Config> {
        let mut builder = Config::builder()
            .preset(&self.alignment.preset)?
            .threads(self.threads())
            .parallel_threshold(self.performance.parallel_threshold)
            .execution_mode(ExecutionMode::Adaptive);
        if let Some(enabled) = self.alignment.accent_fold {
            builder = builder.accent_fold(enabled);
        }
        if let Some(enabled) = self.alignment.fuse_tokens {
            builder = builder.fuse_tokens(enabled);
        }
        if let Some(label) = &self.alignment.label {
            builder = builder.label(label.clone());
        }
        Ok(builder.build()?)
    }
}
