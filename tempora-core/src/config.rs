//! Alignment configuration and presets

use crate::binder::BindingMode;
use serde::{Deserialize, Serialize};

/// Label given to new spans by the series preset
pub const DATETIME_LABEL: &str = "DATETIME";

/// Label given to new spans by the expression preset
pub const DATE_LABEL: &str = "DATE";

/// Settings for one [`Aligner`](crate::Aligner)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Match against accent-folded text
    pub accent_fold: bool,
    /// How semantics are bound to spans
    pub binding: BindingMode,
    /// Fuse each retained new span into a single token
    pub fuse_tokens: bool,
    /// Label of newly created spans
    pub label: String,
}

impl AlignConfig {
    /// Raw matching, every matching time series attached, tokens fused
    pub fn series() -> Self {
        Self {
            accent_fold: false,
            binding: BindingMode::Series,
            fuse_tokens: true,
            label: DATETIME_LABEL.to_string(),
        }
    }

    /// Folded matching, one whole expression attached, tokens left alone
    pub fn expression() -> Self {
        Self {
            accent_fold: true,
            binding: BindingMode::Expression,
            fuse_tokens: false,
            label: DATE_LABEL.to_string(),
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "series" => Some(Self::series()),
            "expression" => Some(Self::expression()),
            _ => None,
        }
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self::series()
    }
}
