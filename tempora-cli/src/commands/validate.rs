//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match CliConfig::load(&self.config).and_then(|config| {
            let api = config.to_api_config()?;
            Ok((config, api))
        }) {
            Ok((config, api)) => {
                println!("✓ Configuration is valid!");
                println!("  Preset: {}", api.preset_name());
                println!("  Label: {}", api.align().label);
                println!("  Accent folding: {}", api.align().accent_fold);
                println!("  Token fusion: {}", api.align().fuse_tokens);
                println!("  Output format: {}", config.output.default_format);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
