//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Preset the template starts from
    #[arg(short, long, value_parser = ["series", "expression"], default_value = "series")]
    pub preset: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Preset: {}", self.preset);
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template();

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file");
        println!("2. Validate your configuration:");
        println!("   tempora validate --config {}", self.output.display());
        println!("3. Use it for processing:");
        println!(
            "   tempora process -i input.txt -x expressions.json --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        format!(
            r#"# tempora configuration

[alignment]
# "series": match raw text, attach every time series found in the span,
#           fuse new multi-token entities into one token
# "expression": match accent-folded text, attach the expression whose
#           matches contain the span text, keep tokens
preset = "{}"

# Overrides for the preset (uncomment to use)
# accent_fold = true
# fuse_tokens = false
# label = "DATETIME"

[output]
# text, json, markdown or pipe
default_format = "text"
include_metadata = false
pretty_json = true

[performance]
# Documents per batch before processing goes parallel
parallel_threshold = 64
# Number of worker threads (0 = auto)
worker_threads = 0
"#,
            self.preset
        )
    }
}
