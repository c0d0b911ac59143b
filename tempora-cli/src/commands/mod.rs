//! CLI command implementations

use clap::Subcommand;

pub mod generate_config;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Align temporal expressions with document tokens and entities
    Process(process::ProcessArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List alignment presets
    Presets,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the requested listing
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            ListCommands::Presets => {
                println!("Available presets:");
                println!("  series      - raw text, every matching time series, tokens fused");
                println!("  expression  - accent-folded text, one expression per span, tokens kept");
            }
            ListCommands::Formats => {
                println!("Available output formats:");
                println!("  text      - one entity per line, tab separated");
                println!("  json      - JSON array of documents with entities");
                println!("  markdown  - one section per document");
                println!("  pipe      - pipe-delimited rows, one per time series");
            }
        }
        Ok(())
    }
}
