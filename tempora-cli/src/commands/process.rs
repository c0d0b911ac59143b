//! Process command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{load_documents, resolve_patterns, InputFormat};
use crate::output::{
    JsonFormatter, MarkdownFormatter, OutputFormatter, PipeFormatter, TextFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tempora_api::{FixtureExtractor, TemporalProcessor};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Recorded extractor answers (JSON array of {text, expressions})
    #[arg(short = 'x', long, value_name = "FILE", env = "TEMPORA_EXPRESSIONS")]
    pub expressions: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Layout of the input files
    #[arg(long, value_enum, default_value = "text")]
    pub input_format: InputFormat,

    /// Alignment preset
    #[arg(short, long, value_parser = ["series", "expression"])]
    pub preset: Option<String>,

    /// Match against accent-folded text
    #[arg(long)]
    pub accent_fold: bool,

    /// Keep new multi-token entities as separate tokens
    #[arg(long)]
    pub no_fuse: bool,

    /// Label for new entities
    #[arg(short, long, value_name = "LABEL")]
    pub label: Option<String>,

    /// Number of worker threads
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One entity per line, tab separated
    Text,
    /// JSON array of documents with entities
    Json,
    /// Markdown formatted output
    Markdown,
    /// Pipe-delimited rows, one per time series
    Pipe,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging();

        log::info!("Starting temporal alignment");
        log::debug!("Arguments: {:?}", self);

        let settings = self.settings()?;
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&settings.output.default_format, true)
                .map_err(CliError::ConfigError)?,
        };

        let extractor = FixtureExtractor::from_file(&self.expressions).with_context(|| {
            format!("Failed to load expressions: {}", self.expressions.display())
        })?;
        log::info!("Loaded {} recorded extractor answers", extractor.len());

        let config = settings.to_api_config()?;
        log::info!(
            "Preset {} with {} worker threads",
            config.preset_name(),
            settings.threads().unwrap_or_else(num_cpus::get)
        );
        let processor = TemporalProcessor::with_config(extractor, config)?;

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} files to process", files.len());

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        let mut formatter = create_formatter(format, writer, &settings);

        let mut progress = ProgressReporter::new(self.quiet || self.output.is_none());
        progress.init_files(files.len() as u64);

        let mut failures = 0;
        for path in &files {
            let documents = load_documents(path, self.input_format)?;
            let (sources, inputs): (Vec<_>, Vec<_>) = documents
                .into_iter()
                .map(|doc| ((doc.source, doc.diagnostics), doc.input))
                .unzip();

            let mut entities = 0;
            for ((source, mut diagnostics), result) in
                sources.into_iter().zip(processor.process_batch(inputs)?)
            {
                match result {
                    Ok(mut output) => {
                        entities += output.len();
                        diagnostics.append(&mut output.diagnostics);
                        output.diagnostics = diagnostics;
                        formatter.format_document(&source, &output)?;
                    }
                    Err(e) => {
                        failures += 1;
                        log::error!("{source}: {e}");
                    }
                }
            }
            progress.file_completed(&path.display().to_string(), entities);
        }

        formatter.finish()?;
        progress.finish();

        if failures > 0 {
            return Err(CliError::ProcessingError(format!(
                "{failures} document(s) could not be processed"
            ))
            .into());
        }
        Ok(())
    }

    /// Merge the configuration file with command-line overrides
    pub fn settings(&self) -> Result<CliConfig> {
        let mut settings = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        if let Some(preset) = &self.preset {
            settings.alignment.preset = preset.clone();
        }
        if self.accent_fold {
            settings.alignment.accent_fold = Some(true);
        }
        if self.no_fuse {
            settings.alignment.fuse_tokens = Some(false);
        }
        if let Some(label) = &self.label {
            settings.alignment.label = Some(label.clone());
        }
        if let Some(threads) = self.threads {
            settings.performance.worker_threads = threads;
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    settings: &CliConfig,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(
            JsonFormatter::new(writer)
                .pretty(settings.output.pretty_json)
                .include_metadata(settings.output.include_metadata),
        ),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        OutputFormat::Pipe => Box::new(PipeFormatter::new(writer)),
    }
}
