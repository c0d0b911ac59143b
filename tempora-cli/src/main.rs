//! tempora command-line entry point

use clap::Parser;
use tempora_cli::commands::Commands;

/// Align normalized temporal expressions with document tokens and entities
#[derive(Debug, Parser)]
#[command(name = "tempora", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
        Commands::List { subcommand } => subcommand.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process_flags() {
        let cli = Cli::try_parse_from([
            "tempora", "process", "-i", "a.txt", "-x", "e.json", "-f", "pipe", "--no-fuse",
        ])
        .unwrap();
        match cli.command {
            Commands::Process(args) => {
                assert!(args.no_fuse);
                assert_eq!(args.format, Some(tempora_cli::commands::process::OutputFormat::Pipe));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
