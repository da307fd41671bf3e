//! Chonker CLI
//!
//! Main entry point for the chonker command-line tool.
//! Splits large text files into semantically bounded chunks for
//! language-model training datasets.

mod commands;

use clap::{Parser, Subcommand};
use chonker_core::{config::AppConfig, logging, AppResult};
use commands::{PreviewCommand, SplitCommand};
use std::path::PathBuf;

/// Chonker - a smart text chunker for creating ML datasets
#[derive(Parser, Debug)]
#[command(name = "chonker")]
#[command(about = "A smart text chunker for creating ML datasets", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: ./.chonker.yaml when present)
    #[arg(short, long, global = true, env = "CHONKER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a text file into a chunked dataset
    Split(SplitCommand),

    /// Print the chunks of a text file without writing any files
    Preview(PreviewCommand),
}

fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load configuration from the config file and environment, then apply CLI overrides
    let config =
        AppConfig::load(cli.config)?.with_overrides(cli.log_level, cli.verbose, cli.no_color);

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Chunking defaults: {:?}", config.chunking);

    let command_name = match &cli.command {
        Commands::Split(_) => "split",
        Commands::Preview(_) => "preview",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Split(cmd) => cmd.execute(&config),
        Commands::Preview(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::debug!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
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
    fn test_parse_split() {
        let cli = Cli::try_parse_from([
            "chonker", "split", "book.txt", "-t", "512", "--min-tokens", "20", "-f", "alpaca",
            "--debug",
        ])
        .unwrap();

        match cli.command {
            Commands::Split(cmd) => {
                assert_eq!(cmd.chunk.max_tokens, Some(512));
                assert_eq!(cmd.chunk.min_tokens, Some(20));
                assert_eq!(cmd.format, Some(chonker_split::OutputFormat::Alpaca));
                assert!(cmd.debug);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_size_modes_are_exclusive() {
        let both = Cli::try_parse_from(["chonker", "split", "book.txt", "-s", "100", "-t", "25"]);
        assert!(both.is_err());

        let neither = Cli::try_parse_from(["chonker", "preview", "book.txt"]);
        assert!(neither.is_err());
    }

    #[test]
    fn test_negative_threshold_reaches_validation() {
        let cli =
            Cli::try_parse_from(["chonker", "split", "book.txt", "-s", "100", "--min-size", "-3"])
                .unwrap();
        match cli.command {
            Commands::Split(cmd) => assert_eq!(cmd.chunk.min_size, Some(-3)),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
