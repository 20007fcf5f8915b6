//! `alda` - a command-line front end for the Alda scanner and parser.
//!
//! Scans or parses a `.alda` score (from a file or stdin) and prints its
//! token stream or AST, either as an indented tree or as JSON.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{run_parse, run_scan, OutputFormat, ParseArgs, ScanArgs};
use config::Config;

/// Scan or parse Alda music-notation source.
#[derive(Parser, Debug)]
#[command(name = "alda")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scanner and parser for the Alda music-notation language", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true, env = "ALDA_VERBOSE")]
    verbose: bool,

    /// Path to a configuration file (defaults to discovering `alda.toml`).
    #[arg(short, long, global = true, env = "ALDA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the scanner only and print its token stream.
    Scan(ScanCommand),

    /// Run the full scan → parse pipeline and print the resulting AST.
    Parse(ParseCommand),
}

#[derive(Parser, Debug)]
struct ScanCommand {
    /// Input `.alda` file; reads stdin if omitted.
    input: Option<PathBuf>,

    /// Filename to attribute positions to (overrides the input path; useful
    /// with stdin).
    #[arg(long)]
    filename: Option<String>,

    /// Output format.
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

#[derive(Parser, Debug)]
struct ParseCommand {
    /// Input `.alda` file; reads stdin if omitted.
    input: Option<PathBuf>,

    /// Filename to attribute positions to (overrides the input path; useful
    /// with stdin).
    #[arg(long)]
    filename: Option<String>,

    /// Output format.
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Scan(args) => run_scan(ScanArgs {
            input: args.input,
            filename: args.filename,
            format: args.format.unwrap_or(config.format),
        }),
        Commands::Parse(args) => run_parse(ParseArgs {
            input: args.input,
            filename: args.filename,
            format: args.format.unwrap_or(config.format),
        }),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);
    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scan_subcommand() {
        let cli = Cli::parse_from(["alda", "scan", "song.alda"]);
        assert!(matches!(cli.command, Commands::Scan(_)));
    }

    #[test]
    fn parses_parse_subcommand_with_format() {
        let cli = Cli::parse_from(["alda", "parse", "song.alda", "--format", "json"]);
        let Commands::Parse(args) = cli.command else {
            panic!("expected Parse command")
        };
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn scan_without_input_leaves_it_none_for_stdin() {
        let cli = Cli::parse_from(["alda", "scan"]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected Scan command")
        };
        assert!(args.input.is_none());
    }

    #[test]
    fn global_verbose_flag() {
        let cli = Cli::parse_from(["alda", "--verbose", "scan", "song.alda"]);
        assert!(cli.verbose);
    }

    #[test]
    fn filename_override_is_parsed() {
        let cli = Cli::parse_from(["alda", "scan", "--filename", "stdin.alda"]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected Scan command")
        };
        assert_eq!(args.filename, Some("stdin.alda".to_string()));
    }
}
