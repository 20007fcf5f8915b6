//! Command modules for the Alda CLI: `scan` and `parse`.

pub mod parse;
pub mod scan;

pub use parse::{run_parse, ParseArgs};
pub use scan::{run_scan, ScanArgs};

use std::io::Read;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use alda_util::AldaError;

use crate::error::{CliError, Result};

/// Output shape for the `scan`/`parse` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable indented tree/list.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

/// Reads source text from a file path, or from stdin when `input` is
/// `None`. Returns the text alongside the filename to attribute positions
/// to (the given path, the `--filename` override, or nothing for stdin).
pub(crate) fn read_source(
    input: Option<&Path>,
    filename_override: Option<&str>,
) -> Result<(String, Option<String>)> {
    match input {
        Some(path) => {
            let source = std::fs::read_to_string(path)?;
            let name = filename_override
                .map(str::to_string)
                .or_else(|| path.to_str().map(str::to_string));
            Ok((source, name))
        }
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok((source, filename_override.map(str::to_string)))
        }
    }
}

/// Renders a scan/syntax/memory error with its source excerpt and caret,
/// wrapped as the CLI's own error type so `main` can print and exit
/// uniformly.
pub(crate) fn render_alda_error(err: &AldaError, source: &str) -> CliError {
    CliError::Source(err.format(source))
}
