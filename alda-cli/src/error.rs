//! Error handling for the Alda CLI.
//!
//! Structured error types via `thiserror`; `main` itself works in terms of
//! `anyhow::Result` so command dispatch can freely attach context.

use thiserror::Error;

/// Errors the CLI itself can produce, distinct from the scanner/parser's
/// own [`alda_util::AldaError`] (which is rendered and printed directly,
/// not wrapped here - see [`crate::commands::render_alda_error`]).
#[derive(Error, Debug)]
pub enum CliError {
    /// A scan or parse failure, already rendered with its source excerpt
    /// and caret.
    #[error("{0}")]
    Source(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
