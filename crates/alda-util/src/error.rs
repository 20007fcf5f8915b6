//! Error types shared by the scanner and parser.
//!
//! Both phases report at most one error each, captured at the point of
//! detection together with the token/character position that triggered it.

use std::fmt;
use std::sync::OnceLock;

use thiserror::Error;

use crate::span::Span;

/// The three error categories the scanner and parser can report.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Scan error")]
    Scan,
    #[error("Syntax error")]
    Syntax,
    #[error("Memory error")]
    Memory,
}

/// A captured lexical, syntactic, or allocation failure.
///
/// `source_line` is computed lazily the first time it's requested (via
/// [`AldaError::source_line`] or [`AldaError::format`]) and cached for
/// subsequent formatting.
#[derive(Debug)]
pub struct AldaError {
    kind: ErrorKind,
    message: String,
    pos: Span,
    source_line: OnceLock<Option<String>>,
}

impl AldaError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, pos: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            pos,
            source_line: OnceLock::new(),
        }
    }

    pub fn scan(message: impl Into<String>, pos: Span) -> Self {
        Self::new(ErrorKind::Scan, message, pos)
    }

    pub fn syntax(message: impl Into<String>, pos: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, pos)
    }

    pub fn memory(message: impl Into<String>, pos: Span) -> Self {
        Self::new(ErrorKind::Memory, message, pos)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn pos(&self) -> &Span {
        &self.pos
    }

    /// The literal text of the line the error occurred on, extracted from
    /// `source` on first access and cached for the life of this error.
    pub fn source_line<'a>(&self, source: &str) -> Option<String> {
        self.source_line
            .get_or_init(|| extract_line(source, self.pos.line))
            .clone()
    }

    /// Render the `[filename:][line:][column:] <Type>: <message>` header
    /// plus the source line and caret, per the wire format every caller
    /// (CLI, tests) relies on.
    pub fn format(&self, source: &str) -> String {
        self.source_line(source);
        self.to_string()
    }
}

impl fmt::Display for AldaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.pos.filename {
            write!(f, "{name}:")?;
        }
        if self.pos.line > 0 {
            write!(f, "{}:", self.pos.line)?;
            if self.pos.column > 0 {
                write!(f, "{}:", self.pos.column)?;
            }
            write!(f, " ")?;
        }
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(Some(line)) = self.source_line.get() {
            if self.pos.column > 0 {
                let caret = " ".repeat(self.pos.column.saturating_sub(1) as usize);
                write!(f, "\n  {line}\n  {caret}^")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for AldaError {}

fn extract_line(source: &str, line: u32) -> Option<String> {
    if line < 1 {
        return None;
    }
    source.lines().nth((line - 1) as usize).map(str::to_owned)
}

pub type Result<T> = std::result::Result<T, AldaError>;
