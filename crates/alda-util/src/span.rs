//! Source position tracking.
//!
//! A [`Span`] is a single point in source text: a 1-based line and column
//! plus an optional filename. Every token and AST node carries one.

use std::fmt;
use std::sync::Arc;

/// A 1-based source location, optionally tied to a filename.
///
/// Column is measured in bytes from the start of the current line, matching
/// the scanner's byte-indexed cursor rather than a grapheme count.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
    pub filename: Option<Arc<str>>,
}

impl Span {
    /// A placeholder span used before any input has been consumed.
    pub const DUMMY: Span = Span {
        line: 1,
        column: 1,
        filename: None,
    };

    pub fn new(line: u32, column: u32, filename: Option<Arc<str>>) -> Self {
        Self {
            line,
            column,
            filename,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.filename {
            write!(f, "{name}:{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}
