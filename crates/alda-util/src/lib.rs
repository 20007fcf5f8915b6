//! Shared position and error types for the Alda scanner and parser.

pub mod error;
pub mod span;

pub use error::{AldaError, ErrorKind, Result};
pub use span::Span;

/// The version string reported by the scanner/parser function surface.
///
/// Matches the version the original C implementation's host bindings
/// reported (`original_source/src/aldakit/_alda_parser.cpp`).
pub fn get_version() -> &'static str {
    "0.1.0"
}
