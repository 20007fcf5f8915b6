//! The `scan` subcommand: runs the scanner alone and prints its token
//! stream.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use alda_lex::{Literal, Token};

use super::{read_source, render_alda_error, OutputFormat};
use crate::error::Result;

pub struct ScanArgs {
    pub input: Option<PathBuf>,
    pub filename: Option<String>,
    pub format: OutputFormat,
}

pub fn run_scan(args: ScanArgs) -> Result<()> {
    let (source, filename) = read_source(args.input.as_deref(), args.filename.as_deref())?;
    debug!(bytes = source.len(), "read source for scan");

    let tokens = alda_lex::scan(&source, filename.as_deref())
        .map_err(|err| render_alda_error(&err, &source))?;
    info!(count = tokens.len(), "scan succeeded");

    match args.format {
        OutputFormat::Pretty => print_pretty(&tokens),
        OutputFormat::Json => print_json(&tokens)?,
    }
    Ok(())
}

fn print_pretty(tokens: &[Token]) {
    for token in tokens {
        println!(
            "{:>4}:{:<4} {:<14} {:?}",
            token.pos.line,
            token.pos.column,
            format!("{:?}", token.kind),
            token.lexeme
        );
    }
}

fn print_json(tokens: &[Token]) -> Result<()> {
    let view: Vec<TokenView> = tokens.iter().map(TokenView::from).collect();
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// A JSON-serializable view of a [`Token`]. Kept in the CLI rather than on
/// `Token` itself - `alda-lex` carries no serde dependency.
#[derive(Serialize)]
struct TokenView {
    kind: String,
    lexeme: String,
    literal: Option<LiteralView>,
    line: u32,
    column: u32,
}

#[derive(Serialize)]
#[serde(untagged)]
enum LiteralView {
    Int(i64),
    Float(f64),
    Char(String),
}

impl From<&Token> for TokenView {
    fn from(token: &Token) -> Self {
        let literal = match &token.literal {
            Literal::Int(n) => Some(LiteralView::Int(*n)),
            Literal::Float(f) => Some(LiteralView::Float(*f)),
            Literal::Char(c) => Some(LiteralView::Char(c.to_string())),
            Literal::None => None,
        };
        Self {
            kind: format!("{:?}", token.kind),
            lexeme: token.lexeme.clone(),
            literal,
            line: token.pos.line,
            column: token.pos.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_view_carries_literal() {
        let tokens = alda_lex::scan("c4", None).unwrap();
        let views: Vec<TokenView> = tokens.iter().map(TokenView::from).collect();
        assert_eq!(views[0].kind, "NoteLetter");
        assert!(matches!(views[0].literal, Some(LiteralView::Char(_))));
        assert_eq!(views[1].kind, "NoteLength");
        assert!(matches!(views[1].literal, Some(LiteralView::Int(4))));
    }
}
