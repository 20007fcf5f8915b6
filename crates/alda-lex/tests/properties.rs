//! Generative properties of the scanner, supplementing the boundary-case
//! unit tests colocated in `src/lexer.rs`.

use alda_lex::TokenKind;
use quickcheck_macros::quickcheck;

/// Every scan of arbitrary printable ASCII either succeeds and ends in
/// `Eof`, or fails with a single scan error.
#[quickcheck]
fn scan_always_ends_in_eof_or_a_single_error(input: String) -> bool {
    let printable: String = input
        .chars()
        .filter(|c| c.is_ascii() && (c.is_ascii_graphic() || *c == ' ' || *c == '\n'))
        .collect();
    match alda_lex::scan(&printable, None) {
        Ok(tokens) => tokens.last().map(|t| t.kind) == Some(TokenKind::Eof),
        Err(_) => true,
    }
}

/// Every non-EOF, non-error token's lexeme is a literal substring of the
/// source it was scanned from.
#[quickcheck]
fn lexemes_are_substrings_of_source(input: String) -> bool {
    let printable: String = input
        .chars()
        .filter(|c| c.is_ascii() && (c.is_ascii_graphic() || *c == ' ' || *c == '\n'))
        .collect();
    let Ok(tokens) = alda_lex::scan(&printable, None) else {
        return true;
    };
    tokens
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Eof | TokenKind::Error))
        .all(|t| printable.contains(&t.lexeme))
}
