//! The closed token kind set and the per-token literal payload.

use alda_util::Span;

/// The closed set of token kinds a scan can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Musical
    NoteLetter,
    RestLetter,
    Sharp,
    Flat,
    Natural,
    OctaveSet,
    OctaveUp,
    OctaveDown,
    NoteLength,
    NoteLengthMs,
    NoteLengthS,
    Dot,
    Tie,
    Barline,
    Separator,

    // Structural
    Name,
    Alias,
    Colon,
    Equals,

    // Lisp
    LeftParen,
    RightParen,
    Symbol,
    Number,
    String,

    // Control
    Marker,
    AtMarker,
    VoiceMarker,
    CramOpen,
    CramClose,
    BracketOpen,
    BracketClose,
    Repeat,
    Repetitions,
    Newline,
    Eof,
    Error,
}

/// The tagged literal payload carried by a handful of token kinds.
///
/// Invariant: the active variant is always consistent with the owning
/// token's `kind` (see [`TokenKind`]'s doc table); no other kind carries one.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Char(char),
    None,
}

/// A single scanned token: its kind, the exact source substring matched,
/// an optional literal payload, and its source position.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Literal,
    pub pos: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: Literal, pos: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            pos,
        }
    }
}
