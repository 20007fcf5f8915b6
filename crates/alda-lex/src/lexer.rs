//! The mode-switched scanner.
//!
//! The scanner is a single-pass state machine with two dispatch tables,
//! selected by paren depth: depth `0` uses the music-mode table, depth `> 0`
//! uses the lisp-mode table. `(` and `)` always produce `LeftParen`/
//! `RightParen` and the depth adjustment happens when the token is emitted,
//! so the byte right after an opening paren is already lexed in lisp mode.

use std::sync::Arc;

use alda_util::error::ErrorKind;
use alda_util::{AldaError, Span};

use crate::cursor::Cursor;
use crate::token::{Literal, Token, TokenKind};

/// Scans `source` to completion, returning its token stream or the single
/// first error encountered. This is the public function surface's `scan`.
pub fn scan(source: &str, filename: Option<&str>) -> alda_util::Result<Vec<Token>> {
    let (tokens, error) = Scanner::new(source, filename).run();
    match error {
        Some(err) => Err(err),
        None => Ok(tokens),
    }
}

/// The stateful scanner. Prefer [`scan`] unless a caller needs the partial
/// token stream alongside a captured error.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    filename: Option<Arc<str>>,
    paren_depth: i32,
    tokens: Vec<Token>,
    error: Option<AldaError>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, filename: Option<&str>) -> Self {
        Self {
            cursor: Cursor::new(source),
            filename: filename.map(Arc::from),
            paren_depth: 0,
            tokens: Vec::new(),
            error: None,
        }
    }

    /// Runs the scanner to completion or the first error. Partial tokens
    /// scanned before an error are still returned alongside it.
    pub fn run(mut self) -> (Vec<Token>, Option<AldaError>) {
        loop {
            self.skip_trivia();
            let start = self.cursor.position();
            let pos = self.pos_here();
            let token = if self.paren_depth > 0 {
                self.scan_lisp_token(start, pos)
            } else {
                self.scan_normal_token(start, pos)
            };
            let stop = matches!(token.kind, TokenKind::Eof | TokenKind::Error);
            self.tokens.push(token);
            if stop {
                break;
            }
        }
        if self.tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let pos = self.pos_here();
            self.tokens.push(Token::new(TokenKind::Eof, "", Literal::None, pos));
        }
        (self.tokens, self.error)
    }

    fn pos_here(&self) -> Span {
        Span::new(self.cursor.line(), self.cursor.column(), self.filename.clone())
    }

    fn set_error(&mut self, kind: ErrorKind, message: impl Into<String>, pos: Span) {
        if self.error.is_none() {
            self.error = Some(AldaError::new(kind, message, pos));
        }
    }

    /// Consumes spaces, tabs, carriage returns, and `#`-to-end-of-line
    /// comments. Newlines are never consumed here — they are tokens.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                Some(b' ') | Some(b'\t') | Some(b'\r') => {
                    self.cursor.advance();
                }
                Some(b'#') => {
                    while let Some(b) = self.cursor.current() {
                        if b == b'\n' {
                            break;
                        }
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_is_ascii_letter(&self) -> bool {
        self.cursor.peek(1).is_some_and(|b| b.is_ascii_alphabetic())
    }

    fn tok(&self, kind: TokenKind, start: usize, literal: Literal, pos: Span) -> Token {
        Token::new(kind, self.cursor.slice_from(start), literal, pos)
    }

    fn scan_error(&mut self, start: usize, pos: Span, message: &str) -> Token {
        self.set_error(ErrorKind::Scan, message, pos.clone());
        Token::new(TokenKind::Error, self.cursor.slice_from(start), Literal::None, pos)
    }

    fn scan_normal_token(&mut self, start: usize, pos: Span) -> Token {
        let Some(c) = self.cursor.current() else {
            return Token::new(TokenKind::Eof, "", Literal::None, pos);
        };
        match c {
            b'\n' => {
                self.cursor.advance();
                self.tok(TokenKind::Newline, start, Literal::None, pos)
            }
            b'+' => {
                self.cursor.advance();
                self.tok(TokenKind::Sharp, start, Literal::None, pos)
            }
            b'-' => {
                self.cursor.advance();
                self.tok(TokenKind::Flat, start, Literal::None, pos)
            }
            b'_' => {
                self.cursor.advance();
                self.tok(TokenKind::Natural, start, Literal::None, pos)
            }
            b'>' => {
                self.cursor.advance();
                self.tok(TokenKind::OctaveUp, start, Literal::None, pos)
            }
            b'<' => {
                self.cursor.advance();
                self.tok(TokenKind::OctaveDown, start, Literal::None, pos)
            }
            b'.' => {
                self.cursor.advance();
                self.tok(TokenKind::Dot, start, Literal::None, pos)
            }
            b'~' => {
                self.cursor.advance();
                self.tok(TokenKind::Tie, start, Literal::None, pos)
            }
            b'|' => {
                self.cursor.advance();
                self.tok(TokenKind::Barline, start, Literal::None, pos)
            }
            b'/' => {
                self.cursor.advance();
                self.tok(TokenKind::Separator, start, Literal::None, pos)
            }
            b':' => {
                self.cursor.advance();
                self.tok(TokenKind::Colon, start, Literal::None, pos)
            }
            b'=' => {
                self.cursor.advance();
                self.tok(TokenKind::Equals, start, Literal::None, pos)
            }
            b'{' => {
                self.cursor.advance();
                self.tok(TokenKind::CramOpen, start, Literal::None, pos)
            }
            b'}' => {
                self.cursor.advance();
                self.tok(TokenKind::CramClose, start, Literal::None, pos)
            }
            b'[' => {
                self.cursor.advance();
                self.tok(TokenKind::BracketOpen, start, Literal::None, pos)
            }
            b']' => {
                self.cursor.advance();
                self.tok(TokenKind::BracketClose, start, Literal::None, pos)
            }
            b'(' => {
                self.cursor.advance();
                self.paren_depth += 1;
                self.tok(TokenKind::LeftParen, start, Literal::None, pos)
            }
            b')' => {
                self.cursor.advance();
                self.paren_depth -= 1;
                self.tok(TokenKind::RightParen, start, Literal::None, pos)
            }
            b'r' if !self.next_is_ascii_letter() => {
                self.cursor.advance();
                self.tok(TokenKind::RestLetter, start, Literal::None, pos)
            }
            b'o' if self.cursor.peek(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.scan_octave_set(start, pos)
            }
            b'V' if self.cursor.peek(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.scan_voice_marker(start, pos)
            }
            b'a'..=b'g' if !self.next_is_ascii_letter() => {
                self.cursor.advance();
                self.tok(TokenKind::NoteLetter, start, Literal::Char(c as char), pos)
            }
            b'0'..=b'9' => self.scan_number(start, pos),
            b'%' => self.scan_name_like(start, pos, TokenKind::Marker),
            b'@' => self.scan_name_like(start, pos, TokenKind::AtMarker),
            b'*' => self.scan_repeat(start, pos),
            b'\'' => self.scan_repetitions(start, pos),
            b'"' => self.scan_quoted(start, pos, TokenKind::Alias, false),
            c if c.is_ascii_alphabetic() => self.scan_name(start, pos),
            _ => self.scan_error(start, pos, "Unexpected character"),
        }
    }

    fn scan_lisp_token(&mut self, start: usize, pos: Span) -> Token {
        let Some(c) = self.cursor.current() else {
            return Token::new(TokenKind::Eof, "", Literal::None, pos);
        };
        match c {
            b'\n' => {
                self.cursor.advance();
                self.tok(TokenKind::Newline, start, Literal::None, pos)
            }
            b'(' => {
                self.cursor.advance();
                self.paren_depth += 1;
                self.tok(TokenKind::LeftParen, start, Literal::None, pos)
            }
            b')' => {
                self.cursor.advance();
                self.paren_depth -= 1;
                self.tok(TokenKind::RightParen, start, Literal::None, pos)
            }
            b'"' => self.scan_quoted(start, pos, TokenKind::String, true),
            b'0'..=b'9' => self.scan_lisp_number(start, pos),
            b'-' if self.cursor.peek(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.scan_lisp_number(start, pos)
            }
            c if is_symbol_char(c) => self.scan_symbol(start, pos),
            _ => self.scan_error(start, pos, "Unexpected character"),
        }
    }

    fn consume_digits(&mut self) {
        while self.cursor.current().is_some_and(|b| b.is_ascii_digit()) {
            self.cursor.advance();
        }
    }

    fn consume_identifier_chars(&mut self) {
        while self
            .cursor
            .current()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            self.cursor.advance();
        }
    }

    fn scan_octave_set(&mut self, start: usize, pos: Span) -> Token {
        self.cursor.advance(); // 'o'
        let digits_start = self.cursor.position();
        self.consume_digits();
        let value = parse_int(self.cursor.slice_from(digits_start));
        self.tok(TokenKind::OctaveSet, start, Literal::Int(value), pos)
    }

    fn scan_voice_marker(&mut self, start: usize, pos: Span) -> Token {
        self.cursor.advance(); // 'V'
        self.consume_digits();
        self.cursor.match_byte(b':');
        self.tok(TokenKind::VoiceMarker, start, Literal::None, pos)
    }

    fn scan_number(&mut self, start: usize, pos: Span) -> Token {
        self.consume_digits();
        if self.cursor.current() == Some(b'm') && self.cursor.peek(1) == Some(b's') {
            let digits = self.cursor.slice_from(start).to_string();
            self.cursor.advance();
            self.cursor.advance();
            return self.tok(TokenKind::NoteLengthMs, start, Literal::Int(parse_int(&digits)), pos);
        }
        if self.cursor.current() == Some(b's') && !self.cursor.peek(1).is_some_and(|b| b.is_ascii_alphabetic()) {
            let digits = self.cursor.slice_from(start).to_string();
            self.cursor.advance();
            let value = parse_int(&digits) as f64;
            return self.tok(TokenKind::NoteLengthS, start, Literal::Float(value), pos);
        }
        let value = parse_int(self.cursor.slice_from(start));
        self.tok(TokenKind::NoteLength, start, Literal::Int(value), pos)
    }

    fn scan_name_like(&mut self, start: usize, pos: Span, kind: TokenKind) -> Token {
        self.cursor.advance(); // '%' or '@'
        self.consume_identifier_chars();
        self.tok(kind, start, Literal::None, pos)
    }

    fn scan_repeat(&mut self, start: usize, pos: Span) -> Token {
        self.cursor.advance(); // '*'
        let digits_start = self.cursor.position();
        self.consume_digits();
        let value = parse_int(self.cursor.slice_from(digits_start));
        self.tok(TokenKind::Repeat, start, Literal::Int(value), pos)
    }

    fn scan_repetitions(&mut self, start: usize, pos: Span) -> Token {
        self.cursor.advance(); // '\''
        while self
            .cursor
            .current()
            .is_some_and(|b| b.is_ascii_digit() || b == b',' || b == b'-')
        {
            self.cursor.advance();
        }
        self.tok(TokenKind::Repetitions, start, Literal::None, pos)
    }

    fn scan_name(&mut self, start: usize, pos: Span) -> Token {
        self.cursor.advance();
        self.consume_identifier_chars();
        self.tok(TokenKind::Name, start, Literal::None, pos)
    }

    /// Shared implementation for `ALIAS` (no escapes) and lisp `STRING`
    /// (backslash escapes the next byte without interpreting it). The error
    /// position for an unterminated string is the opening quote, not the
    /// point of failure, matching the scanner's position-at-detection rule.
    fn scan_quoted(&mut self, start: usize, pos: Span, kind: TokenKind, escapes: bool) -> Token {
        self.cursor.advance(); // opening quote
        loop {
            match self.cursor.current() {
                None => return self.scan_error(start, pos, "Unterminated string"),
                Some(b'\\') if escapes => {
                    self.cursor.advance();
                    if self.cursor.current().is_some() {
                        self.cursor.advance();
                    }
                }
                Some(b'"') => {
                    self.cursor.advance();
                    break;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
        self.tok(kind, start, Literal::None, pos)
    }

    fn scan_lisp_number(&mut self, start: usize, pos: Span) -> Token {
        self.cursor.match_byte(b'-');
        self.consume_digits();
        if self.cursor.current() == Some(b'.') {
            self.cursor.advance();
            self.consume_digits();
        }
        let lexeme = self.cursor.slice_from(start);
        let value: f64 = lexeme.parse().unwrap_or(0.0);
        self.tok(TokenKind::Number, start, Literal::Float(value), pos)
    }

    fn scan_symbol(&mut self, start: usize, pos: Span) -> Token {
        while self.cursor.current().is_some_and(is_symbol_char) {
            self.cursor.advance();
        }
        self.tok(TokenKind::Symbol, start, Literal::None, pos)
    }
}

fn is_symbol_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'?' | b'+' | b'-' | b'*' | b'/' | b'_' | b'<' | b'>' | b'=' | b'.' | b':'
        )
}

fn parse_int(digits: &str) -> i64 {
    digits.parse().unwrap_or(i64::MAX)
}
