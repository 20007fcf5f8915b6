//! The Alda parser: recursive-descent construction of an AST from tokens.

pub mod ast;
mod event;
mod note;
mod part;
mod sexp;
mod voice;

use std::sync::Arc;

use alda_lex::{Token, TokenKind};
use alda_util::{AldaError, Result, Span};

pub use ast::{Node, NodeKind, RepRange};

/// Parses `source` into a complete AST, or the first error encountered.
///
/// Scans first. A scan error is reported as the parse result directly,
/// at the position the scanner found it, without attempting to parse at
/// all. Any partial tree the stateful [`Parser`] would otherwise have kept
/// is discarded here, matching [`alda_lex::scan`]'s own convenience-vs-
/// stateful split.
pub fn parse(source: &str, filename: Option<&str>) -> Result<Node> {
    let tokens = alda_lex::scan(source, filename)?;
    let mut parser = Parser::new(tokens, filename);
    let (root, error) = parser.run();
    match error {
        Some(err) => Err(err),
        None => Ok(root),
    }
}

/// Stateful recursive-descent parser.
///
/// Unlike [`parse`], [`Parser::run`] returns the partial tree built before
/// an error was hit alongside that error, for callers that want to inspect
/// what did parse.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    filename: Option<Arc<str>>,
    error: Option<AldaError>,
    depth: u32,
}

/// Bound on recursive-descent nesting (nested sexps/crams/brackets/voice
/// groups). The original's recursive C parser is bounded by the host's C
/// stack; this is the safe-Rust equivalent of that same limit, reported as
/// a `Memory` error rather than an aborting stack overflow.
const MAX_NESTING_DEPTH: u32 = 512;

impl Parser {
    pub fn new(tokens: Vec<Token>, filename: Option<&str>) -> Self {
        Self {
            tokens,
            current: 0,
            filename: filename.map(Arc::from),
            error: None,
            depth: 0,
        }
    }

    /// Parses the whole token stream, returning the root node and, if
    /// parsing failed, the first error encountered.
    pub fn run(&mut self) -> (Node, Option<AldaError>) {
        let root = self.parse_top();
        (root, self.error.take())
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    // --- cursor primitives ---

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len() || self.tokens[self.current].kind == TokenKind::Eof
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.current + 1)
    }

    fn advance(&mut self) -> Option<&Token> {
        if !self.is_at_end() {
            self.current += 1;
            self.tokens.get(self.current - 1)
        } else {
            self.peek()
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().map(|t| t.kind) == Some(kind)
    }

    fn check_next(&self, kind: TokenKind) -> bool {
        self.peek_next().map(|t| t.kind) == Some(kind)
    }

    fn match_tok(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_newlines(&mut self) {
        while self.match_tok(TokenKind::Newline) {}
    }

    /// Saves the cursor position for a lookahead that might need to back out
    /// without consuming anything (e.g. a `SEPARATOR` not followed by a
    /// chord member).
    fn snapshot(&self) -> usize {
        self.current
    }

    fn restore(&mut self, snapshot: usize) {
        self.current = snapshot;
    }

    fn pos_or_here(&self) -> Span {
        self.peek()
            .map(|t| t.pos.clone())
            .unwrap_or_else(|| Span::new(1, 1, self.filename.clone()))
    }

    fn set_error(&mut self, message: impl Into<String>) {
        if self.error.is_some() {
            return;
        }
        let pos = self.pos_or_here();
        self.error = Some(AldaError::syntax(message, pos));
    }

    /// Enters one level of recursive-descent nesting. Returns `false` (and
    /// sets a `Memory` error, the first-error rule applying here too) once
    /// [`MAX_NESTING_DEPTH`] is exceeded, so pathologically deep input fails
    /// cleanly instead of overflowing the stack. Every `true` return must be
    /// paired with [`Parser::exit_nested`].
    fn enter_nested(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            if self.error.is_none() {
                let pos = self.pos_or_here();
                self.error = Some(AldaError::memory("Maximum nesting depth exceeded", pos));
            }
            false
        } else {
            true
        }
    }

    fn exit_nested(&mut self) {
        self.depth -= 1;
    }

    // --- grammar: top level ---

    /// `top := (part_declaration event_sequence)* event_sequence?`
    ///
    /// Mirrors the upstream loop exactly, asymmetry included: finding a
    /// part declaration lets the loop try again for another one, but the
    /// first bare (no leading part declaration) section always ends the
    /// loop, whatever stopped its own `event_sequence`.
    fn parse_top(&mut self) -> Node {
        let pos = Span::new(1, 1, self.filename.clone());
        let mut children = Vec::new();

        while !self.is_at_end() && !self.has_error() {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }

            if self.is_part_declaration() {
                if let Some(decl) = part::parse_part_declaration(self) {
                    children.push(decl);
                }
                let events = event::parse_event_sequence(self, TokenKind::Eof);
                if !events.is_empty() {
                    let seq_pos = events[0].pos.clone();
                    children.push(Node::new(seq_pos, NodeKind::EventSeq { events }));
                }
            } else {
                let events = event::parse_event_sequence(self, TokenKind::Eof);
                if !events.is_empty() {
                    let seq_pos = events[0].pos.clone();
                    children.push(Node::new(seq_pos, NodeKind::EventSeq { events }));
                }
                break;
            }
        }

        Node::new(pos, NodeKind::Root { children })
    }

    /// Bounded, non-consuming lookahead used only by the top-level loop: is
    /// the run of tokens starting here a part declaration
    /// (`NAME (SEPARATOR NAME)* ALIAS? COLON`)? Always restores `current`.
    fn is_part_declaration(&self) -> bool {
        if !self.check(TokenKind::Name) {
            return false;
        }
        let mut cursor = self.current;
        let mut found = false;
        while cursor < self.tokens.len() {
            match self.tokens[cursor].kind {
                TokenKind::Colon => {
                    found = true;
                    break;
                }
                TokenKind::Separator | TokenKind::Alias | TokenKind::Name => {
                    cursor += 1;
                }
                _ => break,
            }
        }
        found
    }
}
