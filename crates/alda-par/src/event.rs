//! `event := primary_event postfix?`
//! `primary_event := note_or_chord | rest | octave_set | octave_up | octave_down
//!                 | barline | sexp | cram | bracket_seq | marker | at_marker
//!                 | voice_group | NAME`
//! `postfix := REPEAT? REPETITIONS?` (applied in order, both optional and
//! independent - `c*2'1-3` wraps the `Repeat` in an `OnReps`)

use alda_lex::TokenKind;

use crate::ast::{Node, NodeKind};
use crate::{note, sexp, voice};
use crate::Parser;

pub(crate) fn parse_event(p: &mut Parser) -> Option<Node> {
    if !p.enter_nested() {
        return None;
    }
    let event = parse_primary_event(p);
    p.exit_nested();
    Some(parse_postfix(p, event?))
}

fn parse_primary_event(p: &mut Parser) -> Option<Node> {
    p.skip_newlines();
    if p.is_at_end() {
        return None;
    }
    let tok = p.peek()?;
    match tok.kind {
        TokenKind::NoteLetter => note::parse_note_or_chord(p),
        TokenKind::RestLetter => note::parse_rest(p),
        TokenKind::OctaveSet => {
            let tok = p.advance().expect("checked OctaveSet");
            let octave = match tok.literal {
                alda_lex::Literal::Int(n) => n,
                _ => 0,
            };
            let pos = tok.pos.clone();
            Some(Node::new(pos, NodeKind::OctaveSet { octave }))
        }
        TokenKind::OctaveUp => {
            let tok = p.advance().expect("checked OctaveUp");
            Some(Node::new(tok.pos.clone(), NodeKind::OctaveUp))
        }
        TokenKind::OctaveDown => {
            let tok = p.advance().expect("checked OctaveDown");
            Some(Node::new(tok.pos.clone(), NodeKind::OctaveDown))
        }
        TokenKind::Barline => {
            let tok = p.advance().expect("checked Barline");
            Some(Node::new(tok.pos.clone(), NodeKind::Barline))
        }
        TokenKind::LeftParen => sexp::parse_sexp(p),
        TokenKind::CramOpen => sexp::parse_cram(p),
        TokenKind::BracketOpen => sexp::parse_bracket_seq(p),
        TokenKind::Marker => {
            let tok = p.advance().expect("checked Marker");
            let name = tok.lexeme[1..].to_string();
            Some(Node::new(tok.pos.clone(), NodeKind::Marker { name }))
        }
        TokenKind::AtMarker => {
            let tok = p.advance().expect("checked AtMarker");
            let name = tok.lexeme[1..].to_string();
            Some(Node::new(tok.pos.clone(), NodeKind::AtMarker { name }))
        }
        TokenKind::VoiceMarker => voice::parse_voice_group(p),
        TokenKind::Name => {
            let tok = p.advance().expect("checked Name");
            let name = tok.lexeme.clone();
            Some(Node::new(tok.pos.clone(), NodeKind::VarRef { name }))
        }
        _ => None,
    }
}

fn parse_postfix(p: &mut Parser, event: Node) -> Node {
    let pos = event.pos.clone();
    let mut event = event;

    if p.check(TokenKind::Repeat) {
        let tok = p.advance().expect("checked Repeat");
        let count = match tok.literal {
            alda_lex::Literal::Int(n) => n,
            _ => 1,
        };
        event = Node::new(
            pos.clone(),
            NodeKind::Repeat {
                event: Box::new(event),
                count,
            },
        );
    }
    if p.check(TokenKind::Repetitions) {
        p.advance();
        event = Node::new(
            pos,
            NodeKind::OnReps {
                event: Box::new(event),
                reps: Vec::new(),
            },
        );
    }
    event
}

/// `event_sequence := event*`, stopping at `stop` (unless it's `EOF`, which
/// never stops anything explicitly - running out of tokens does), at a
/// failed event, or at the start of what looks like a new part declaration.
///
/// The part-declaration check here is the cheap one-token-lookahead form:
/// a bare `NAME` immediately followed by `COLON` or `SEPARATOR`. The fuller
/// bounded scan in [`Parser::is_part_declaration`] is only used by the
/// top-level loop.
pub(crate) fn parse_event_sequence(p: &mut Parser, stop: TokenKind) -> Vec<Node> {
    let mut events = Vec::new();
    while !p.is_at_end() && !p.has_error() {
        p.skip_newlines();
        if p.is_at_end() {
            break;
        }
        if stop != TokenKind::Eof && p.check(stop) {
            break;
        }
        if p.check(TokenKind::Name)
            && (p.check_next(TokenKind::Colon) || p.check_next(TokenKind::Separator))
        {
            break;
        }
        match parse_event(p) {
            Some(event) => events.push(event),
            None => break,
        }
    }
    events
}
