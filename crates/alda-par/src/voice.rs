//! `voice_group := VOICE_MARKER event* (VOICE_MARKER event*)* sentinel?`
//!
//! The literal marker `V0:` is a sentinel: it's consumed but introduces no
//! voice and ends the group.

use alda_lex::TokenKind;

use crate::ast::{Node, NodeKind};
use crate::event;
use crate::Parser;

pub(crate) fn parse_voice_group(p: &mut Parser) -> Option<Node> {
    let pos = p.peek()?.pos.clone();
    let mut voices = Vec::new();

    while p.check(TokenKind::VoiceMarker) {
        let tok = p.advance().expect("checked VoiceMarker");
        let number = voice_number(&tok.lexeme);
        if number == 0 {
            break;
        }
        let voice_pos = tok.pos.clone();
        let events = parse_voice_events(p);
        voices.push(Node::new(voice_pos, NodeKind::Voice { number, events }));
    }

    Some(Node::new(pos, NodeKind::VoiceGroup { voices }))
}

/// A voice's own events run until the next `VOICE_MARKER` (not consumed
/// here - the outer loop in [`parse_voice_group`] reads it next), `EOF`, or
/// a failed event.
fn parse_voice_events(p: &mut Parser) -> Vec<Node> {
    let mut events = Vec::new();
    while !p.is_at_end() && !p.has_error() {
        p.skip_newlines();
        if p.is_at_end() || p.check(TokenKind::VoiceMarker) {
            break;
        }
        match event::parse_event(p) {
            Some(ev) => events.push(ev),
            None => break,
        }
    }
    events
}

/// Parses the digits following `V` in a `VOICE_MARKER` lexeme like `V1:` or
/// `V12`.
fn voice_number(lexeme: &str) -> i64 {
    let digits: String = lexeme
        .chars()
        .skip(1)
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
