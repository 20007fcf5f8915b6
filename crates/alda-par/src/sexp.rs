//! `sexp := LEFT_PAREN (sexp | SYMBOL | NUMBER | STRING)* RIGHT_PAREN`
//! `cram := CRAM_OPEN event_sequence CRAM_CLOSE duration?`
//! `bracket_seq := BRACKET_OPEN event_sequence BRACKET_CLOSE`

use alda_lex::{Literal, TokenKind};

use crate::ast::{Node, NodeKind};
use crate::{event, note};
use crate::Parser;

pub(crate) fn parse_sexp(p: &mut Parser) -> Option<Node> {
    if !p.enter_nested() {
        return None;
    }
    let result = parse_sexp_body(p);
    p.exit_nested();
    result
}

/// Nested `sexp`s recurse directly into this function rather than back
/// through [`crate::event::parse_event`], so the nesting-depth guard lives
/// here rather than relying on the one in `parse_event`.
fn parse_sexp_body(p: &mut Parser) -> Option<Node> {
    let open = p.advance().expect("caller checked LeftParen");
    let pos = open.pos.clone();
    let mut elements = Vec::new();

    loop {
        p.skip_newlines();
        if p.has_error() {
            break;
        }
        if p.check(TokenKind::RightParen) {
            p.advance();
            break;
        }
        if p.is_at_end() {
            p.set_error("Expected ')' to close S-expression");
            break;
        }
        match p.peek().map(|t| t.kind) {
            Some(TokenKind::LeftParen) => {
                let Some(nested) = parse_sexp(p) else { break };
                elements.push(nested);
            }
            Some(TokenKind::Symbol) => {
                let tok = p.advance().expect("checked Symbol");
                let name = tok.lexeme.clone();
                elements.push(Node::new(tok.pos.clone(), NodeKind::LispSymbol { name }));
            }
            Some(TokenKind::Number) => {
                let tok = p.advance().expect("checked Number");
                let value = match tok.literal {
                    Literal::Float(f) => f,
                    _ => unreachable!("NUMBER always carries a float literal"),
                };
                elements.push(Node::new(tok.pos.clone(), NodeKind::LispNumber { value }));
            }
            Some(TokenKind::String) => {
                let tok = p.advance().expect("checked String");
                let value = strip_quotes(&tok.lexeme);
                elements.push(Node::new(tok.pos.clone(), NodeKind::LispString { value }));
            }
            _ => {
                p.set_error("Unexpected token in S-expression");
                break;
            }
        }
    }

    Some(Node::new(pos, NodeKind::LispList { elements }))
}

pub(crate) fn parse_cram(p: &mut Parser) -> Option<Node> {
    let open = p.advance().expect("caller checked CramOpen");
    let pos = open.pos.clone();
    let events = event::parse_event_sequence(p, TokenKind::CramClose);
    if !p.match_tok(TokenKind::CramClose) {
        p.set_error("Expected '}' to close cram");
    }
    let duration = note::parse_duration(p).map(Box::new);
    Some(Node::new(pos, NodeKind::Cram { events, duration }))
}

pub(crate) fn parse_bracket_seq(p: &mut Parser) -> Option<Node> {
    let open = p.advance().expect("caller checked BracketOpen");
    let pos = open.pos.clone();
    let events = event::parse_event_sequence(p, TokenKind::BracketClose);
    if !p.match_tok(TokenKind::BracketClose) {
        p.set_error("Expected ']' to close bracket sequence");
    }
    Some(Node::new(pos, NodeKind::BracketSeq { events }))
}

/// Strips the surrounding quotes from a `STRING` lexeme. A lexeme of length
/// 2 (just `""`) has no content to strip and yields an empty string.
fn strip_quotes(lexeme: &str) -> String {
    if lexeme.len() > 2 {
        lexeme[1..lexeme.len() - 1].to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn root_events(source: &str) -> Vec<Node> {
        let root = parse(source, None).unwrap();
        let NodeKind::Root { children } = root.kind else {
            panic!("expected Root")
        };
        let NodeKind::EventSeq { events } = children.into_iter().next().unwrap().kind else {
            panic!("expected EVENT_SEQ as first child")
        };
        events
    }

    #[test]
    fn simple_sexp() {
        let events = root_events("(tempo 120)");
        match &events[0].kind {
            NodeKind::LispList { elements } => {
                assert_eq!(elements.len(), 2);
                assert_eq!(elements[0].kind, NodeKind::LispSymbol { name: "tempo".into() });
                assert_eq!(elements[1].kind, NodeKind::LispNumber { value: 120.0 });
            }
            other => panic!("expected LispList, got {other:?}"),
        }
    }

    #[test]
    fn nested_sexp() {
        let events = root_events("(set-attr (volume 50))");
        match &events[0].kind {
            NodeKind::LispList { elements } => {
                assert_eq!(elements.len(), 2);
                assert!(matches!(elements[1].kind, NodeKind::LispList { .. }));
            }
            other => panic!("expected LispList, got {other:?}"),
        }
    }

    #[test]
    fn sexp_string_argument() {
        let events = root_events("(println \"hi\")");
        match &events[0].kind {
            NodeKind::LispList { elements } => {
                assert_eq!(elements[1].kind, NodeKind::LispString { value: "hi".into() });
            }
            other => panic!("expected LispList, got {other:?}"),
        }
    }

    #[test]
    fn missing_close_paren_is_syntax_error() {
        let err = parse("(tempo 120", None).unwrap_err();
        assert_eq!(err.kind(), alda_util::ErrorKind::Syntax);
    }

    #[test]
    fn bracket_sequence_with_repeat() {
        let events = root_events("[c d e] *3");
        match &events[0].kind {
            NodeKind::Repeat { event, count } => {
                assert_eq!(*count, 3);
                match &event.kind {
                    NodeKind::BracketSeq { events } => assert_eq!(events.len(), 3),
                    other => panic!("expected BracketSeq, got {other:?}"),
                }
            }
            other => panic!("expected Repeat, got {other:?}"),
        }
    }

    #[test]
    fn missing_closing_bracket_is_syntax_error() {
        let err = parse("[c d e", None).unwrap_err();
        assert_eq!(err.kind(), alda_util::ErrorKind::Syntax);
    }

    #[test]
    fn cram_with_duration() {
        let events = root_events("{c d e}8");
        match &events[0].kind {
            NodeKind::Cram { events, duration } => {
                assert_eq!(events.len(), 3);
                assert!(duration.is_some());
            }
            other => panic!("expected Cram, got {other:?}"),
        }
    }

    #[test]
    fn missing_closing_cram_brace_is_syntax_error() {
        let err = parse("{c d e", None).unwrap_err();
        assert_eq!(err.kind(), alda_util::ErrorKind::Syntax);
    }
}
