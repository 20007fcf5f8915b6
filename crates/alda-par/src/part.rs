//! `part_declaration := NAME (SEPARATOR NAME)* ALIAS? COLON`

use alda_lex::TokenKind;

use crate::ast::{Node, NodeKind};
use crate::Parser;

/// Consumes a part declaration. Always returns a node, even if the
/// trailing `COLON` is missing - that failure is recorded as a syntax
/// error but doesn't stop the node from being built, matching upstream.
pub(crate) fn parse_part_declaration(p: &mut Parser) -> Option<Node> {
    let pos = p.pos_or_here();
    let mut names = Vec::new();

    loop {
        if p.check(TokenKind::Name) {
            let tok = p.advance().expect("checked Name");
            names.push(tok.lexeme.clone());
        }
        if !p.match_tok(TokenKind::Separator) {
            break;
        }
    }

    let alias = if p.check(TokenKind::Alias) {
        let tok = p.advance().expect("checked Alias");
        Some(strip_quotes(&tok.lexeme))
    } else {
        None
    };

    if !p.match_tok(TokenKind::Colon) {
        p.set_error("Expected ':' after part declaration");
    }

    Some(Node::new(pos, NodeKind::PartDecl { names, alias }))
}

fn strip_quotes(lexeme: &str) -> String {
    if lexeme.len() >= 2 {
        lexeme[1..lexeme.len() - 1].to_string()
    } else {
        lexeme.to_string()
    }
}
