//! Generative properties of the parser, supplementing the boundary-case
//! unit tests colocated in `src/*.rs`.

use alda_par::NodeKind;
use quickcheck_macros::quickcheck;

/// Every successful parse produces exactly one root with a position at or
/// after line 1, column 1, and the root never has any siblings of its own
/// (it's the sole return value).
#[quickcheck]
fn successful_parse_always_yields_a_single_root(input: String) -> bool {
    let printable: String = input
        .chars()
        .filter(|c| c.is_ascii() && (c.is_ascii_graphic() || *c == ' ' || *c == '\n'))
        .collect();
    match alda_par::parse(&printable, None) {
        Ok(node) => node.pos.line >= 1 && node.pos.column >= 1 && matches!(node.kind, NodeKind::Root { .. }),
        Err(_) => true,
    }
}

#[quickcheck]
fn parsing_is_deterministic(input: String) -> bool {
    let printable: String = input
        .chars()
        .filter(|c| c.is_ascii() && (c.is_ascii_graphic() || *c == ' ' || *c == '\n'))
        .collect();
    let first = alda_par::parse(&printable, None);
    let second = alda_par::parse(&printable, None);
    match (first, second) {
        (Ok(a), Ok(b)) => a == b,
        (Err(a), Err(b)) => a.kind() == b.kind() && a.pos() == b.pos(),
        _ => false,
    }
}
