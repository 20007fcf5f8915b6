//! `note := NOTE_LETTER (SHARP | FLAT | NATURAL){1,15} duration? TIE?`
//! `note_or_chord := note (SEPARATOR (note | rest))*`
//! `rest := REST_LETTER duration?`
//! `duration := duration_component (TIE duration_component)*`

use alda_lex::{Literal, TokenKind};

use crate::ast::{Node, NodeKind};
use crate::Parser;

const MAX_ACCIDENTALS: usize = 15;

/// Parses a single note, then looks for `SEPARATOR`-joined chord members.
/// A `SEPARATOR` not followed by a note or rest (newlines in between are
/// skipped first) isn't consumed - the chord just ends there, and whatever
/// comes next is left for the caller.
pub(crate) fn parse_note_or_chord(p: &mut Parser) -> Option<Node> {
    let mut members = vec![parse_note(p)?];
    let mut is_chord = false;

    loop {
        if !p.check(TokenKind::Separator) {
            break;
        }
        let saved = p.snapshot();
        p.advance();
        p.skip_newlines();
        if p.check(TokenKind::NoteLetter) {
            members.push(parse_note(p)?);
            is_chord = true;
        } else if p.check(TokenKind::RestLetter) {
            members.push(parse_rest(p)?);
            is_chord = true;
        } else {
            p.restore(saved);
            break;
        }
    }

    if is_chord {
        let pos = members[0].pos.clone();
        Some(Node::new(pos, NodeKind::Chord { notes: members }))
    } else {
        members.into_iter().next()
    }
}

pub(crate) fn parse_note(p: &mut Parser) -> Option<Node> {
    if !p.check(TokenKind::NoteLetter) {
        return None;
    }
    let tok = p.advance().expect("checked NoteLetter");
    let letter = match tok.literal {
        Literal::Char(c) => c,
        _ => unreachable!("NOTE_LETTER always carries a char literal"),
    };
    let pos = tok.pos.clone();

    let mut accidentals = String::new();
    while accidentals.len() < MAX_ACCIDENTALS {
        let ch = match p.peek().map(|t| t.kind) {
            Some(TokenKind::Sharp) => '+',
            Some(TokenKind::Flat) => '-',
            Some(TokenKind::Natural) => '_',
            _ => break,
        };
        p.advance();
        accidentals.push(ch);
    }
    let accidentals = if accidentals.is_empty() { None } else { Some(accidentals) };

    let duration = parse_duration(p).map(Box::new);
    let slurred = p.match_tok(TokenKind::Tie);

    Some(Node::new(
        pos,
        NodeKind::Note {
            letter,
            accidentals,
            duration,
            slurred,
        },
    ))
}

pub(crate) fn parse_rest(p: &mut Parser) -> Option<Node> {
    if !p.check(TokenKind::RestLetter) {
        return None;
    }
    let tok = p.advance().expect("checked RestLetter");
    let pos = tok.pos.clone();
    let duration = parse_duration(p).map(Box::new);
    Some(Node::new(pos, NodeKind::Rest { duration }))
}

fn is_duration_component(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::NoteLength | TokenKind::NoteLengthMs | TokenKind::NoteLengthS
    )
}

/// Absent if the current token isn't a duration component. A trailing `TIE`
/// that isn't itself followed by another component is left unconsumed, so
/// it can be picked up as the note's slur marker instead.
pub(crate) fn parse_duration(p: &mut Parser) -> Option<Node> {
    if !p.peek().is_some_and(|t| is_duration_component(t.kind)) {
        return None;
    }
    let pos = p.peek().expect("checked above").pos.clone();
    let mut components = vec![parse_duration_component(p)?];

    while p.check(TokenKind::Tie) && p.peek_next().is_some_and(|t| is_duration_component(t.kind)) {
        p.advance(); // TIE
        components.push(parse_duration_component(p)?);
    }

    Some(Node::new(pos, NodeKind::Duration { components }))
}

fn parse_duration_component(p: &mut Parser) -> Option<Node> {
    let tok = p.peek()?;
    match tok.kind {
        TokenKind::NoteLength => {
            let tok = p.advance().expect("checked NoteLength");
            let denominator = match tok.literal {
                Literal::Int(n) => n,
                _ => unreachable!("NOTE_LENGTH always carries an int literal"),
            };
            let pos = tok.pos.clone();
            let mut dots = 0u32;
            while p.match_tok(TokenKind::Dot) {
                dots += 1;
            }
            Some(Node::new(pos, NodeKind::NoteLength { denominator, dots }))
        }
        TokenKind::NoteLengthMs => {
            let tok = p.advance().expect("checked NoteLengthMs");
            let ms = match tok.literal {
                Literal::Int(n) => n,
                _ => unreachable!("NOTE_LENGTH_MS always carries an int literal"),
            };
            Some(Node::new(tok.pos.clone(), NodeKind::NoteLengthMs { ms }))
        }
        TokenKind::NoteLengthS => {
            let tok = p.advance().expect("checked NoteLengthS");
            let seconds = match tok.literal {
                Literal::Float(f) => f,
                _ => unreachable!("NOTE_LENGTH_S always carries a float literal"),
            };
            Some(Node::new(tok.pos.clone(), NodeKind::NoteLengthS { seconds }))
        }
        _ => None,
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
    fn single_note_letters_produce_note_nodes() {
        for letter in "abcdefg".chars() {
            let events = root_events(&letter.to_string());
            assert_eq!(events.len(), 1);
            match &events[0].kind {
                NodeKind::Note { letter: l, duration, accidentals, slurred } => {
                    assert_eq!(*l, letter);
                    assert!(duration.is_none());
                    assert!(accidentals.is_none());
                    assert!(!slurred);
                }
                other => panic!("expected Note, got {other:?}"),
            }
        }
    }

    #[test]
    fn chord_of_three_members() {
        let events = root_events("c/e/g");
        assert_eq!(events.len(), 1);
        match &events[0].kind {
            NodeKind::Chord { notes } => {
                assert_eq!(notes.len(), 3);
                for (note, letter) in notes.iter().zip(['c', 'e', 'g']) {
                    match &note.kind {
                        NodeKind::Note { letter: l, .. } => assert_eq!(*l, letter),
                        other => panic!("expected Note, got {other:?}"),
                    }
                }
            }
            other => panic!("expected Chord, got {other:?}"),
        }
    }

    #[test]
    fn single_separator_with_no_following_note_is_not_a_chord() {
        let events = root_events("c d e f");
        assert_eq!(events.len(), 4);
        for event in &events {
            assert!(matches!(event.kind, NodeKind::Note { .. }));
        }
    }

    #[test]
    fn dotted_note_length() {
        let events = root_events("c4.");
        match &events[0].kind {
            NodeKind::Note { duration: Some(d), .. } => match &d.kind {
                NodeKind::Duration { components } => {
                    assert_eq!(components.len(), 1);
                    assert_eq!(
                        components[0].kind,
                        NodeKind::NoteLength { denominator: 4, dots: 1 }
                    );
                }
                other => panic!("expected Duration, got {other:?}"),
            },
            other => panic!("expected a duration, got {other:?}"),
        }
    }

    #[test]
    fn tied_duration_components() {
        let events = root_events("c4~8");
        match &events[0].kind {
            NodeKind::Note { duration: Some(d), .. } => match &d.kind {
                NodeKind::Duration { components } => {
                    assert_eq!(components.len(), 2);
                    assert_eq!(
                        components[0].kind,
                        NodeKind::NoteLength { denominator: 4, dots: 0 }
                    );
                    assert_eq!(
                        components[1].kind,
                        NodeKind::NoteLength { denominator: 8, dots: 0 }
                    );
                }
                other => panic!("expected Duration, got {other:?}"),
            },
            other => panic!("expected a duration, got {other:?}"),
        }
    }

    #[test]
    fn trailing_tie_after_duration_is_a_slur_not_another_component() {
        let events = root_events("c4~");
        match &events[0].kind {
            NodeKind::Note { duration: Some(_), slurred, .. } => assert!(*slurred),
            other => panic!("expected a slurred note, got {other:?}"),
        }
    }

    #[test]
    fn ms_and_s_durations() {
        let events = root_events("c500ms");
        match &events[0].kind {
            NodeKind::Note { duration: Some(d), .. } => match &d.kind {
                NodeKind::Duration { components } => {
                    assert_eq!(components[0].kind, NodeKind::NoteLengthMs { ms: 500 });
                }
                other => panic!("expected Duration, got {other:?}"),
            },
            other => panic!("expected a duration, got {other:?}"),
        }

        let events = root_events("c2s");
        match &events[0].kind {
            NodeKind::Note { duration: Some(d), .. } => match &d.kind {
                NodeKind::Duration { components } => {
                    assert_eq!(components[0].kind, NodeKind::NoteLengthS { seconds: 2.0 });
                }
                other => panic!("expected Duration, got {other:?}"),
            },
            other => panic!("expected a duration, got {other:?}"),
        }
    }

    #[test]
    fn accidentals_are_collected_into_a_string() {
        let events = root_events("c++");
        match &events[0].kind {
            NodeKind::Note { accidentals: Some(a), .. } => assert_eq!(a, "++"),
            other => panic!("expected accidentals, got {other:?}"),
        }
    }

    #[test]
    fn rest_with_duration() {
        let events = root_events("r4");
        match &events[0].kind {
            NodeKind::Rest { duration: Some(_) } => {}
            other => panic!("expected a rest with a duration, got {other:?}"),
        }
    }

    #[test]
    fn chord_may_include_a_rest_member() {
        let events = root_events("c/r");
        match &events[0].kind {
            NodeKind::Chord { notes } => {
                assert_eq!(notes.len(), 2);
                assert!(matches!(notes[0].kind, NodeKind::Note { .. }));
                assert!(matches!(notes[1].kind, NodeKind::Rest { .. }));
            }
            other => panic!("expected Chord, got {other:?}"),
        }
    }
}
