//! The `parse` subcommand: runs the full scan → parse pipeline and prints
//! the resulting AST.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use alda_par::{Node, NodeKind};

use super::{read_source, render_alda_error, OutputFormat};
use crate::error::Result;

pub struct ParseArgs {
    pub input: Option<PathBuf>,
    pub filename: Option<String>,
    pub format: OutputFormat,
}

pub fn run_parse(args: ParseArgs) -> Result<()> {
    let (source, filename) = read_source(args.input.as_deref(), args.filename.as_deref())?;
    debug!(bytes = source.len(), "read source for parse");

    let root = alda_par::parse(&source, filename.as_deref())
        .map_err(|err| render_alda_error(&err, &source))?;
    info!("parse succeeded");

    match args.format {
        OutputFormat::Pretty => print_pretty(&root, 0),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&to_json(&root))?),
    }
    Ok(())
}

/// Prints an indented `type @ line:column` tree, recursing into every
/// container/composite node's children.
fn print_pretty(node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{} @ {}:{}", node_label(&node.kind), node.pos.line, node.pos.column);
    for child in children_of(&node.kind) {
        print_pretty(child, depth + 1);
    }
}

fn node_label(kind: &NodeKind) -> String {
    match kind {
        NodeKind::Note { letter, slurred, .. } => {
            format!("Note({letter}{})", if *slurred { ", slurred" } else { "" })
        }
        NodeKind::Rest { .. } => "Rest".to_string(),
        NodeKind::NoteLength { denominator, dots } => format!("NoteLength({denominator}, dots={dots})"),
        NodeKind::NoteLengthMs { ms } => format!("NoteLengthMs({ms})"),
        NodeKind::NoteLengthS { seconds } => format!("NoteLengthS({seconds})"),
        NodeKind::OctaveSet { octave } => format!("OctaveSet({octave})"),
        NodeKind::OctaveUp => "OctaveUp".to_string(),
        NodeKind::OctaveDown => "OctaveDown".to_string(),
        NodeKind::Barline => "Barline".to_string(),
        NodeKind::LispSymbol { name } => format!("LispSymbol({name})"),
        NodeKind::LispNumber { value } => format!("LispNumber({value})"),
        NodeKind::LispString { value } => format!("LispString({value:?})"),
        NodeKind::VarRef { name } => format!("VarRef({name})"),
        NodeKind::Marker { name } => format!("Marker({name})"),
        NodeKind::AtMarker { name } => format!("AtMarker({name})"),
        NodeKind::Root { .. } => "Root".to_string(),
        NodeKind::EventSeq { .. } => "EventSeq".to_string(),
        NodeKind::Chord { .. } => "Chord".to_string(),
        NodeKind::Duration { .. } => "Duration".to_string(),
        NodeKind::LispList { .. } => "LispList".to_string(),
        NodeKind::VoiceGroup { .. } => "VoiceGroup".to_string(),
        NodeKind::BracketSeq { .. } => "BracketSeq".to_string(),
        NodeKind::PartDecl { names, alias } => {
            format!("PartDecl({}{})", names.join("/"), alias.as_deref().map(|a| format!(", alias={a:?}")).unwrap_or_default())
        }
        NodeKind::VarDef { name, .. } => format!("VarDef({name})"),
        NodeKind::Voice { number, .. } => format!("Voice({number})"),
        NodeKind::Cram { .. } => "Cram".to_string(),
        NodeKind::Repeat { count, .. } => format!("Repeat(x{count})"),
        NodeKind::OnReps { .. } => "OnReps".to_string(),
    }
}

fn children_of(kind: &NodeKind) -> Vec<&Node> {
    match kind {
        NodeKind::Root { children } => children.iter().collect(),
        NodeKind::EventSeq { events } => events.iter().collect(),
        NodeKind::Chord { notes } => notes.iter().collect(),
        NodeKind::Duration { components } => components.iter().collect(),
        NodeKind::LispList { elements } => elements.iter().collect(),
        NodeKind::VoiceGroup { voices } => voices.iter().collect(),
        NodeKind::BracketSeq { events } => events.iter().collect(),
        NodeKind::VarDef { events, .. } => events.iter().collect(),
        NodeKind::Voice { events, .. } => events.iter().collect(),
        NodeKind::Cram { events, duration } => {
            let mut out: Vec<&Node> = events.iter().collect();
            out.extend(duration.as_deref());
            out
        }
        NodeKind::Note { duration, .. } => duration.as_deref().into_iter().collect(),
        NodeKind::Rest { duration } => duration.as_deref().into_iter().collect(),
        NodeKind::Repeat { event, .. } => vec![event.as_ref()],
        NodeKind::OnReps { event, .. } => vec![event.as_ref()],
        _ => Vec::new(),
    }
}

#[derive(Serialize)]
struct NodeView {
    #[serde(rename = "type")]
    kind: String,
    line: u32,
    column: u32,
    #[serde(flatten)]
    data: Value,
}

fn to_json(node: &Node) -> NodeView {
    let (kind, data) = data_of(&node.kind);
    NodeView {
        kind: kind.to_string(),
        line: node.pos.line,
        column: node.pos.column,
        data,
    }
}

fn json_children<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Value {
    Value::Array(nodes.into_iter().map(to_json_value).collect())
}

fn to_json_value(node: &Node) -> Value {
    serde_json::to_value(to_json(node)).unwrap_or(Value::Null)
}

fn data_of(kind: &NodeKind) -> (&'static str, Value) {
    match kind {
        NodeKind::Barline => ("BARLINE", json!({})),
        NodeKind::OctaveUp => ("OCTAVE_UP", json!({})),
        NodeKind::OctaveDown => ("OCTAVE_DOWN", json!({})),
        NodeKind::NoteLength { denominator, dots } => {
            ("NOTE_LENGTH", json!({ "denominator": denominator, "dots": dots }))
        }
        NodeKind::NoteLengthMs { ms } => ("NOTE_LENGTH_MS", json!({ "ms": ms })),
        NodeKind::NoteLengthS { seconds } => ("NOTE_LENGTH_S", json!({ "seconds": seconds })),
        NodeKind::OctaveSet { octave } => ("OCTAVE_SET", json!({ "octave": octave })),
        NodeKind::LispSymbol { name } => ("LISP_SYMBOL", json!({ "name": name })),
        NodeKind::LispNumber { value } => ("LISP_NUMBER", json!({ "value": value })),
        NodeKind::LispString { value } => ("LISP_STRING", json!({ "value": value })),
        NodeKind::VarRef { name } => ("VAR_REF", json!({ "name": name })),
        NodeKind::Marker { name } => ("MARKER", json!({ "name": name })),
        NodeKind::AtMarker { name } => ("AT_MARKER", json!({ "name": name })),
        NodeKind::Root { children } => ("ROOT", json!({ "children": json_children(children) })),
        NodeKind::EventSeq { events } => ("EVENT_SEQ", json!({ "events": json_children(events) })),
        NodeKind::Chord { notes } => ("CHORD", json!({ "notes": json_children(notes) })),
        NodeKind::Duration { components } => {
            ("DURATION", json!({ "components": json_children(components) }))
        }
        NodeKind::LispList { elements } => ("LISP_LIST", json!({ "elements": json_children(elements) })),
        NodeKind::VoiceGroup { voices } => ("VOICE_GROUP", json!({ "voices": json_children(voices) })),
        NodeKind::BracketSeq { events } => ("BRACKET_SEQ", json!({ "events": json_children(events) })),
        NodeKind::PartDecl { names, alias } => {
            ("PART_DECL", json!({ "names": names, "alias": alias }))
        }
        NodeKind::Note { letter, accidentals, duration, slurred } => (
            "NOTE",
            json!({
                "letter": letter.to_string(),
                "accidentals": accidentals,
                "duration": duration.as_deref().map(to_json_value),
                "slurred": slurred,
            }),
        ),
        NodeKind::Rest { duration } => {
            ("REST", json!({ "duration": duration.as_deref().map(to_json_value) }))
        }
        NodeKind::VarDef { name, events } => {
            ("VAR_DEF", json!({ "name": name, "events": json_children(events) }))
        }
        NodeKind::Voice { number, events } => {
            ("VOICE", json!({ "number": number, "events": json_children(events) }))
        }
        NodeKind::Cram { events, duration } => (
            "CRAM",
            json!({ "events": json_children(events), "duration": duration.as_deref().map(to_json_value) }),
        ),
        NodeKind::Repeat { event, count } => {
            ("REPEAT", json!({ "event": to_json_value(event), "count": count }))
        }
        NodeKind::OnReps { event, reps } => (
            "ON_REPS",
            json!({ "event": to_json_value(event), "reps": reps.iter().map(|r| json!({"start": r.start, "end": r.end})).collect::<Vec<_>>() }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_view_round_trips_through_serde_value() {
        let root = alda_par::parse("piano: c4.", None).unwrap();
        let value = serde_json::to_value(to_json(&root)).unwrap();
        assert_eq!(value["type"], "ROOT");
        assert!(value["children"].is_array());
    }

    #[test]
    fn pretty_print_does_not_panic_on_a_full_score() {
        let root = alda_par::parse(
            "piano: o4 c8 d e f g4 a b > c*2\n(tempo 120)\n[e f g]2 d4.~8",
            None,
        )
        .unwrap();
        print_pretty(&root, 0);
    }
}
