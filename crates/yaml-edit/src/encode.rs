//! Rendering values back to YAML text.
//!
//! Two entry points: [`encode_flow`] for inline syntax and [`encode_block`]
//! for indentation-based syntax. Block output carries no indentation on its
//! first line and no trailing line break; splice sites supply both, which
//! keeps every byte of separator text under the planner's control.

use crate::Value;
use yaml_span::ScalarStyle;
use yaml_rust2::{Yaml, YamlLoader};

/// Code units that can never appear raw in emitted output.
const UNPRINTABLE: &[u32] = &[0, 7, 8, 11, 12, 13, 27, 133, 160, 8232, 8233];

/// Render a value in flow style: `[a, b]`, `{k: v}`, scalars inline.
pub(crate) fn encode_flow(value: &Value) -> String {
    match value.plain() {
        Value::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(encode_flow).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Mapping(entries) => {
            let parts: Vec<String> = entries
                .iter()
                .map(|(key, val)| format!("{}: {}", encode_flow(key), encode_flow(val)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        _ => encode_flow_scalar(value),
    }
}

/// Render a value in block style at the given content column.
///
/// The first line is emitted without leading indentation; continuation
/// lines are indented to `indent` (collection entries) or per the scalar
/// style's needs. Values pinned to flow style, and empty collections, are
/// rendered in flow.
pub(crate) fn encode_block(value: &Value, indent: usize, step: usize, line_ending: &str) -> String {
    match value.plain() {
        Value::Sequence(items) => {
            if !value.collection_style().is_block_capable() || items.is_empty() {
                return encode_flow(value);
            }
            let pad = " ".repeat(indent);
            let mut out = String::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(line_ending);
                    out.push_str(&pad);
                }
                out.push_str("- ");
                out.push_str(&encode_entry_value(item, indent + 2, indent + step, step, line_ending));
            }
            out
        }
        Value::Mapping(entries) => {
            if !value.collection_style().is_block_capable() || entries.is_empty() {
                return encode_flow(value);
            }
            let pad = " ".repeat(indent);
            let mut out = String::new();
            for (i, (key, val)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(line_ending);
                    out.push_str(&pad);
                }
                out.push_str(&encode_flow(key));
                out.push(':');
                if val.is_collection()
                    && val.collection_style().is_block_capable()
                    && !val.is_empty_collection()
                {
                    out.push_str(line_ending);
                    out.push_str(&" ".repeat(indent + step));
                    out.push_str(&encode_block(val, indent + step, step, line_ending));
                } else {
                    out.push(' ');
                    out.push_str(&encode_entry_value(
                        val,
                        indent + step,
                        indent + step,
                        step,
                        line_ending,
                    ));
                }
            }
            out
        }
        _ => encode_block_scalar(value, indent, line_ending),
    }
}

/// Render a child value that sits after a `- ` or `: ` on its parent's
/// line. `collection_indent` is the column nested block entries land on;
/// `scalar_indent` the column block-scalar bodies land on.
fn encode_entry_value(
    value: &Value,
    collection_indent: usize,
    scalar_indent: usize,
    step: usize,
    line_ending: &str,
) -> String {
    if value.is_collection() {
        if value.collection_style().is_block_capable() && !value.is_empty_collection() {
            encode_block(value, collection_indent, step, line_ending)
        } else {
            encode_flow(value)
        }
    } else {
        encode_block_scalar(value, scalar_indent, line_ending)
    }
}

/// Render a scalar in flow context. Literal and folded requests fall back
/// to quoting; everything else follows the block rules.
fn encode_flow_scalar(value: &Value) -> String {
    match value.plain() {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => float_repr(*f),
        Value::String(s) => {
            if has_unprintable(s) {
                return double_quoted(s);
            }
            match value.scalar_style() {
                ScalarStyle::SingleQuoted => {
                    try_single_quoted(s).unwrap_or_else(|| double_quoted(s))
                }
                ScalarStyle::DoubleQuoted => double_quoted(s),
                _ => try_plain(s).unwrap_or_else(|| double_quoted(s)),
            }
        }
        Value::Sequence(_) | Value::Mapping(_) | Value::Styled(_) => {
            unreachable!("collections handled by encode_flow")
        }
    }
}

/// Render a scalar in block context at the given body column.
fn encode_block_scalar(value: &Value, indent: usize, line_ending: &str) -> String {
    match value.plain() {
        Value::String(s) => {
            if has_unprintable(s) {
                return double_quoted(s);
            }
            match value.scalar_style() {
                ScalarStyle::Plain => try_plain(s).unwrap_or_else(|| double_quoted(s)),
                ScalarStyle::SingleQuoted => {
                    try_single_quoted(s).unwrap_or_else(|| double_quoted(s))
                }
                ScalarStyle::DoubleQuoted => double_quoted(s),
                ScalarStyle::Literal => {
                    try_block_scalar(s, '|', indent, line_ending)
                        .unwrap_or_else(|| double_quoted(s))
                }
                ScalarStyle::Folded => {
                    try_block_scalar(s, '>', indent, line_ending)
                        .unwrap_or_else(|| double_quoted(s))
                }
                ScalarStyle::Any => try_plain(s).unwrap_or_else(|| double_quoted(s)),
            }
        }
        _ => encode_flow_scalar(value),
    }
}

/// A string is dangerous as a plain scalar if re-parsing it would yield a
/// different value, fail outright, or if it contains structural sentinels
/// (brackets, braces, commas, quotes).
pub(crate) fn is_dangerous_string(s: &str) -> bool {
    if s.chars()
        .any(|c| matches!(c, '{' | '}' | '[' | ']' | ',' | '\'' | '"'))
    {
        return true;
    }
    match YamlLoader::load_from_str(s) {
        Err(_) => true,
        Ok(docs) => docs.len() != 1 || docs[0] != Yaml::String(s.to_string()),
    }
}

fn try_plain(s: &str) -> Option<String> {
    if s.is_empty() || s.contains('\n') || is_dangerous_string(s) {
        None
    } else {
        Some(s.to_string())
    }
}

fn try_single_quoted(s: &str) -> Option<String> {
    if s.contains('\n') {
        None
    } else {
        Some(format!("'{}'", s.replace('\'', "''")))
    }
}

/// Literal (`|`) or folded (`>`) emission.
///
/// Chomping is `+` iff the string ends with a line break; its k trailing
/// breaks materialize as k−1 blank body lines, the splice context's own
/// break supplying the final one. Returns `None` when the style cannot
/// round-trip the string (empty, leading whitespace, folded with trailing
/// spaces).
fn try_block_scalar(s: &str, indicator: char, indent: usize, line_ending: &str) -> Option<String> {
    if s.is_empty() || s.starts_with(' ') || s.starts_with('\t') || s.starts_with('\n') {
        return None;
    }
    let core = s.trim_end_matches('\n');
    let trailing_breaks = s.len() - core.len();
    if indicator == '>' && (core.ends_with(' ') || core.ends_with('\t')) {
        return None;
    }

    let chomp = if trailing_breaks > 0 { '+' } else { '-' };
    let pad = " ".repeat(indent);
    let mut out = format!("{}{}{}", indicator, chomp, line_ending);

    let lines: Vec<&str> = core.split('\n').collect();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            if indicator == '>'
                && !line.is_empty()
                && !lines[i - 1].is_empty()
                && !line.starts_with(' ')
            {
                // Folding joins adjacent lines; an extra break keeps them
                // apart (YAML's paragraph separator).
                out.push_str(line_ending);
            }
            out.push_str(line_ending);
        }
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
    }
    for _ in 1..trailing_breaks {
        out.push_str(line_ending);
    }
    Some(out)
}

fn has_unprintable(s: &str) -> bool {
    s.chars().any(|c| UNPRINTABLE.contains(&(c as u32)))
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c as u32 {
            0 => out.push_str("\\0"),
            7 => out.push_str("\\a"),
            8 => out.push_str("\\b"),
            9 => out.push_str("\\t"),
            10 => out.push_str("\\n"),
            11 => out.push_str("\\v"),
            12 => out.push_str("\\f"),
            13 => out.push_str("\\r"),
            27 => out.push_str("\\e"),
            34 => out.push_str("\\\""),
            47 => out.push_str("\\/"),
            92 => out.push_str("\\\\"),
            133 => out.push_str("\\N"),
            160 => out.push_str("\\_"),
            8232 => out.push_str("\\L"),
            8233 => out.push_str("\\P"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Canonical textual form for a float: keeps a decimal point so the value
/// re-parses as a float, and uses YAML's spellings for the specials.
pub(crate) fn float_repr(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { ".inf" } else { "-.inf" }.to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e17 {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}
