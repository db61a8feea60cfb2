//! Splice planning for block sequences.

use super::Ctx;
use crate::{encode, normalize, scan, Error, Result, SourceEdit, Value};
use yaml_span::YamlNode;

/// Append a new element after the last one.
///
/// The splice lands just before the line break that ends the last
/// element's last line (trailing comment-only lines included), so the new
/// `- ` line slides in between the element and whatever follows.
pub(crate) fn append(ctx: &Ctx, list: &YamlNode, value: &Value) -> Result<SourceEdit> {
    let items = list.sequence().unwrap_or(&[]);
    let last = items.last().ok_or(Error::EmptyBlockIndent)?;
    let indent = scan::sequence_indent(ctx.source, list)?;

    let content_end = scan::content_end(ctx.source, last);
    let (mut offset, _comments, crossed) = scan::line_start_after_comments(ctx.source, content_end);
    if crossed {
        offset = scan::rewind_line_break(ctx.source, offset);
    }

    let encoded = encode::encode_block(
        value,
        element_encode_indent(value, indent, ctx.step),
        ctx.step,
        ctx.line_ending,
    );
    let chunk = format!("{}{}- {}", ctx.line_ending, " ".repeat(indent), encoded);
    let chunk = normalize::normalize_block(ctx.source, ctx.line_ending, offset, value, chunk);
    Ok(SourceEdit::new(offset, 0, chunk))
}

/// Insert a new element before the element currently at `index`.
pub(crate) fn insert(ctx: &Ctx, list: &YamlNode, index: usize, value: &Value) -> Result<SourceEdit> {
    let items = list.sequence().unwrap_or(&[]);
    if index >= items.len() {
        return append(ctx, list, value);
    }

    let indent = scan::sequence_indent(ctx.source, list)?;
    let hyphen = hyphen_of(ctx.source, list, index);

    // A hyphen directly preceded by another hyphen (no intervening line
    // break) means this list is nested on its parent's `- ` line.
    let nested_outer = if hyphen == 0 {
        None
    } else {
        let before = &ctx.source[..hyphen];
        match (before.rfind('\n'), before.rfind('-')) {
            (_, None) => None,
            (None, Some(outer)) => Some(outer),
            (Some(newline), Some(outer)) => (outer > newline).then_some(outer),
        }
    };

    match nested_outer {
        None => {
            let offset = scan::line_start(ctx.source, hyphen);
            let encoded = encode::encode_block(
                value,
                element_encode_indent(value, indent, ctx.step),
                ctx.step,
                ctx.line_ending,
            );
            let chunk = format!("{}- {}{}", " ".repeat(indent), encoded, ctx.line_ending);
            Ok(SourceEdit::new(offset, 0, chunk))
        }
        Some(outer) => {
            // Take over the `- ` slot and push the displaced element onto
            // its own line, aligned with its original column.
            let offset = outer + 2;
            let column = scan::column(ctx.source, hyphen);
            let encoded = encode::encode_block(
                value,
                element_encode_indent(value, column, ctx.step),
                ctx.step,
                ctx.line_ending,
            );
            let chunk = format!("- {}{}{}", encoded, ctx.line_ending, " ".repeat(column));
            Ok(SourceEdit::new(offset, 0, chunk))
        }
    }
}

/// Replace the element at `index` with a new value.
///
/// Trailing comments stay where they are: only the element's own content
/// bytes are replaced.
pub(crate) fn replace(ctx: &Ctx, list: &YamlNode, index: usize, value: &Value) -> Result<SourceEdit> {
    let items = list.sequence().unwrap_or(&[]);
    let element = &items[index];

    if element.is_null() && element.span.is_empty() {
        // Empty slot after a bare `-`: insert, with a separating space.
        let hyphen = hyphen_of(ctx.source, list, index);
        let encoded = encode::encode_flow(value);
        return Ok(SourceEdit::new(hyphen + 1, 0, format!(" {}", encoded)));
    }

    let start = element.span.start;
    let end = scan::content_end(ctx.source, element).max(start);
    let column = scan::column(ctx.source, start);

    let encoded = encode::encode_block(value, column, ctx.step, ctx.line_ending);
    let encoded = normalize::normalize_block(ctx.source, ctx.line_ending, end, value, encoded);
    Ok(SourceEdit::new(start, end - start, encoded))
}

/// Remove the element at `index`.
pub(crate) fn remove(ctx: &Ctx, list: &YamlNode, index: usize) -> Result<SourceEdit> {
    let items = list.sequence().unwrap_or(&[]);
    let element = &items[index];
    let only = items.len() == 1;

    let hyphen = hyphen_of(ctx.source, list, index);
    let content_end = scan::content_end(ctx.source, element).max(hyphen + 1);
    let (mut end, _comments, crossed) = scan::line_start_after_comments(ctx.source, content_end);

    if only {
        // Block collections cannot be empty; fall back to a flow `[]`.
        // When the element closed the document its line break goes with it;
        // mid-document the break stays to carry the line that follows.
        if crossed && end < ctx.source.len() {
            end = scan::rewind_line_break(ctx.source, end);
        }
        return Ok(SourceEdit::new(hyphen, end - hyphen, "[]"));
    }

    let line = scan::line_start(ctx.source, hyphen);
    if ctx.source[line..hyphen].bytes().all(|b| b == b' ') {
        // Whole-line removal: take the element's leading indent so it does
        // not leak onto the following line.
        return Ok(SourceEdit::new(line, end - line, ""));
    }

    // The element shares its line with an outer `- ` marker. Keep the
    // marker and pull the next element up into the vacated slot.
    let bytes = ctx.source.as_bytes();
    while end < bytes.len() && bytes[end] == b' ' {
        end += 1;
    }
    Ok(SourceEdit::new(hyphen, end - hyphen, ""))
}

/// The `- ` column a new element's nested lines should align to: directly
/// under the content for block collections, one step in for scalar bodies.
fn element_encode_indent(value: &Value, list_indent: usize, step: usize) -> usize {
    if value.is_collection()
        && value.collection_style().is_block_capable()
        && !value.is_empty_collection()
    {
        list_indent + 2
    } else {
        list_indent + step
    }
}

/// Offset of the `-` marker introducing element `index`.
fn hyphen_of(source: &str, list: &YamlNode, index: usize) -> usize {
    if index == 0 {
        return list.span.start;
    }
    let items = list.sequence().unwrap_or(&[]);
    let from = scan::content_end(source, &items[index - 1]);
    let (line, _, _) = scan::line_start_after_comments(source, from);
    source[line..]
        .find('-')
        .map(|p| line + p)
        .unwrap_or(items[index].span.start.saturating_sub(2))
}
