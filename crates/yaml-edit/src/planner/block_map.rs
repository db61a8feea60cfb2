//! Splice planning for block mappings.

use super::{map_insertion_index, Ctx};
use crate::{encode, normalize, scan, Result, SourceEdit, Value};
use yaml_span::YamlNode;

/// Add a new key/value entry.
pub(crate) fn add(ctx: &Ctx, map: &YamlNode, key: &Value, value: &Value) -> Result<SourceEdit> {
    let entries = map.mapping().unwrap_or(&[]);

    if entries.is_empty() {
        // Only reachable for style-unpinned empty mappings; block mappings
        // cannot be empty in source.
        let body = entry_text(ctx, key, value, 0);
        return Ok(SourceEdit::new(map.span.end, 0, body));
    }

    let indent = scan::mapping_indent(ctx.source, map)?;
    let body = entry_text(ctx, key, value, indent);
    let insertion_index = map_insertion_index(entries, &key.to_yaml());

    if insertion_index == entries.len() {
        // At the end: just past the line break that follows the last
        // entry's content; without one, open a new line at the end.
        let content_end = scan::content_end(ctx.source, map);
        match ctx.source[content_end.min(ctx.source.len())..].find('\n') {
            Some(p) => {
                let offset = content_end + p + 1;
                Ok(SourceEdit::new(
                    offset,
                    0,
                    format!("{}{}", body, ctx.line_ending),
                ))
            }
            None => Ok(SourceEdit::new(
                ctx.source.len(),
                0,
                format!("{}{}", ctx.line_ending, body),
            )),
        }
    } else {
        let key_start = entries[insertion_index].key.span.start;
        let line = scan::line_start(ctx.source, key_start);
        if ctx.source[line..key_start].bytes().all(|b| b == b' ') {
            return Ok(SourceEdit::new(
                line,
                0,
                format!("{}{}", body, ctx.line_ending),
            ));
        }

        // The displaced key shares its line with an outer `- ` marker:
        // splice at the key itself and push it onto its own line.
        let column = key_start - line;
        let chunk = format!(
            "{}{}{}",
            &entry_text(ctx, key, value, column)[column..],
            ctx.line_ending,
            " ".repeat(column),
        );
        Ok(SourceEdit::new(key_start, 0, chunk))
    }
}

/// Replace the value of the entry at `entry_index`.
///
/// The key, its `:`, and any trailing comment are preserved; only the
/// value's content bytes are replaced.
pub(crate) fn replace_value(
    ctx: &Ctx,
    map: &YamlNode,
    entry_index: usize,
    value: &Value,
) -> Result<SourceEdit> {
    let entries = map.mapping().unwrap_or(&[]);
    let entry = &entries[entry_index];

    // Just past the ':' separator.
    let start = (entry.key.span.end + 1).min(ctx.source.len());
    let end = if entry.value.is_null() && entry.value.span.is_empty() {
        start
    } else {
        scan::content_end(ctx.source, &entry.value).max(start)
    };

    let indent = scan::mapping_indent(ctx.source, map)?;
    let child_indent = indent + ctx.step;
    let encoded = encode::encode_block(value, child_indent, ctx.step, ctx.line_ending);

    let replacement = if is_block_rendered_collection(value) {
        format!(
            "{}{}{}",
            ctx.line_ending,
            " ".repeat(child_indent),
            encoded
        )
    } else {
        format!(" {}", encoded)
    };
    let replacement = normalize::normalize_block(ctx.source, ctx.line_ending, end, value, replacement);
    Ok(SourceEdit::new(start, end - start, replacement))
}

/// Remove the entry at `entry_index`, with any comments attached to it.
pub(crate) fn remove(ctx: &Ctx, map: &YamlNode, entry_index: usize) -> Result<SourceEdit> {
    let entries = map.mapping().unwrap_or(&[]);
    let entry = &entries[entry_index];
    let only = entries.len() == 1;

    let key_start = entry.key.span.start;
    let scan_from = if entry.value.is_null() && entry.value.span.is_empty() {
        // Past the ':'; the null itself has no bytes.
        (entry.key.span.end + 1).min(ctx.source.len())
    } else {
        scan::content_end(ctx.source, &entry.value)
    };
    let (mut end, _comments, crossed) = scan::line_start_after_comments(ctx.source, scan_from);

    if only {
        // Block mappings cannot be empty; fall back to a flow `{}`.
        if crossed && end < ctx.source.len() {
            end = scan::rewind_line_break(ctx.source, end);
        }
        return Ok(SourceEdit::new(key_start, end - key_start, "{}"));
    }

    let line = scan::line_start(ctx.source, key_start);
    if ctx.source[line..key_start].bytes().all(|b| b == b' ') {
        return Ok(SourceEdit::new(line, end - line, ""));
    }

    // The entry shares its line with an outer `- ` marker. Keep the marker
    // and pull the next entry up into the vacated slot.
    let bytes = ctx.source.as_bytes();
    while end < bytes.len() && bytes[end] == b' ' {
        end += 1;
    }
    Ok(SourceEdit::new(key_start, end - key_start, ""))
}

/// `<indent><key>:<sep><value>` for a fresh entry. Keys are always emitted
/// in flow style.
fn entry_text(ctx: &Ctx, key: &Value, value: &Value, indent: usize) -> String {
    let key_text = encode::encode_flow(key);
    if is_block_rendered_collection(value) {
        let child_indent = indent + ctx.step;
        format!(
            "{}{}:{}{}{}",
            " ".repeat(indent),
            key_text,
            ctx.line_ending,
            " ".repeat(child_indent),
            encode::encode_block(value, child_indent, ctx.step, ctx.line_ending),
        )
    } else {
        format!(
            "{}{}: {}",
            " ".repeat(indent),
            key_text,
            encode::encode_block(value, indent + ctx.step, ctx.step, ctx.line_ending),
        )
    }
}

fn is_block_rendered_collection(value: &Value) -> bool {
    value.is_collection()
        && value.collection_style().is_block_capable()
        && !value.is_empty_collection()
}
