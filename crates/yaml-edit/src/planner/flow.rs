//! Splice planning for flow collections.
//!
//! Flow splices are bracket-relative: everything keys off the positions of
//! `[`/`{`, the separating commas, and the closing bracket (which node
//! spans include).

use super::{map_insertion_index, Ctx};
use crate::{encode, scan, Result, SourceEdit, Value};
use yaml_span::YamlNode;

/// Append to a flow sequence: splice just before the `]`.
pub(crate) fn seq_append(_ctx: &Ctx, list: &YamlNode, value: &Value) -> Result<SourceEdit> {
    let close = list.span.end.saturating_sub(1);
    let encoded = encode::encode_flow(value);
    let text = if list.is_empty() {
        encoded
    } else {
        format!(", {}", encoded)
    };
    Ok(SourceEdit::new(close, 0, text))
}

/// Insert into a flow sequence before the element at `index`.
pub(crate) fn seq_insert(
    ctx: &Ctx,
    list: &YamlNode,
    index: usize,
    value: &Value,
) -> Result<SourceEdit> {
    let items = list.sequence().unwrap_or(&[]);
    if index >= items.len() {
        return seq_append(ctx, list, value);
    }

    let encoded = encode::encode_flow(value);
    let before = &ctx.source[..items[index].span.start];
    let comma = before.rfind(',');
    let bracket = before.rfind('[').unwrap_or(list.span.start);

    match comma {
        Some(comma) if comma > bracket => Ok(SourceEdit::new(
            comma + 1,
            0,
            format!(" {},", encoded),
        )),
        _ => Ok(SourceEdit::new(bracket + 1, 0, format!("{}, ", encoded))),
    }
}

/// Replace the element at `index` in a flow sequence.
pub(crate) fn seq_replace(
    ctx: &Ctx,
    list: &YamlNode,
    index: usize,
    value: &Value,
) -> Result<SourceEdit> {
    let items = list.sequence().unwrap_or(&[]);
    let element = &items[index];
    let start = element.span.start;
    let end = scan::content_end(ctx.source, element).max(start);
    Ok(SourceEdit::new(start, end - start, encode::encode_flow(value)))
}

/// Remove the element at `index` from a flow sequence.
pub(crate) fn seq_remove(ctx: &Ctx, list: &YamlNode, index: usize) -> Result<SourceEdit> {
    let items = list.sequence().unwrap_or(&[]);

    if index == 0 {
        let start = list.span.start + 1;
        let end = if items.len() == 1 {
            list.span.end.saturating_sub(1)
        } else {
            items[1].span.start
        };
        return Ok(SourceEdit::new(start, end.max(start) - start, ""));
    }

    let element = &items[index];
    let before = &ctx.source[..element.span.start];
    let start = before.rfind(',').unwrap_or(list.span.start + 1);
    let end = scan::content_end(ctx.source, element).max(start);
    Ok(SourceEdit::new(start, end - start, ""))
}

/// Add an entry to a flow mapping.
pub(crate) fn map_add(ctx: &Ctx, map: &YamlNode, key: &Value, value: &Value) -> Result<SourceEdit> {
    let entries = map.mapping().unwrap_or(&[]);
    let body = format!(
        "{}: {}",
        encode::encode_flow(key),
        encode::encode_flow(value)
    );

    if entries.is_empty() {
        let close = map.span.end.saturating_sub(1);
        return Ok(SourceEdit::new(close, 0, body));
    }

    let insertion_index = map_insertion_index(entries, &key.to_yaml());
    if insertion_index == entries.len() {
        let close = map.span.end.saturating_sub(1);
        return Ok(SourceEdit::new(close, 0, format!(", {}", body)));
    }

    let key_start = entries[insertion_index].key.span.start;
    let before = &ctx.source[..key_start];
    let comma = before.rfind(',');
    let brace = before.rfind('{').unwrap_or(map.span.start);

    match comma {
        Some(comma) if comma > brace => {
            Ok(SourceEdit::new(comma + 1, 0, format!(" {},", body)))
        }
        _ => Ok(SourceEdit::new(brace + 1, 0, format!("{}, ", body))),
    }
}

/// Replace the value of the entry at `entry_index` in a flow mapping.
pub(crate) fn map_replace_value(
    ctx: &Ctx,
    map: &YamlNode,
    entry_index: usize,
    value: &Value,
) -> Result<SourceEdit> {
    let entries = map.mapping().unwrap_or(&[]);
    let entry = &entries[entry_index];
    let encoded = encode::encode_flow(value);

    if entry.value.is_null() && entry.value.span.is_empty() {
        let at = (entry.key.span.end + 1).min(ctx.source.len());
        return Ok(SourceEdit::new(at, 0, format!(" {}", encoded)));
    }

    let start = entry.value.span.start;
    let end = scan::content_end(ctx.source, &entry.value).max(start);
    Ok(SourceEdit::new(start, end - start, encoded))
}

/// Remove the entry at `entry_index` from a flow mapping.
pub(crate) fn map_remove(ctx: &Ctx, map: &YamlNode, entry_index: usize) -> Result<SourceEdit> {
    let entries = map.mapping().unwrap_or(&[]);
    let entry = &entries[entry_index];

    if entry_index == 0 {
        let start = map.span.start + 1;
        let end = if entries.len() == 1 {
            map.span.end.saturating_sub(1)
        } else {
            entries[1].key.span.start
        };
        return Ok(SourceEdit::new(start, end.max(start) - start, ""));
    }

    let before = &ctx.source[..entry.key.span.start];
    let start = before.rfind(',').unwrap_or(map.span.start + 1);
    let end = if entry.value.is_null() && entry.value.span.is_empty() {
        (entry.key.span.end + 1).min(ctx.source.len())
    } else {
        scan::content_end(ctx.source, &entry.value).max(start)
    };
    Ok(SourceEdit::new(start, end - start, ""))
}
