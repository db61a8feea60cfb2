//! Trailing-break normalization for block-encoded replacements.
//!
//! A block chunk spliced mid-document must not duplicate the line break
//! already present at the splice boundary, but chunks whose terminal scalar
//! carries semantic line breaks (literal/folded styles, or a plain value
//! that really ends in a newline) must pass through untouched.

use crate::Value;
use yaml_span::ScalarStyle;

/// Normalize an encoded block chunk against its splice context.
///
/// `splice_end` is the end offset of the region being replaced in `source`.
pub(crate) fn normalize_block(
    source: &str,
    line_ending: &str,
    splice_end: usize,
    value: &Value,
    encoded: String,
) -> String {
    let terminal = match terminal_scalar(value) {
        Some(terminal) => terminal,
        // Empty collection at the tail: nothing to normalize.
        None => return encoded,
    };

    match terminal.scalar_style() {
        // Line breaks under these styles are content.
        ScalarStyle::Literal | ScalarStyle::Folded => return encoded,
        ScalarStyle::Plain | ScalarStyle::Any => {
            if let Value::String(s) = terminal.plain() {
                if s.ends_with('\n') {
                    return encoded;
                }
            }
        }
        _ => {}
    }

    let splice_end = splice_end.min(source.len());
    if splice_end > 0 && source.as_bytes()[splice_end - 1] == b'\n' {
        // The boundary already supplies a break; one trailing break in the
        // chunk would double it.
        if let Some(stripped) = encoded.strip_suffix(line_ending) {
            return stripped.to_string();
        }
        if let Some(stripped) = encoded.strip_suffix('\n') {
            return stripped.to_string();
        }
        encoded
    } else {
        encoded.trim_end().to_string()
    }
}

/// The rightmost-deepest scalar reachable by last-child edges, or `None`
/// when the descent dead-ends in an empty collection.
fn terminal_scalar(value: &Value) -> Option<&Value> {
    match value.plain() {
        Value::Sequence(items) => items.last().and_then(terminal_scalar),
        Value::Mapping(entries) => entries.last().and_then(|(_, v)| terminal_scalar(v)),
        _ => Some(value),
    }
}
