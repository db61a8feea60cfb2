//! Raw-source scans that recover the exact byte extent of scalars.
//!
//! The underlying parser reports where a scalar *starts* but not where its
//! source text ends: quotes, escapes, block-scalar headers and multi-line
//! plain continuation all make the raw extent differ from the decoded value
//! length. These scans re-read the source around the start marker, per
//! style, to find the true end.

use crate::ScalarStyle;

/// Compute the end offset (exclusive) of the scalar starting at `start`.
///
/// `bound` is the byte offset of the next parser event and acts as a hard
/// ceiling for plain scalars; quoted and block scalars are self-delimiting.
pub(crate) fn scalar_end(
    source: &str,
    start: usize,
    style: ScalarStyle,
    in_flow: bool,
    bound: usize,
) -> usize {
    if start >= source.len() {
        return source.len();
    }
    match style {
        ScalarStyle::SingleQuoted => single_quoted_end(source, start),
        ScalarStyle::DoubleQuoted => double_quoted_end(source, start),
        ScalarStyle::Literal | ScalarStyle::Folded => block_scalar_end(source, start),
        ScalarStyle::Plain | ScalarStyle::Any => plain_end(source, start, in_flow, bound),
    }
}

/// End of a `'...'` scalar: the quote after the last content byte, with
/// `''` treated as an escaped quote.
fn single_quoted_end(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
            } else {
                return i + 1;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// End of a `"..."` scalar, honoring backslash escapes.
fn double_quoted_end(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// End of a `|` or `>` block scalar: the last content byte of the last
/// line belonging to the scalar. Trailing blank lines are not included;
/// they are indistinguishable from inter-node whitespace at the byte level
/// and splice logic treats them as such.
fn block_scalar_end(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let len = bytes.len();

    // Header: the indicator plus any chomping/indentation indicators.
    let mut i = start;
    while i < len && matches!(bytes[i], b'|' | b'>' | b'+' | b'-' | b'0'..=b'9') {
        i += 1;
    }
    let mut end = i;

    // Advance to the end of the header line (a comment may follow the
    // indicators; it is not part of the node).
    while i < len && bytes[i] != b'\n' {
        i += 1;
    }

    // Content lines: blank, or indented at least as far as the first
    // non-blank line. The first non-blank line fixes the content indent.
    let mut content_indent: Option<usize> = None;
    while i < len && bytes[i] == b'\n' {
        let line_start = i + 1;
        let mut j = line_start;
        while j < len && bytes[j] == b' ' {
            j += 1;
        }
        let indent = j - line_start;

        if j >= len {
            break;
        }
        if bytes[j] == b'\n' || (bytes[j] == b'\r' && bytes.get(j + 1) == Some(&b'\n')) {
            // Blank line: may separate content, does not extend the span.
            i = if bytes[j] == b'\r' { j + 1 } else { j };
            continue;
        }

        match content_indent {
            None if indent == 0 => break,
            None => content_indent = Some(indent),
            Some(required) if indent < required => break,
            Some(_) => {}
        }

        // Consume the content line; the span ends before its line break.
        while j < len && bytes[j] != b'\n' {
            j += 1;
        }
        let mut line_end = j;
        if line_end > line_start && bytes[line_end - 1] == b'\r' {
            line_end -= 1;
        }
        end = line_end;
        i = j;
    }

    end
}

/// End of a plain scalar, bounded by the next parser event.
///
/// Within `[start, bound)` the source holds the scalar followed only by
/// structural text: separators, comments, and the next token's lead-in.
/// Cut at the first flow terminator (flow context only), at the first
/// `: ` separator, and at the first `#` preceded by whitespace; then trim.
fn plain_end(source: &str, start: usize, in_flow: bool, bound: usize) -> usize {
    let bound = bound.clamp(start, source.len());
    let window = &source.as_bytes()[start..bound];
    let mut cut = window.len();

    if in_flow {
        for (idx, &b) in window.iter().enumerate() {
            if matches!(b, b',' | b']' | b'}') {
                cut = idx;
                break;
            }
        }
    }

    for idx in 0..cut {
        if window[idx] == b':'
            && idx + 1 < cut
            && matches!(window[idx + 1], b' ' | b'\t' | b'\n' | b'\r')
        {
            cut = idx;
            break;
        }
    }

    for idx in 0..cut {
        if window[idx] == b'#'
            && (idx == 0 || matches!(window[idx - 1], b' ' | b'\t' | b'\n' | b'\r'))
        {
            cut = idx;
            break;
        }
    }

    // A later line whose first non-space byte is a `- ` entry marker
    // belongs to the next sequence element: the marker emits no event of
    // its own, so the bound does not exclude it.
    let mut idx = 0;
    while idx < cut {
        if window[idx] == b'\n' {
            let mut j = idx + 1;
            while j < cut && window[j] == b' ' {
                j += 1;
            }
            if j < cut
                && window[j] == b'-'
                && (j + 1 >= cut || matches!(window[j + 1], b' ' | b'\t' | b'\r' | b'\n'))
            {
                cut = idx;
                break;
            }
        }
        idx += 1;
    }

    while cut > 0 && matches!(window[cut - 1], b' ' | b'\t' | b'\n' | b'\r') {
        cut -= 1;
    }
    // A trailing colon means this scalar is a key and the separator slipped
    // into the window.
    if cut > 0 && window[cut - 1] == b':' {
        cut -= 1;
        while cut > 0 && matches!(window[cut - 1], b' ' | b'\t' | b'\n' | b'\r') {
            cut -= 1;
        }
    }

    start + cut
}

/// End of a `*anchor` alias token.
pub(crate) fn alias_end(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let mut i = start;
    if i < bytes.len() && bytes[i] == b'*' {
        i += 1;
    }
    while i < bytes.len()
        && !matches!(
            bytes[i],
            b' ' | b'\t' | b'\n' | b'\r' | b',' | b'[' | b']' | b'{' | b'}'
        )
    {
        i += 1;
    }
    i
}

/// Find the closing bracket of a flow collection, scanning from `from` past
/// whitespace, separators and comments. Returns the offset just past it.
pub(crate) fn seek_flow_close(source: &str, from: usize, close: u8) -> usize {
    let bytes = source.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b if b == close => return i + 1,
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quoted() {
        assert_eq!(single_quoted_end("'abc' rest", 0), 5);
        assert_eq!(single_quoted_end("'it''s' rest", 0), 7);
    }

    #[test]
    fn test_double_quoted() {
        assert_eq!(double_quoted_end("\"abc\" rest", 0), 5);
        assert_eq!(double_quoted_end("\"a\\\"b\" rest", 0), 6);
    }

    #[test]
    fn test_plain_simple() {
        let src = "key: value\nnext: 1";
        // "value" runs from 5; the next event starts at "next" (11).
        assert_eq!(plain_end(src, 5, false, 11), 10);
    }

    #[test]
    fn test_plain_trailing_comment() {
        let src = "key: value  # inline\nnext: 1";
        assert_eq!(plain_end(src, 5, false, 21), 10);
    }

    #[test]
    fn test_plain_key_window() {
        let src = "key: value";
        // The key's window extends to the value's start marker.
        assert_eq!(plain_end(src, 0, false, 5), 3);
    }

    #[test]
    fn test_plain_flow_terminators() {
        let src = "[a, b]";
        assert_eq!(plain_end(src, 1, true, 4), 2);
        assert_eq!(plain_end(src, 4, true, 6), 5);
    }

    #[test]
    fn test_plain_multiline() {
        let src = "key: foo\n  bar\nnext: 1";
        assert_eq!(plain_end(src, 5, false, 15), 14);
    }

    #[test]
    fn test_plain_stops_before_next_entry_marker() {
        // The `-` of the next element emits no event; the window includes it.
        let src = "- a\n- b\n";
        assert_eq!(plain_end(src, 2, false, 6), 3);

        let src = "- a\r\n- b\r\n";
        assert_eq!(plain_end(src, 2, false, 7), 3);
    }

    #[test]
    fn test_plain_empty_window() {
        let src = "key:\nnext: 1";
        // Implicit null: marker parked on the next token, zero extent.
        assert_eq!(plain_end(src, 5, false, 5), 5);
    }

    #[test]
    fn test_block_scalar() {
        let src = "key: |-\n  line one\n  line two\nnext: 1";
        // Starts at the '|' (5); ends after "line two".
        assert_eq!(block_scalar_end(src, 5), 29);
    }

    #[test]
    fn test_block_scalar_blank_interior() {
        let src = "key: |\n  a\n\n  b\nnext: 1";
        assert_eq!(block_scalar_end(src, 5), 15);
    }

    #[test]
    fn test_block_scalar_header_only() {
        let src = "key: |-\nnext: 1";
        assert_eq!(block_scalar_end(src, 5), 7);
    }

    #[test]
    fn test_block_scalar_comment_content() {
        // A '#' at content indent is content, not a comment.
        let src = "key: |\n  text\n  # still text\nnext: 1";
        assert_eq!(block_scalar_end(src, 5), 28);
    }

    #[test]
    fn test_seek_flow_close() {
        assert_eq!(seek_flow_close("[a, b]", 5, b']'), 6);
        assert_eq!(seek_flow_close("[a, b ]", 5, b']'), 7);
        assert_eq!(seek_flow_close("{a: 1}", 5, b'}'), 6);
    }

    #[test]
    fn test_alias_end() {
        assert_eq!(alias_end("*anchor rest", 0), 7);
        assert_eq!(alias_end("[*a, b]", 1), 3);
    }
}
