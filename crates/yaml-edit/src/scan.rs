//! Source scanners: locate safe splice boundaries around nodes.
//!
//! All functions here are pure reads over the current source text and the
//! span-tracked tree. They never allocate beyond the comment text they
//! collect.

use crate::{Error, Result};
use yaml_span::{CollectionStyle, NodeStyle, YamlNode};

/// Detect the dominant line ending of a document.
///
/// Reports `\r\n` only when Windows line endings strictly outnumber Unix
/// ones.
pub(crate) fn detect_line_ending(source: &str) -> &'static str {
    let bytes = source.as_bytes();
    let mut windows = 0usize;
    let mut unix = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\n' {
            if i > 0 && bytes[i - 1] == b'\r' {
                windows += 1;
            } else {
                unix += 1;
            }
        }
    }
    if windows > unix { "\r\n" } else { "\n" }
}

/// Offset of the first byte of the line containing `offset`.
pub(crate) fn line_start(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map(|n| n + 1).unwrap_or(0)
}

/// Column (in bytes) of `offset` within its line.
pub(crate) fn column(source: &str, offset: usize) -> usize {
    offset - line_start(source, offset)
}

/// Detect the document's indentation step by probing the first block-styled
/// child collection at depth 2; its indent relative to the root defines the
/// step. Defaults to 2.
pub(crate) fn indentation_step(source: &str, root: &YamlNode) -> usize {
    let root_col = column(source, root.span.start);

    let children: Vec<&YamlNode> = if let Some(items) = root.sequence() {
        items.iter().collect()
    } else if let Some(entries) = root.mapping() {
        entries.iter().map(|entry| &entry.value).collect()
    } else {
        return 2;
    };

    for child in children {
        let is_block_collection = matches!(
            child.style,
            NodeStyle::Collection(style) if style.is_block_capable()
        ) && !child.is_scalar()
            && !child.is_empty();
        if is_block_collection {
            let child_col = column(source, child.span.start);
            if child_col > root_col {
                return child_col - root_col;
            }
        }
    }
    2
}

/// Indentation of a block sequence: the column of its hyphens, derived from
/// the last element.
pub(crate) fn sequence_indent(source: &str, sequence: &YamlNode) -> Result<usize> {
    let items = sequence.sequence().unwrap_or(&[]);
    let last = items.last().ok_or(Error::EmptyBlockIndent)?;

    let hyphen = source[..last.span.start].rfind('-').unwrap_or(0);
    Ok(match source[..hyphen].rfind('\n') {
        Some(newline) => hyphen - newline - 1,
        None => hyphen,
    })
}

/// Indentation of a block mapping: the column of its keys, derived from the
/// last entry. A `?` complex-key marker on the key's line takes precedence.
pub(crate) fn mapping_indent(source: &str, mapping: &YamlNode) -> Result<usize> {
    let entries = mapping.mapping().unwrap_or(&[]);
    let last = entries.last().ok_or(Error::EmptyBlockIndent)?;

    let key_start = last.key.span.start;
    let base = line_start(source, key_start);
    match source[base..key_start].find('?') {
        Some(q) => Ok(q),
        None => Ok(key_start - base),
    }
}

/// The offset just past the last semantically meaningful byte of a node.
///
/// Parsed spans can over-reach (implicit nulls park on the next token;
/// block collection ends inherit their last child's quirks), so planners
/// use this instead of `span.end` wherever trailing emptiness matters.
pub(crate) fn content_end(source: &str, node: &YamlNode) -> usize {
    match node.style {
        NodeStyle::Collection(CollectionStyle::Flow) => node.span.end,
        NodeStyle::Collection(_) => {
            if let Some(items) = node.sequence() {
                match items.last() {
                    Some(last) => content_end(source, last),
                    None => node.span.end,
                }
            } else if let Some(entries) = node.mapping() {
                match entries.last() {
                    Some(entry) => {
                        if entry.value.is_null() && entry.value.span.is_empty() {
                            (entry.key.span.end + 1).min(source.len())
                        } else {
                            content_end(source, &entry.value)
                        }
                    }
                    None => node.span.end,
                }
            } else {
                node.span.end
            }
        }
        _ => node.span.end,
    }
}

/// Skip whitespace and comments forward from `start`, collecting any
/// comments seen.
///
/// Lazy mode (`greedy = false`) stops just past the first line break once
/// the current line is exhausted. Greedy mode keeps going across line
/// breaks until a non-whitespace, non-comment character or the end of
/// input; note that this consumes the next line's leading indent.
pub(crate) fn skip_comments(source: &str, start: usize, greedy: bool) -> (usize, Vec<String>) {
    let bytes = source.as_bytes();
    let mut comments = Vec::new();
    let mut i = start.min(bytes.len());

    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' => i += 1,
            b'#' => {
                let comment_start = i;
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                let mut comment_end = i;
                if comment_end > comment_start && bytes[comment_end - 1] == b'\r' {
                    comment_end -= 1;
                }
                comments.push(source[comment_start..comment_end].to_string());
            }
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                i += 2;
                if !greedy {
                    return (i, comments);
                }
            }
            b'\n' => {
                i += 1;
                if !greedy {
                    return (i, comments);
                }
            }
            _ => break,
        }
    }
    (i, comments)
}

/// All comments in `source[start..end]`, line by line. A `#` opens a
/// comment at line start or after whitespace; quoted `#`s on content lines
/// are not recognized (this is a text helper, not a parser).
pub(crate) fn comments_between(source: &str, start: usize, end: usize) -> Vec<String> {
    let mut comments = Vec::new();
    for line in source[start.min(end)..end.min(source.len())].lines() {
        let bytes = line.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'#' && (i == 0 || matches!(bytes[i - 1], b' ' | b'\t')) {
                comments.push(line[i..].to_string());
                break;
            }
        }
    }
    comments
}

/// Advance from `start` past the rest of the current line and any
/// comment-only lines that follow, landing on the start of the next
/// content line (or the end of input).
///
/// Returns `(offset, comments, crossed)` where `crossed` reports whether a
/// line break was crossed; when it is false the input ended without one.
/// This is the effective endpoint of a greedy comment scan with the
/// following line's indent reclaimed.
pub(crate) fn line_start_after_comments(
    source: &str,
    start: usize,
) -> (usize, Vec<String>, bool) {
    let bytes = source.as_bytes();
    let (mut offset, mut comments) = skip_comments(source, start, false);
    let crossed = offset > start && bytes.get(offset - 1) == Some(&b'\n');
    if !crossed {
        return (offset, comments, false);
    }

    loop {
        let mut j = offset;
        while j < bytes.len() && matches!(bytes[j], b' ' | b'\t') {
            j += 1;
        }
        if j >= bytes.len() || bytes[j] != b'#' {
            break;
        }
        let (next, mut more) = skip_comments(source, offset, false);
        comments.append(&mut more);
        if next == offset {
            break;
        }
        offset = next;
    }
    (offset, comments, true)
}

/// Step `offset` back over the line break that ends just before it.
/// No-op when the preceding bytes are not a line break.
pub(crate) fn rewind_line_break(source: &str, offset: usize) -> usize {
    let bytes = source.as_bytes();
    let mut offset = offset;
    if offset > 0 && bytes[offset - 1] == b'\n' {
        offset -= 1;
        if offset > 0 && bytes[offset - 1] == b'\r' {
            offset -= 1;
        }
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_span::parse;

    #[test]
    fn test_line_ending_detection() {
        assert_eq!(detect_line_ending("a: 1\nb: 2\n"), "\n");
        assert_eq!(detect_line_ending("a: 1\r\nb: 2\r\n"), "\r\n");
        assert_eq!(detect_line_ending("a: 1\r\nb: 2\nc: 3\n"), "\n");
        assert_eq!(detect_line_ending("no newline"), "\n");
    }

    #[test]
    fn test_indentation_step_probe() {
        let source = "a:\n    - 1\n    - 2\n";
        let root = parse(source).unwrap();
        assert_eq!(indentation_step(source, &root), 4);

        let source = "a: 1\nb: 2\n";
        let root = parse(source).unwrap();
        assert_eq!(indentation_step(source, &root), 2);
    }

    #[test]
    fn test_sequence_indent() {
        let source = "- a\n- b\n";
        let root = parse(source).unwrap();
        assert_eq!(sequence_indent(source, &root).unwrap(), 0);

        let source = "key:\n  - a\n  - b\n";
        let root = parse(source).unwrap();
        let list = root
            .entry(&yaml_rust2::Yaml::String("key".into()))
            .unwrap();
        assert_eq!(sequence_indent(source, list).unwrap(), 2);
    }

    #[test]
    fn test_nested_sequence_indent() {
        let source = "- - x\n  - y\n";
        let root = parse(source).unwrap();
        let inner = root.item(0).unwrap();
        assert_eq!(sequence_indent(source, inner).unwrap(), 2);
    }

    #[test]
    fn test_mapping_indent() {
        let source = "outer:\n  a: 1\n  b: 2\n";
        let root = parse(source).unwrap();
        let inner = root
            .entry(&yaml_rust2::Yaml::String("outer".into()))
            .unwrap();
        assert_eq!(mapping_indent(source, inner).unwrap(), 2);
        assert_eq!(mapping_indent(source, &root).unwrap(), 0);
    }

    #[test]
    fn test_content_end_skips_null_tail() {
        let source = "a: 1\nb:\n";
        let root = parse(source).unwrap();
        // Last entry's value is an implicit null; content ends past the ':'.
        assert_eq!(content_end(source, &root), 7);
    }

    #[test]
    fn test_skip_comments_lazy() {
        let source = "value  # inline\nnext: 1\n";
        let (offset, comments) = skip_comments(source, 5, false);
        assert_eq!(offset, 16);
        assert_eq!(comments, vec!["# inline"]);
    }

    #[test]
    fn test_skip_comments_greedy() {
        let source = "value\n# one\n# two\n  next\n";
        let (offset, comments) = skip_comments(source, 5, true);
        // Greedy runs through both comment lines and the next line's indent.
        assert_eq!(offset, 20);
        assert_eq!(comments, vec!["# one", "# two"]);
    }

    #[test]
    fn test_line_start_after_comments() {
        let source = "value\n# one\n# two\n  next\n";
        let (offset, comments, crossed) = line_start_after_comments(source, 5);
        assert_eq!(offset, 18);
        assert!(crossed);
        assert_eq!(comments.len(), 2);

        let (offset, _, crossed) = line_start_after_comments("no break", 8);
        assert_eq!(offset, 8);
        assert!(!crossed);
    }

    #[test]
    fn test_comments_between() {
        let source = "a: 1 # x\n# y\nb: 2\n";
        assert_eq!(comments_between(source, 0, source.len()), vec!["# x", "# y"]);
    }
}
