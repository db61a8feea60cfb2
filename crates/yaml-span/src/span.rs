//! Byte spans into the parsed source.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into the original source text.
///
/// Spans always measure bytes, never characters: they are meant to be used
/// as `&source[span.start..span.end]` and as splice targets when rewriting
/// the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first byte of the node (0-based).
    pub start: usize,

    /// Byte offset just past the last byte of the node.
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end offsets.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Create an empty span at the given offset.
    ///
    /// Implicit nulls occupy no source bytes; they are represented by an
    /// empty span at the position the parser reported.
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
