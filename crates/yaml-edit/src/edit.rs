//! Text edits: replace a byte range with new text.

use serde::{Deserialize, Serialize};

/// A single text splice: replace `length` bytes at `offset` with
/// `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEdit {
    /// Byte offset in the pre-edit source.
    pub offset: usize,
    /// Number of bytes to replace.
    pub length: usize,
    /// Replacement text.
    pub replacement: String,
}

impl SourceEdit {
    /// Create a new edit.
    pub fn new(offset: usize, length: usize, replacement: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            replacement: replacement.into(),
        }
    }

    /// Apply this edit to `source`, returning the new text.
    pub fn apply(&self, source: &str) -> String {
        let mut result = String::with_capacity(
            source.len() - self.length + self.replacement.len(),
        );
        result.push_str(&source[..self.offset]);
        result.push_str(&self.replacement);
        result.push_str(&source[self.offset + self.length..]);
        result
    }
}

/// Apply a batch of edits addressed against the same pre-edit source.
///
/// Edits are applied in descending offset order so that earlier offsets
/// stay valid while later ones are spliced.
pub fn apply_all(source: &str, edits: &[SourceEdit]) -> String {
    let mut ordered: Vec<&SourceEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));

    let mut result = source.to_string();
    for edit in ordered {
        result = edit.apply(&result);
    }
    result
}
