//! Error types for document editing.

use crate::Path;
use thiserror::Error;

/// Result type alias for yaml-edit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing a document.
///
/// Every error leaves the editor at its prior valid state; only the failing
/// call is affected.
#[derive(Debug, Error)]
pub enum Error {
    /// A path did not resolve against the current tree.
    #[error("cannot resolve {path}: {kind}")]
    Path { path: Path, kind: PathErrorKind },

    /// Traversal would cross a `*alias` reference.
    #[error("{path} traverses an alias node")]
    Alias { path: Path },

    /// A scalar was required (for example as a mapping key) but a
    /// collection was supplied.
    #[error("expected a scalar value, got a collection")]
    InvalidScalar,

    /// The document failed to parse when the editor was constructed.
    #[error("invalid document: {0}")]
    Parse(yaml_span::Error),

    /// An applied edit produced text that no longer parses. The mutation
    /// was rolled back.
    #[error("edit produced unparsable output: {0}")]
    PostEditParse(yaml_span::Error),

    /// Indentation was requested for an empty block collection, which has
    /// no source form. Internal; reaching this is a bug.
    #[error("empty block collections have no indentation")]
    EmptyBlockIndent,
}

/// Structured reasons a path can fail to resolve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathErrorKind {
    /// The mapping has no such key.
    #[error("key {0:?} not found")]
    KeyNotFound(String),

    /// The index is past the end of the sequence.
    #[error("index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A key segment was used against a sequence.
    #[error("sequences are indexed by integer, got a key")]
    KeyIntoSequence,

    /// A segment tried to descend into a scalar.
    #[error("cannot descend into a scalar")]
    IntoScalar,

    /// The operation needs a sequence at this path.
    #[error("expected a sequence")]
    NotASequence,

    /// The operation cannot target the document root.
    #[error("the root cannot be addressed by this operation")]
    EmptyPath,
}
