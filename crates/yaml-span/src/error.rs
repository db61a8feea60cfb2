//! Error types for span-tracked YAML parsing.

use thiserror::Error;

/// Result type alias for yaml-span operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a span-tracked YAML tree.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// YAML syntax error reported by the underlying parser.
    #[error("parse error: {0}")]
    Parse(#[from] yaml_rust2::ScanError),

    /// The input contained no YAML document at all.
    #[error("no YAML document found")]
    EmptyStream,

    /// The event stream ended while a collection was still open.
    ///
    /// This indicates a bug in the underlying parser rather than bad input;
    /// malformed input surfaces as [`Error::Parse`].
    #[error("unbalanced event stream from parser")]
    UnbalancedEvents,
}
