//! # yaml-edit
//!
//! A comment-preserving YAML document editor.
//!
//! Supply a YAML document as text, issue structural edits against paths
//! (update a value, append/insert/remove sequence elements, add/remove
//! mapping entries, replace a subtree), and read back the minimally
//! modified source. Unlike a parse → mutate → re-serialize pipeline,
//! everything outside the edited region survives byte for byte: comments,
//! whitespace, indentation, line endings, quoting choices, and flow versus
//! block style.
//!
//! ## Example
//!
//! ```rust
//! use yaml_edit::YamlEditor;
//!
//! let mut editor = YamlEditor::new("# header\nkey: value  # inline\n").unwrap();
//! editor.update(["key"], "other").unwrap();
//! assert_eq!(editor.source(), "# header\nkey: other  # inline\n");
//! ```
//!
//! ## How it works
//!
//! The document is parsed once (via [`yaml_span`]) into a tree whose nodes
//! carry byte spans and style tags. Each mutation plans a single text
//! splice against the current source, applies it, re-parses, and commits
//! source + tree + edit log atomically; if the spliced text fails to
//! re-parse the mutation is rejected and the prior state kept. The applied
//! splices are available through [`YamlEditor::edits`] for hosts that want
//! to replay them elsewhere.
//!
//! Anchors and aliases are not resolved: edits that would traverse an
//! alias are refused. Tags are ignored. The editor is single-threaded and
//! synchronous; wrap it in your own lock if you share it.

mod edit;
mod editor;
mod encode;
mod error;
mod normalize;
mod path;
mod planner;
mod scan;
mod value;

pub use edit::{apply_all, SourceEdit};
pub use editor::YamlEditor;
pub use error::{Error, PathErrorKind, Result};
pub use path::{Path, Segment};
pub use value::{Styled, Value};

pub use yaml_span::{CollectionStyle, NodeStyle, ScalarStyle, Span, YamlNode};
