//! # yaml-span
//!
//! YAML parsing with byte-accurate source spans and preserved styles.
//!
//! This crate wraps `yaml-rust2` and produces a [`YamlNode`] tree in which
//! every node carries an owned `yaml_rust2::Yaml` value, the byte range it
//! occupies in the original source, and the style it was written in (plain,
//! quoted, literal or folded for scalars; block or flow for collections).
//! It exists so that source-rewriting tools can splice replacement text into
//! the exact bytes a node came from without disturbing anything around it.
//!
//! ## Design
//!
//! Uses the **owned data approach**: each node stores an owned `Yaml` value
//! with a parallel children structure for span and style tracking. Trade-off
//! is memory overhead for a lifetime-free API that survives the source text
//! being edited out from under it.
//!
//! ## Example
//!
//! ```rust
//! let node = yaml_span::parse("title: My Document").unwrap();
//! let title = node.entry(&yaml_rust2::Yaml::String("title".into())).unwrap();
//! assert_eq!(title.span.start, 7);
//! assert_eq!(title.span.end, 18);
//! ```

mod error;
mod node;
mod parser;
mod scalar_scan;
mod span;
mod style;

pub use error::{Error, Result};
pub use node::{MapEntry, YamlNode};
pub use parser::parse;
pub use span::Span;
pub use style::{CollectionStyle, NodeStyle, ScalarStyle};

pub use yaml_rust2::Yaml;
