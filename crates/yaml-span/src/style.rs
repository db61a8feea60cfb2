//! Style tags preserved from the source.

use yaml_rust2::scanner::TScalarStyle;

/// How a scalar was written in the source, or how a caller would like one
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    /// No particular style requested; an emitter may choose.
    #[default]
    Any,
    /// Unquoted: `foo`
    Plain,
    /// `'foo'`
    SingleQuoted,
    /// `"foo"`
    DoubleQuoted,
    /// `|` block scalar
    Literal,
    /// `>` block scalar
    Folded,
}

/// How a collection was written in the source, or how a caller would like
/// one written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionStyle {
    /// No particular style requested; treated as block-capable.
    #[default]
    Any,
    /// Indentation-based syntax: `- item` / `key: value`
    Block,
    /// Inline syntax: `[a, b]` / `{k: v}`
    Flow,
}

impl CollectionStyle {
    /// Whether this style permits block emission. Only an explicit `Flow`
    /// pin rules it out.
    pub fn is_block_capable(&self) -> bool {
        !matches!(self, CollectionStyle::Flow)
    }
}

/// The style tag carried by every node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStyle {
    Scalar(ScalarStyle),
    Collection(CollectionStyle),
    /// An unresolved `*anchor` reference.
    Alias,
}

impl From<TScalarStyle> for ScalarStyle {
    fn from(style: TScalarStyle) -> Self {
        match style {
            TScalarStyle::Plain => ScalarStyle::Plain,
            TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
            TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
            TScalarStyle::Literal => ScalarStyle::Literal,
            TScalarStyle::Folded => ScalarStyle::Folded,
        }
    }
}
