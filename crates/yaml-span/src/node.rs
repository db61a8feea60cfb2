//! YAML value with span and style tracking.

use crate::{CollectionStyle, NodeStyle, ScalarStyle, Span};
use yaml_rust2::Yaml;

/// A YAML value with source span and style information.
///
/// Wraps an owned `yaml_rust2::Yaml` value with the byte range it occupies
/// in the original source and the style it was written in. Children mirror
/// the structure of `yaml` in a parallel span-tracked form.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    /// The complete `yaml-rust2` value (owned).
    ///
    /// This provides direct access to the logical value for code that does
    /// not need span tracking; it is a complete, independent `Yaml` tree.
    pub yaml: Yaml,

    /// Byte range this node occupies in the parsed source.
    ///
    /// Scalar spans include any surrounding quotes and block-scalar headers.
    /// Flow collection spans include the closing bracket; block collection
    /// spans run from the first marker or key to the end of the last child.
    pub span: Span,

    /// The style this node was written in.
    pub style: NodeStyle,

    /// Span-tracked children (parallel structure).
    children: Children,
}

/// Span-tracked children of a YAML node.
#[derive(Debug, Clone, PartialEq)]
enum Children {
    /// No children (scalars, nulls, aliases)
    None,

    /// Sequence items with span tracking
    Sequence(Vec<YamlNode>),

    /// Mapping entries with span tracking
    Mapping(Vec<MapEntry>),
}

/// A key-value pair in a YAML mapping with span tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    /// The key with span tracking.
    pub key: YamlNode,

    /// The value with span tracking.
    pub value: YamlNode,
}

impl YamlNode {
    /// Create a new node for a scalar.
    pub fn scalar(yaml: Yaml, span: Span, style: ScalarStyle) -> Self {
        Self {
            yaml,
            span,
            style: NodeStyle::Scalar(style),
            children: Children::None,
        }
    }

    /// Create a new node for a sequence.
    pub fn new_sequence(yaml: Yaml, span: Span, style: CollectionStyle, items: Vec<YamlNode>) -> Self {
        Self {
            yaml,
            span,
            style: NodeStyle::Collection(style),
            children: Children::Sequence(items),
        }
    }

    /// Create a new node for a mapping.
    pub fn new_mapping(yaml: Yaml, span: Span, style: CollectionStyle, entries: Vec<MapEntry>) -> Self {
        Self {
            yaml,
            span,
            style: NodeStyle::Collection(style),
            children: Children::Mapping(entries),
        }
    }

    /// Create a new node for an unresolved alias reference.
    pub fn alias(anchor_id: usize, span: Span) -> Self {
        Self {
            yaml: Yaml::Alias(anchor_id),
            span,
            style: NodeStyle::Alias,
            children: Children::None,
        }
    }

    /// Check if this is a scalar (not a sequence, mapping or alias).
    pub fn is_scalar(&self) -> bool {
        matches!(self.style, NodeStyle::Scalar(_))
    }

    /// Check if this is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self.children, Children::Sequence(_))
    }

    /// Check if this is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self.children, Children::Mapping(_))
    }

    /// Check if this is an unresolved alias.
    pub fn is_alias(&self) -> bool {
        matches!(self.style, NodeStyle::Alias)
    }

    /// Check if this is a null scalar.
    pub fn is_null(&self) -> bool {
        matches!(self.yaml, Yaml::Null)
    }

    /// Get the scalar style, if this is a scalar.
    pub fn scalar_style(&self) -> Option<ScalarStyle> {
        match self.style {
            NodeStyle::Scalar(style) => Some(style),
            _ => None,
        }
    }

    /// Get the collection style, if this is a collection.
    pub fn collection_style(&self) -> Option<CollectionStyle> {
        match self.style {
            NodeStyle::Collection(style) => Some(style),
            _ => None,
        }
    }

    /// Get sequence items if this is a sequence.
    pub fn sequence(&self) -> Option<&[YamlNode]> {
        match &self.children {
            Children::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get mapping entries if this is a mapping.
    pub fn mapping(&self) -> Option<&[MapEntry]> {
        match &self.children {
            Children::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get a sequence item by index.
    pub fn item(&self, index: usize) -> Option<&YamlNode> {
        self.sequence().and_then(|items| items.get(index))
    }

    /// Get a mapping value by key, comparing keys by deep equality.
    pub fn entry(&self, key: &Yaml) -> Option<&YamlNode> {
        self.mapping().and_then(|entries| {
            entries
                .iter()
                .find(|entry| entry.key.yaml == *key)
                .map(|entry| &entry.value)
        })
    }

    /// Number of children (sequence length or mapping entry count).
    pub fn len(&self) -> usize {
        match &self.children {
            Children::None => 0,
            Children::Sequence(items) => items.len(),
            Children::Mapping(entries) => entries.len(),
        }
    }

    /// Check if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str_scalar(s: &str, start: usize) -> YamlNode {
        YamlNode::scalar(
            Yaml::String(s.into()),
            Span::new(start, start + s.len()),
            ScalarStyle::Plain,
        )
    }

    #[test]
    fn test_scalar_accessors() {
        let node = str_scalar("test", 0);
        assert!(node.is_scalar());
        assert!(!node.is_sequence());
        assert!(!node.is_mapping());
        assert_eq!(node.scalar_style(), Some(ScalarStyle::Plain));
        assert_eq!(node.collection_style(), None);
        assert_eq!(node.len(), 0);
    }

    #[test]
    fn test_sequence_accessors() {
        let a = str_scalar("a", 2);
        let b = str_scalar("b", 6);
        let yaml = Yaml::Array(vec![a.yaml.clone(), b.yaml.clone()]);
        let node = YamlNode::new_sequence(yaml, Span::new(0, 7), CollectionStyle::Block, vec![a, b]);

        assert!(node.is_sequence());
        assert_eq!(node.len(), 2);
        assert_eq!(node.item(0).unwrap().yaml.as_str(), Some("a"));
        assert_eq!(node.item(1).unwrap().yaml.as_str(), Some("b"));
        assert!(node.item(2).is_none());
    }

    #[test]
    fn test_mapping_lookup() {
        let key = str_scalar("title", 0);
        let value = str_scalar("doc", 7);
        let mut hash = yaml_rust2::yaml::Hash::new();
        hash.insert(key.yaml.clone(), value.yaml.clone());
        let node = YamlNode::new_mapping(
            Yaml::Hash(hash),
            Span::new(0, 10),
            CollectionStyle::Block,
            vec![MapEntry { key, value }],
        );

        assert!(node.is_mapping());
        let found = node.entry(&Yaml::String("title".into())).unwrap();
        assert_eq!(found.yaml.as_str(), Some("doc"));
        assert!(node.entry(&Yaml::String("missing".into())).is_none());
    }
}
