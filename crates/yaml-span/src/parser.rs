//! YAML parser that builds span-tracked [`YamlNode`] trees.

use crate::scalar_scan;
use crate::{CollectionStyle, Error, MapEntry, Result, ScalarStyle, Span, YamlNode};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::Marker;
use yaml_rust2::yaml::Hash;
use yaml_rust2::Yaml;

/// Parse YAML from a string, producing a span-tracked node tree.
///
/// This parses a single YAML document. If the input contains multiple
/// documents, only the first one is parsed.
///
/// # Example
///
/// ```rust
/// let node = yaml_span::parse("title: My Document").unwrap();
/// assert!(node.is_mapping());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid or if the input contains no
/// document at all.
pub fn parse(source: &str) -> Result<YamlNode> {
    let mut parser = Parser::new_from_str(source);
    let mut collector = EventCollector::default();
    parser.load(&mut collector, false)?;

    TreeBuilder::new(source, collector.events).build()
}

/// Collects the marked event stream so the tree builder can look ahead.
///
/// Scalar extents need the next event's position as a bound (see
/// `scalar_scan`), which a single-pass receiver cannot provide.
#[derive(Default)]
struct EventCollector {
    events: Vec<(Event, Marker)>,
}

impl MarkedEventReceiver for EventCollector {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        self.events.push((ev, marker));
    }
}

struct TreeBuilder<'a> {
    source: &'a str,

    /// Byte offset of every char index, plus a final entry at `source.len()`.
    /// Parser markers count characters; spans must count bytes.
    char_offsets: Vec<usize>,

    events: Vec<(Event, Marker)>,
    pos: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str, events: Vec<(Event, Marker)>) -> Self {
        let mut char_offsets: Vec<usize> = source.char_indices().map(|(b, _)| b).collect();
        char_offsets.push(source.len());
        Self {
            source,
            char_offsets,
            events,
            pos: 0,
        }
    }

    fn build(mut self) -> Result<YamlNode> {
        // Skip the stream/document preamble.
        loop {
            match self.peek() {
                Some(Event::Nothing | Event::StreamStart | Event::DocumentStart) => self.pos += 1,
                Some(Event::StreamEnd) | None => return Err(Error::EmptyStream),
                Some(_) => break,
            }
        }
        self.build_node(false)
    }

    fn peek(&self) -> Option<&Event> {
        self.events.get(self.pos).map(|(ev, _)| ev)
    }

    /// Byte offset of the character index a marker reports.
    fn byte_at(&self, char_index: usize) -> usize {
        self.char_offsets
            .get(char_index)
            .copied()
            .unwrap_or(self.source.len())
    }

    /// Byte offset of the next unconsumed event, or the end of the source.
    fn next_event_byte(&self) -> usize {
        self.events
            .get(self.pos)
            .map(|(_, marker)| self.byte_at(marker.index()))
            .unwrap_or(self.source.len())
    }

    fn build_node(&mut self, in_flow: bool) -> Result<YamlNode> {
        let (event, marker) = self
            .events
            .get(self.pos)
            .cloned()
            .ok_or(Error::UnbalancedEvents)?;
        self.pos += 1;

        match event {
            Event::Scalar(value, style, _anchor_id, _tag) => {
                Ok(self.scalar_node(value, style.into(), &marker, in_flow))
            }
            Event::SequenceStart(_anchor_id, _tag) => self.sequence_node(&marker),
            Event::MappingStart(_anchor_id, _tag) => self.mapping_node(&marker),
            Event::Alias(anchor_id) => {
                let start = self.byte_at(marker.index());
                let end = scalar_scan::alias_end(self.source, start);
                Ok(YamlNode::alias(anchor_id, Span::new(start, end)))
            }
            _ => Err(Error::UnbalancedEvents),
        }
    }

    fn scalar_node(
        &self,
        value: String,
        style: ScalarStyle,
        marker: &Marker,
        in_flow: bool,
    ) -> YamlNode {
        let start = self.byte_at(marker.index());
        let bound = self.next_event_byte();
        let end = scalar_scan::scalar_end(self.source, start, style, in_flow, bound);

        // Quoted and block scalars are always strings; plain scalars go
        // through type resolution.
        let yaml = match style {
            ScalarStyle::Plain | ScalarStyle::Any => Yaml::from_str(&value),
            _ => Yaml::String(value),
        };

        YamlNode::scalar(yaml, Span::new(start, end.max(start)), style)
    }

    fn sequence_node(&mut self, marker: &Marker) -> Result<YamlNode> {
        let start = self.byte_at(marker.index());
        let flow = self.source.as_bytes().get(start) == Some(&b'[');
        let style = if flow {
            CollectionStyle::Flow
        } else {
            CollectionStyle::Block
        };

        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some(Event::SequenceEnd) => {
                    self.pos += 1;
                    break;
                }
                Some(_) => items.push(self.build_node(flow)?),
                None => return Err(Error::UnbalancedEvents),
            }
        }

        let end = if flow {
            let from = items.last().map(|item| item.span.end).unwrap_or(start + 1);
            scalar_scan::seek_flow_close(self.source, from, b']')
        } else {
            // Block sequences are never empty in source.
            items.last().map(|item| item.span.end).unwrap_or(start)
        };

        let yaml = Yaml::Array(items.iter().map(|item| item.yaml.clone()).collect());
        Ok(YamlNode::new_sequence(yaml, Span::new(start, end), style, items))
    }

    fn mapping_node(&mut self, marker: &Marker) -> Result<YamlNode> {
        let marker_start = self.byte_at(marker.index());
        let flow = self.source.as_bytes().get(marker_start) == Some(&b'{');
        let style = if flow {
            CollectionStyle::Flow
        } else {
            CollectionStyle::Block
        };

        let mut entries = Vec::new();
        loop {
            match self.peek() {
                Some(Event::MappingEnd) => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    let key = self.build_node(flow)?;
                    let value = self.build_node(flow)?;
                    entries.push(MapEntry { key, value });
                }
                None => return Err(Error::UnbalancedEvents),
            }
        }

        // The parser's start marker for block mappings is unreliable; the
        // first key is. Flow mappings start at their brace.
        let start = if flow {
            marker_start
        } else {
            entries
                .first()
                .map(|entry| entry.key.span.start)
                .unwrap_or(marker_start)
        };

        // Implicit nulls park their marker on the next token; their span
        // must not stretch the mapping.
        let content_max = entries
            .iter()
            .flat_map(|entry| {
                let value_end = if entry.value.is_null() && entry.value.span.is_empty() {
                    entry.key.span.end
                } else {
                    entry.value.span.end
                };
                [entry.key.span.end, value_end]
            })
            .max();

        let end = if flow {
            let from = content_max.unwrap_or(marker_start + 1);
            scalar_scan::seek_flow_close(self.source, from, b'}')
        } else {
            content_max.unwrap_or(start)
        };

        let mut hash = Hash::new();
        for entry in &entries {
            hash.insert(entry.key.yaml.clone(), entry.value.yaml.clone());
        }

        Ok(YamlNode::new_mapping(
            Yaml::Hash(hash),
            Span::new(start, end.max(start)),
            style,
            entries,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanned<'a>(source: &'a str, node: &YamlNode) -> &'a str {
        &source[node.span.start..node.span.end]
    }

    #[test]
    fn test_parse_scalar() {
        let node = parse("hello").unwrap();
        assert!(node.is_scalar());
        assert_eq!(node.yaml.as_str(), Some("hello"));
        assert_eq!(node.span, Span::new(0, 5));
    }

    #[test]
    fn test_parse_integer() {
        let node = parse("42").unwrap();
        assert_eq!(node.yaml.as_i64(), Some(42));
        assert_eq!(node.scalar_style(), Some(ScalarStyle::Plain));
    }

    #[test]
    fn test_parse_block_mapping() {
        let source = "title: My Document\nauthor: John Doe\n";
        let node = parse(source).unwrap();
        assert!(node.is_mapping());
        assert_eq!(node.collection_style(), Some(CollectionStyle::Block));
        assert_eq!(node.len(), 2);

        let title = node.entry(&Yaml::String("title".into())).unwrap();
        assert_eq!(spanned(source, title), "My Document");

        let author = node.entry(&Yaml::String("author".into())).unwrap();
        assert_eq!(spanned(source, author), "John Doe");
    }

    #[test]
    fn test_parse_block_sequence() {
        let source = "- a\n- b\n- c\n";
        let node = parse(source).unwrap();
        assert!(node.is_sequence());
        assert_eq!(node.collection_style(), Some(CollectionStyle::Block));
        assert_eq!(node.span, Span::new(0, 11));
        assert_eq!(spanned(source, node.item(1).unwrap()), "b");
    }

    #[test]
    fn test_parse_flow_styles() {
        let source = "{list: [1, 2], flag: true}";
        let node = parse(source).unwrap();
        assert_eq!(node.collection_style(), Some(CollectionStyle::Flow));
        assert_eq!(spanned(source, &node), source);

        let list = node.entry(&Yaml::String("list".into())).unwrap();
        assert_eq!(list.collection_style(), Some(CollectionStyle::Flow));
        assert_eq!(spanned(source, list), "[1, 2]");
    }

    #[test]
    fn test_quoted_scalar_spans_include_quotes() {
        let source = "a: 'it''s'\nb: \"x\\\"y\"\n";
        let node = parse(source).unwrap();

        let a = node.entry(&Yaml::String("a".into())).unwrap();
        assert_eq!(spanned(source, a), "'it''s'");
        assert_eq!(a.scalar_style(), Some(ScalarStyle::SingleQuoted));
        assert_eq!(a.yaml.as_str(), Some("it's"));

        let b = node.entry(&Yaml::String("b".into())).unwrap();
        assert_eq!(spanned(source, b), "\"x\\\"y\"");
        assert_eq!(b.scalar_style(), Some(ScalarStyle::DoubleQuoted));
    }

    #[test]
    fn test_literal_scalar_span() {
        let source = "text: |-\n  one\n  two\nnext: 1\n";
        let node = parse(source).unwrap();
        let text = node.entry(&Yaml::String("text".into())).unwrap();
        assert_eq!(text.scalar_style(), Some(ScalarStyle::Literal));
        assert_eq!(spanned(source, text), "|-\n  one\n  two");
        assert_eq!(text.yaml.as_str(), Some("one\ntwo"));
    }

    #[test]
    fn test_inline_comment_outside_span() {
        let source = "key: value  # inline\n";
        let node = parse(source).unwrap();
        let value = node.entry(&Yaml::String("key".into())).unwrap();
        assert_eq!(spanned(source, value), "value");
    }

    #[test]
    fn test_implicit_null_value() {
        let source = "a:\nb: 1\n";
        let node = parse(source).unwrap();
        let a = node.entry(&Yaml::String("a".into())).unwrap();
        assert!(a.is_null());
        assert!(a.span.is_empty());
    }

    #[test]
    fn test_nested_block_sequences() {
        let source = "- - x\n  - y\n";
        let node = parse(source).unwrap();
        let inner = node.item(0).unwrap();
        assert!(inner.is_sequence());
        assert_eq!(inner.span, Span::new(2, 11));
        assert_eq!(spanned(source, inner.item(0).unwrap()), "x");
        assert_eq!(spanned(source, inner.item(1).unwrap()), "y");
    }

    #[test]
    fn test_alias_node() {
        let source = "a: &anchor 1\nb: *anchor\n";
        let node = parse(source).unwrap();
        let b = node.entry(&Yaml::String("b".into())).unwrap();
        assert!(b.is_alias());
        assert_eq!(spanned(source, b), "*anchor");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(parse(""), Err(Error::EmptyStream)));
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        assert!(matches!(parse("a: [unclosed"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_non_ascii_spans_are_byte_accurate() {
        let source = "café: résumé\n";
        let node = parse(source).unwrap();
        let value = node.entry(&Yaml::String("café".into())).unwrap();
        assert_eq!(spanned(source, value), "résumé");
    }

    #[test]
    fn test_crlf_document() {
        let source = "a: 1\r\nb: 2\r\n";
        let node = parse(source).unwrap();
        let b = node.entry(&Yaml::String("b".into())).unwrap();
        assert_eq!(spanned(source, b), "2");
    }
}
