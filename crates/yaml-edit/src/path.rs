//! Paths addressing nodes inside a document.

use crate::Value;
use std::fmt;

/// A segment in a [`Path`]: a sequence index or a mapping key.
///
/// Mapping keys are arbitrary scalars compared by deep structural equality;
/// an `Index` used against a mapping is coerced to the integer key of the
/// same value.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Sequence index.
    Index(usize),
    /// Mapping key.
    Key(Value),
}

/// A path from the document root to a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Create a new empty path (addresses the document root).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a JSON-Pointer-style path: `/a/b/0`, with `~0` for `~` and
    /// `~1` for `/`. The empty string is the root. Numeric tokens become
    /// indices; everything else becomes a string key.
    pub fn parse(pointer: &str) -> Option<Self> {
        if pointer.is_empty() {
            return Some(Self::root());
        }
        if !pointer.starts_with('/') {
            return None;
        }
        let mut path = Self::root();
        for token in pointer[1..].split('/') {
            let token = token.replace("~1", "/").replace("~0", "~");
            match token.parse::<usize>() {
                Ok(index) => path.push_index(index),
                Err(_) => path.push_key(token.as_str()),
            }
        }
        Some(path)
    }

    /// Push an index segment onto the path.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    /// Push a key segment onto the path.
    pub fn push_key(&mut self, key: impl Into<Value>) {
        self.segments.push(Segment::Key(key.into()));
    }

    /// Return this path extended with one more segment.
    pub fn child(&self, segment: Segment) -> Path {
        let mut path = self.clone();
        path.segments.push(segment);
        path
    }

    /// The path without its final segment, plus that segment.
    /// `None` for the root.
    pub fn split_last(&self) -> Option<(Path, Segment)> {
        let (last, parent) = self.segments.split_last()?;
        Some((
            Path {
                segments: parent.to_vec(),
            },
            last.clone(),
        ))
    }

    /// Get the segments as a slice.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Check if the path is empty (addresses the root).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the length of the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "(root)")
        } else {
            for (i, segment) in self.segments.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                write!(f, "{}", segment)?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(index) => write!(f, "[{}]", index),
            Segment::Key(Value::String(key)) => write!(f, "{}", key),
            Segment::Key(other) => write!(f, "{:?}", other),
        }
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(Value::from(key))
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl<S: Into<Segment> + Clone> From<&[S]> for Path {
    fn from(segments: &[S]) -> Self {
        Self {
            segments: segments.iter().cloned().map(Into::into).collect(),
        }
    }
}

impl<S: Into<Segment>, const N: usize> From<[S; N]> for Path {
    fn from(segments: [S; N]) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut path = Path::root();
        assert_eq!(path.to_string(), "(root)");

        path.push_key("format");
        path.push_key("html");
        path.push_index(0);
        assert_eq!(path.to_string(), "format.html.[0]");
    }

    #[test]
    fn test_parse_pointer() {
        let path = Path::parse("/a/0/b~1c").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key(Value::from("a")),
                Segment::Index(0),
                Segment::Key(Value::from("b/c")),
            ]
        );
        assert_eq!(Path::parse("").unwrap(), Path::root());
        assert!(Path::parse("a/b").is_none());
    }

    #[test]
    fn test_split_last() {
        let path = Path::from(["a", "b"]);
        let (parent, last) = path.split_last().unwrap();
        assert_eq!(parent.to_string(), "a");
        assert_eq!(last, Segment::Key(Value::from("b")));
        assert!(Path::root().split_last().is_none());
    }

    #[test]
    fn test_from_array() {
        let path: Path = ["a", "b"].into();
        assert_eq!(path.len(), 2);
        let path: Path = [0usize, 1].into();
        assert_eq!(path.to_string(), "[0].[1]");
    }
}
