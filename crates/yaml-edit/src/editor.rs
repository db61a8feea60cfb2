//! The editor façade: owns the source text, the parsed tree, and the edit
//! log, and keeps the three in lockstep.

use crate::planner::{block_map, block_seq, flow, Ctx};
use crate::{encode, scan, Error, Path, PathErrorKind, Result, Segment, SourceEdit, Value};
use std::fmt;
use tracing::{debug, trace};
use yaml_span::{CollectionStyle, YamlNode};
use yaml_rust2::Yaml;

/// A comment- and format-preserving YAML document editor.
///
/// Construct one from source text, issue structural edits against paths,
/// and read the minimally-modified source back out. Each mutation is
/// atomic: it either advances the document to a state that re-parses
/// cleanly or fails leaving everything untouched.
///
/// # Example
///
/// ```rust
/// use yaml_edit::YamlEditor;
///
/// let mut editor = YamlEditor::new("a: 1\nb: 2\n").unwrap();
/// editor.update(["c"], 3).unwrap();
/// assert_eq!(editor.source(), "a: 1\nb: 2\nc: 3\n");
/// ```
pub struct YamlEditor {
    source: String,
    root: YamlNode,
    line_ending: &'static str,
    edits: Vec<SourceEdit>,
}

impl YamlEditor {
    /// Parse `source` and wrap it for editing. Fails on invalid or empty
    /// input.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let root = yaml_span::parse(&source).map_err(Error::Parse)?;
        let line_ending = scan::detect_line_ending(&source);
        Ok(Self {
            source,
            root,
            line_ending,
            edits: Vec::new(),
        })
    }

    /// The current source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every edit applied so far, in application order.
    pub fn edits(&self) -> &[SourceEdit] {
        &self.edits
    }

    /// The current parsed tree. Invalidated by every successful mutation.
    pub fn root(&self) -> &YamlNode {
        &self.root
    }

    /// Resolve a path against the current tree.
    pub fn parse_at(&self, path: impl Into<Path>) -> Result<&YamlNode> {
        self.resolve(&path.into())
    }

    /// All comments inside the node at `path`, in document order.
    pub fn comments_at(&self, path: impl Into<Path>) -> Result<Vec<String>> {
        let node = self.resolve(&path.into())?;
        Ok(scan::comments_between(
            &self.source,
            node.span.start,
            scan::content_end(&self.source, node),
        ))
    }

    /// Set the value at `path`. For a mapping path whose final key does not
    /// exist yet, the entry is added; an empty path replaces the whole
    /// document.
    pub fn update(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<()> {
        let path = path.into();
        let value = value.into();
        let Some((parent_path, segment)) = path.split_last() else {
            return self.replace_root(&value);
        };

        let edit = {
            let parent = self.resolve(&parent_path)?;
            let ctx = self.ctx();
            if parent.is_mapping() {
                let key_yaml = segment_key_yaml(&segment);
                let entries = parent.mapping().unwrap_or(&[]);
                match entries
                    .iter()
                    .position(|entry| entry.key.yaml == key_yaml)
                {
                    Some(entry_index) => {
                        if is_flow(parent) {
                            flow::map_replace_value(&ctx, parent, entry_index, &value)?
                        } else {
                            block_map::replace_value(&ctx, parent, entry_index, &value)?
                        }
                    }
                    None => {
                        let key_value = segment_key_value(&segment);
                        if key_value.is_collection() {
                            return Err(Error::InvalidScalar);
                        }
                        if is_flow(parent) {
                            flow::map_add(&ctx, parent, &key_value, &value)?
                        } else {
                            block_map::add(&ctx, parent, &key_value, &value)?
                        }
                    }
                }
            } else if parent.is_sequence() {
                let index = require_index(&path, &segment)?;
                let len = parent.len();
                if index >= len {
                    return Err(Error::Path {
                        path,
                        kind: PathErrorKind::IndexOutOfBounds { index, len },
                    });
                }
                if is_flow(parent) {
                    flow::seq_replace(&ctx, parent, index, &value)?
                } else {
                    block_seq::replace(&ctx, parent, index, &value)?
                }
            } else {
                return Err(Error::Path {
                    path,
                    kind: PathErrorKind::IntoScalar,
                });
            }
        };
        self.apply(edit)
    }

    /// Append `value` to the sequence at `path`.
    pub fn append_to(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<()> {
        let path = path.into();
        let value = value.into();
        let edit = {
            let node = self.require_sequence(&path)?;
            let ctx = self.ctx();
            if is_flow(node) {
                flow::seq_append(&ctx, node, &value)?
            } else {
                block_seq::append(&ctx, node, &value)?
            }
        };
        self.apply(edit)
    }

    /// Insert `value` at the front of the sequence at `path`.
    pub fn prepend_to(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<()> {
        self.insert(path, 0, value)
    }

    /// Insert `value` into the sequence at `path` so it ends up at
    /// `index`. `index == len` appends.
    pub fn insert(
        &mut self,
        path: impl Into<Path>,
        index: usize,
        value: impl Into<Value>,
    ) -> Result<()> {
        let path = path.into();
        let value = value.into();
        let edit = {
            let node = self.require_sequence(&path)?;
            let ctx = self.ctx();
            let len = node.len();
            if index > len {
                return Err(Error::Path {
                    path,
                    kind: PathErrorKind::IndexOutOfBounds { index, len },
                });
            }
            if is_flow(node) {
                flow::seq_insert(&ctx, node, index, &value)?
            } else {
                block_seq::insert(&ctx, node, index, &value)?
            }
        };
        self.apply(edit)
    }

    /// Remove the node at `path` from its parent container.
    pub fn remove(&mut self, path: impl Into<Path>) -> Result<()> {
        let path = path.into();
        let Some((parent_path, segment)) = path.split_last() else {
            return Err(Error::Path {
                path,
                kind: PathErrorKind::EmptyPath,
            });
        };

        let edit = {
            let parent = self.resolve(&parent_path)?;
            let ctx = self.ctx();
            if parent.is_mapping() {
                let key_yaml = segment_key_yaml(&segment);
                let entries = parent.mapping().unwrap_or(&[]);
                let entry_index = entries
                    .iter()
                    .position(|entry| entry.key.yaml == key_yaml)
                    .ok_or_else(|| Error::Path {
                        path: path.clone(),
                        kind: PathErrorKind::KeyNotFound(segment.to_string()),
                    })?;
                if is_flow(parent) {
                    flow::map_remove(&ctx, parent, entry_index)?
                } else {
                    block_map::remove(&ctx, parent, entry_index)?
                }
            } else if parent.is_sequence() {
                let index = require_index(&path, &segment)?;
                let len = parent.len();
                if index >= len {
                    return Err(Error::Path {
                        path,
                        kind: PathErrorKind::IndexOutOfBounds { index, len },
                    });
                }
                if is_flow(parent) {
                    flow::seq_remove(&ctx, parent, index)?
                } else {
                    block_seq::remove(&ctx, parent, index)?
                }
            } else {
                return Err(Error::Path {
                    path,
                    kind: PathErrorKind::IntoScalar,
                });
            }
        };
        self.apply(edit)
    }

    /// Remove `delete_count` elements of the sequence at `path` starting at
    /// `index`, then insert `values` there. Returns the removed nodes
    /// (snapshots; their spans refer to the pre-removal source).
    pub fn splice(
        &mut self,
        path: impl Into<Path>,
        index: usize,
        delete_count: usize,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Vec<YamlNode>> {
        let path = path.into();
        {
            let node = self.require_sequence(&path)?;
            let len = node.len();
            if index > len || index + delete_count > len {
                return Err(Error::Path {
                    path,
                    kind: PathErrorKind::IndexOutOfBounds {
                        index: index + delete_count,
                        len,
                    },
                });
            }
        }

        let mut removed = Vec::with_capacity(delete_count);
        for _ in 0..delete_count {
            let child = path.child(Segment::Index(index));
            removed.push(self.resolve(&child)?.clone());
            self.remove(child)?;
        }
        for (offset, value) in values.into_iter().enumerate() {
            self.insert(path.clone(), index + offset, value)?;
        }
        Ok(removed)
    }

    fn replace_root(&mut self, value: &Value) -> Result<()> {
        let step = scan::indentation_step(&self.source, &self.root);
        let encoded = encode::encode_block(value, 0, step, self.line_ending);
        let replacement = if self.source.ends_with('\n') {
            format!("{}{}", encoded, self.line_ending)
        } else {
            encoded
        };
        self.apply(SourceEdit::new(0, self.source.len(), replacement))
    }

    /// Splice the edit in, re-parse, and commit only on success.
    fn apply(&mut self, edit: SourceEdit) -> Result<()> {
        let candidate = edit.apply(&self.source);
        match yaml_span::parse(&candidate) {
            Ok(root) => {
                debug!(
                    offset = edit.offset,
                    length = edit.length,
                    replacement = %edit.replacement,
                    "edit applied"
                );
                self.source = candidate;
                self.root = root;
                self.line_ending = scan::detect_line_ending(&self.source);
                self.edits.push(edit);
                Ok(())
            }
            Err(err) => {
                trace!(%err, "edit rejected: output failed to re-parse");
                Err(Error::PostEditParse(err))
            }
        }
    }

    fn ctx(&self) -> Ctx<'_> {
        Ctx {
            source: &self.source,
            line_ending: self.line_ending,
            step: scan::indentation_step(&self.source, &self.root),
        }
    }

    fn resolve(&self, path: &Path) -> Result<&YamlNode> {
        let mut node = &self.root;
        for segment in path.segments() {
            if node.is_alias() {
                return Err(Error::Alias { path: path.clone() });
            }
            node = match segment {
                Segment::Index(index) => {
                    if let Some(items) = node.sequence() {
                        items.get(*index).ok_or_else(|| Error::Path {
                            path: path.clone(),
                            kind: PathErrorKind::IndexOutOfBounds {
                                index: *index,
                                len: items.len(),
                            },
                        })?
                    } else if node.is_mapping() {
                        node.entry(&Yaml::Integer(*index as i64)).ok_or_else(|| {
                            Error::Path {
                                path: path.clone(),
                                kind: PathErrorKind::KeyNotFound(index.to_string()),
                            }
                        })?
                    } else {
                        return Err(Error::Path {
                            path: path.clone(),
                            kind: PathErrorKind::IntoScalar,
                        });
                    }
                }
                Segment::Key(key) => {
                    if node.is_mapping() {
                        node.entry(&key.to_yaml()).ok_or_else(|| Error::Path {
                            path: path.clone(),
                            kind: PathErrorKind::KeyNotFound(segment.to_string()),
                        })?
                    } else if node.is_sequence() {
                        return Err(Error::Path {
                            path: path.clone(),
                            kind: PathErrorKind::KeyIntoSequence,
                        });
                    } else {
                        return Err(Error::Path {
                            path: path.clone(),
                            kind: PathErrorKind::IntoScalar,
                        });
                    }
                }
            };
        }
        if node.is_alias() {
            return Err(Error::Alias { path: path.clone() });
        }
        Ok(node)
    }

    fn require_sequence(&self, path: &Path) -> Result<&YamlNode> {
        let node = self.resolve(path)?;
        if !node.is_sequence() {
            return Err(Error::Path {
                path: path.clone(),
                kind: PathErrorKind::NotASequence,
            });
        }
        Ok(node)
    }
}

impl fmt::Display for YamlEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_flow(node: &YamlNode) -> bool {
    node.collection_style() == Some(CollectionStyle::Flow)
}

fn segment_key_yaml(segment: &Segment) -> Yaml {
    match segment {
        Segment::Index(index) => Yaml::Integer(*index as i64),
        Segment::Key(value) => value.to_yaml(),
    }
}

fn segment_key_value(segment: &Segment) -> Value {
    match segment {
        Segment::Index(index) => Value::Int(*index as i64),
        Segment::Key(value) => value.clone(),
    }
}

fn require_index(path: &Path, segment: &Segment) -> Result<usize> {
    match segment {
        Segment::Index(index) => Ok(*index),
        Segment::Key(_) => Err(Error::Path {
            path: path.clone(),
            kind: PathErrorKind::KeyIntoSequence,
        }),
    }
}
