//! Mutation planners: one module per container/style family.
//!
//! Each planner inspects the source around a node and emits a single
//! [`SourceEdit`](crate::SourceEdit) whose application realizes the
//! requested change while leaving every byte outside the splice untouched.

pub(crate) mod block_map;
pub(crate) mod block_seq;
pub(crate) mod flow;

use yaml_span::MapEntry;
use yaml_rust2::Yaml;

/// Shared planner inputs, derived once per mutation.
pub(crate) struct Ctx<'a> {
    pub source: &'a str,
    pub line_ending: &'static str,
    /// Document indentation step (see `scan::indentation_step`).
    pub step: usize,
}

/// Where a new key should go in a mapping.
///
/// If the existing keys are already in strictly ascending order (string
/// coercion), the new key goes before the first greater key; otherwise it
/// is appended at the end. A policy, not YAML semantics.
pub(crate) fn map_insertion_index(entries: &[MapEntry], key: &Yaml) -> usize {
    let existing: Vec<String> = entries
        .iter()
        .map(|entry| ordering_string(&entry.key.yaml))
        .collect();
    let ascending = existing.windows(2).all(|pair| pair[0] < pair[1]);
    if !ascending {
        return entries.len();
    }
    let key = ordering_string(key);
    existing
        .iter()
        .position(|existing_key| *existing_key > key)
        .unwrap_or(entries.len())
}

fn ordering_string(yaml: &Yaml) -> String {
    match yaml {
        Yaml::String(s) => s.clone(),
        Yaml::Integer(i) => i.to_string(),
        Yaml::Real(r) => r.clone(),
        Yaml::Boolean(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => format!("{:?}", other),
    }
}
