//! End-to-end editor scenarios: each parses a document, applies one or
//! more mutations, and checks the exact output text plus the invariants
//! every mutation must uphold (output re-parses, the target path holds the
//! intended value, bytes outside the splices are untouched).

use yaml_edit::{Path, ScalarStyle, Segment, Value, YamlEditor};
use yaml_rust2::Yaml;

// =============================================================================
// Helpers
// =============================================================================

fn path(segments: &[Segment]) -> Path {
    Path::from(segments.to_vec())
}

fn key(k: &str) -> Segment {
    Segment::from(k)
}

fn idx(i: usize) -> Segment {
    Segment::from(i)
}

/// Apply `mutate` to `input` and assert the exact output, that the output
/// re-parses, and that bytes outside the recorded splices are unchanged.
fn assert_edit(input: &str, mutate: impl FnOnce(&mut YamlEditor), expected: &str) {
    let mut editor = YamlEditor::new(input).unwrap();
    mutate(&mut editor);
    assert_eq!(editor.source(), expected, "output text mismatch");

    // Parse-preservation.
    assert!(yaml_span::parse(editor.source()).is_ok());

    // Local-change: replay the edit log against the input.
    let replayed = editor
        .edits()
        .iter()
        .fold(input.to_string(), |source, edit| edit.apply(&source));
    assert_eq!(replayed, expected, "edit log does not reproduce the output");
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn scenario_flow_map_update_dangerous_string() {
    assert_edit(
        "{YAML: YAML}",
        |e| e.update(["YAML"], "YAML Ain't Markup Language").unwrap(),
        "{YAML: \"YAML Ain't Markup Language\"}",
    );
}

#[test]
fn scenario_remove_middle_element() {
    assert_edit("- a\n- b\n- c\n", |e| e.remove([1usize]).unwrap(), "- a\n- c\n");
}

#[test]
fn scenario_remove_last_element_keeps_trailing_newline() {
    assert_edit("- a\n- b\n", |e| e.remove([1usize]).unwrap(), "- a\n");
}

#[test]
fn scenario_alphabetical_insertion_at_end() {
    assert_edit(
        "a: 1\nb: 2\n",
        |e| e.update(["c"], 3).unwrap(),
        "a: 1\nb: 2\nc: 3\n",
    );
}

#[test]
fn scenario_comments_survive_value_update() {
    assert_edit(
        "# header\nkey: value  # inline\n",
        |e| e.update(["key"], "other").unwrap(),
        "# header\nkey: other  # inline\n",
    );
}

#[test]
fn scenario_nested_list_insertion_redistributes_indent() {
    assert_edit(
        "- - x\n  - y\n",
        |e| e.insert(path(&[idx(0)]), 0, "z").unwrap(),
        "- - z\n  - x\n  - y\n",
    );
}

// =============================================================================
// Universal properties
// =============================================================================

#[test]
fn identity_round_trip() {
    for source in [
        "a: 1\nb: 2\n",
        "# comment\n- x\n- y  # inline\n",
        "{flow: [1, 2], nested: {k: v}}",
        "key: |-\n  literal\n  text\n",
        "a: 1\r\nb: 2\r\n",
    ] {
        let editor = YamlEditor::new(source).unwrap();
        assert_eq!(editor.source(), source);
        assert_eq!(editor.to_string(), source);
        assert!(editor.edits().is_empty());
    }
}

#[test]
fn style_idempotent_update() {
    for source in ["key: value\n", "key: \"it's\"\n", "n: 42\n"] {
        let mut editor = YamlEditor::new(source).unwrap();
        let current = editor.parse_at(["key"]).ok().map(|n| n.yaml.clone());
        match current {
            Some(Yaml::String(s)) => editor.update(["key"], s.as_str()).unwrap(),
            _ => editor.update(["n"], 42).unwrap(),
        }
        assert_eq!(editor.source(), source, "update to current value changed text");
    }
}

#[test]
fn value_correctness_after_mutations() {
    let mut editor = YamlEditor::new("servers:\n  - alpha\n  - beta\nport: 80\n").unwrap();

    editor.update(["port"], 8080).unwrap();
    assert_eq!(editor.parse_at(["port"]).unwrap().yaml, Yaml::Integer(8080));

    editor.append_to(["servers"], "gamma").unwrap();
    let servers = editor.parse_at(["servers"]).unwrap();
    assert_eq!(servers.len(), 3);
    assert_eq!(servers.item(2).unwrap().yaml.as_str(), Some("gamma"));

    editor.remove(path(&[key("servers"), idx(0)])).unwrap();
    let servers = editor.parse_at(["servers"]).unwrap();
    assert_eq!(servers.item(0).unwrap().yaml.as_str(), Some("beta"));

    assert_eq!(
        editor.source(),
        "servers:\n  - beta\n  - gamma\nport: 8080\n"
    );
}

#[test]
fn edit_log_is_append_only_and_ordered() {
    let mut editor = YamlEditor::new("a: 1\n").unwrap();
    editor.update(["b"], 2).unwrap();
    editor.update(["a"], 10).unwrap();
    let edits = editor.edits();
    assert_eq!(edits.len(), 2);
    assert_eq!(edits[0].replacement, "b: 2\n");
    assert_eq!(edits[1].replacement, " 10");
}

#[test]
fn failed_mutation_preserves_state() {
    let mut editor = YamlEditor::new("a: 1\n").unwrap();
    let before = editor.source().to_string();

    assert!(editor.update(["a", "b"], 2).is_err());
    assert!(editor.remove(["missing"]).is_err());
    assert!(editor.append_to(["a"], 1).is_err());

    assert_eq!(editor.source(), before);
    assert!(editor.edits().is_empty());
    // The editor is still usable.
    editor.update(["a"], 2).unwrap();
    assert_eq!(editor.source(), "a: 2\n");
}

// =============================================================================
// Mutation sequences
// =============================================================================

#[test]
fn grows_and_shrinks_a_document() {
    let mut editor = YamlEditor::new("name: demo\n").unwrap();

    editor.update(["tags"], Value::Sequence(vec![])).unwrap();
    assert_eq!(editor.source(), "name: demo\ntags: []\n");

    editor.append_to(["tags"], "ci").unwrap();
    editor.append_to(["tags"], "release").unwrap();
    assert_eq!(editor.source(), "name: demo\ntags: [ci, release]\n");

    editor.remove(path(&[key("tags"), idx(0)])).unwrap();
    editor.remove(path(&[key("tags"), idx(0)])).unwrap();
    assert_eq!(editor.source(), "name: demo\ntags: []\n");

    editor.remove(["tags"]).unwrap();
    assert_eq!(editor.source(), "name: demo\n");
}

#[test]
fn splice_replaces_a_run_of_elements() {
    let mut editor = YamlEditor::new("- a\n- b\n- c\n").unwrap();
    let removed = editor
        .splice(
            Path::root(),
            1,
            1,
            [Value::from("x"), Value::from("y")],
        )
        .unwrap();

    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].yaml.as_str(), Some("b"));
    assert_eq!(editor.source(), "- a\n- x\n- y\n- c\n");
}

#[test]
fn prepend_inserts_at_the_front() {
    assert_edit(
        "- a\n- b\n",
        |e| e.prepend_to(Path::root(), "z").unwrap(),
        "- z\n- a\n- b\n",
    );
}

#[test]
fn update_with_requested_literal_style() {
    let mut editor = YamlEditor::new("key: value\n").unwrap();
    editor
        .update(
            ["key"],
            Value::from("one\ntwo").with_scalar_style(ScalarStyle::Literal),
        )
        .unwrap();
    assert_eq!(editor.source(), "key: |-\n  one\n  two\n");
    assert_eq!(
        editor.parse_at(["key"]).unwrap().yaml.as_str(),
        Some("one\ntwo")
    );
}

#[test]
fn update_whole_document() {
    let mut editor = YamlEditor::new("old: doc\n").unwrap();
    editor.update(Path::root(), "replaced").unwrap();
    assert_eq!(editor.source(), "replaced\n");
}

#[test]
fn json_pointer_paths_resolve() {
    let editor = YamlEditor::new("a:\n  - x\n  - y\n").unwrap();
    let node = editor.parse_at(Path::parse("/a/1").unwrap()).unwrap();
    assert_eq!(node.yaml.as_str(), Some("y"));
}
