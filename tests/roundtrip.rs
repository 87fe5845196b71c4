use std::collections::BTreeMap;
use std::fs;

use locsync::io::yaml_read::parse_document;
use locsync::io::yaml_write::render_document;
use locsync::model::{Document, Node, SectionNode, ValueNode};
use locsync::sync;
use tempfile::tempdir;

const SAMPLE: &str = r#"authors:
- "Alice"
- "Bob"
version: 1.2
cultureCode: "en-US"
keys:
  greeting: "Hello"
  menu:
    open: "Open"
    close: "Close"
externalKeys:
  "launcher.title": "My Game"
tips:
- "Remember to save."
"#;

fn sample_document() -> Document {
    let mut document = Document::new("");
    document.authors = vec!["Alice".to_string(), "Bob".to_string()];
    document.version = "1.2".to_string();
    document.culture_code = "en-US".to_string();
    document.tips = vec!["Remember to save.".to_string()];
    document.external_keys =
        BTreeMap::from([("launcher.title".to_string(), "My Game".to_string())]);
    document.root.children = vec![
        Node::Value(ValueNode::new("greeting", "Hello")),
        Node::Section(SectionNode::with_children(
            "menu",
            vec![
                Node::Value(ValueNode::new("open", "Open")),
                Node::Value(ValueNode::new("close", "Close")),
            ],
        )),
    ];
    document
}

#[test]
fn parse_reads_the_expected_shape() {
    let document = parse_document(SAMPLE).expect("sample parsed");
    assert_eq!(document, sample_document());
}

#[test]
fn render_pins_field_order_and_quoting() {
    assert_eq!(render_document(&sample_document()), SAMPLE);
}

#[test]
fn render_then_parse_restores_the_document() {
    let mut original = sample_document();
    original.root.children.push(Node::Section(SectionNode::with_children(
        "dialog",
        vec![Node::Value(ValueNode::new(
            "quote",
            "She said \"hi\"\nand left.\tDone \\ over.",
        ))],
    )));
    original
        .external_keys
        .insert("needs quoting".to_string(), "va\"lue".to_string());

    let restored = parse_document(&render_document(&original)).expect("rendered YAML parsed");

    assert_eq!(restored, original);
}

#[test]
fn child_order_survives_a_round_trip() {
    let text = r#"authors: []
version: 1
cultureCode: "ru-RU"
keys:
  zebra: "z"
  apple: "a"
  middle:
    second: "2"
    first: "1"
externalKeys: {}
tips: []
"#;
    let document = parse_document(text).expect("document parsed");
    let names: Vec<&str> = document.root.children.iter().map(Node::name).collect();
    assert_eq!(names, vec!["zebra", "apple", "middle"]);

    let restored = parse_document(&render_document(&document)).expect("round trip parsed");
    assert_eq!(restored, document);
}

#[test]
fn numeric_looking_key_names_survive_a_round_trip() {
    // The YAML resolver would type these as numbers if they were written
    // plain, so the writer has to quote them for the names to read back
    // verbatim.
    let mut original = sample_document();
    original.root.children = vec![
        Node::Value(ValueNode::new("01", "leading zero")),
        Node::Value(ValueNode::new("1e5", "exponent")),
        Node::Value(ValueNode::new("0x1A", "hex")),
        Node::Section(SectionNode::with_children(
            "2.5",
            vec![Node::Value(ValueNode::new("true", "keyword"))],
        )),
    ];

    let restored = parse_document(&render_document(&original)).expect("rendered YAML parsed");

    assert_eq!(restored, original);
    let names: Vec<&str> = restored.root.children.iter().map(Node::name).collect();
    assert_eq!(names, vec!["01", "1e5", "0x1A", "2.5"]);
}

#[test]
fn sequence_values_inside_keys_are_skipped() {
    let text = SAMPLE.replace(
        "  greeting: \"Hello\"\n",
        "  greeting: \"Hello\"\n  flags:\n  - \"one\"\n  - \"two\"\n",
    );

    let document = parse_document(&text).expect("document parsed");

    assert!(document.root.child("flags").is_none());
    assert_eq!(
        document.root.child("greeting"),
        Some(&Node::Value(ValueNode::new("greeting", "Hello")))
    );
}

#[test]
fn null_leaves_read_as_empty_strings() {
    let text = SAMPLE.replace("  greeting: \"Hello\"\n", "  greeting:\n  pending: ~\n");

    let document = parse_document(&text).expect("document parsed");

    assert_eq!(
        document.root.child("greeting"),
        Some(&Node::Value(ValueNode::new("greeting", "")))
    );
    assert_eq!(
        document.root.child("pending"),
        Some(&Node::Value(ValueNode::new("pending", "")))
    );
}

#[test]
fn non_scalar_external_key_values_are_skipped() {
    let text = SAMPLE.replace(
        "externalKeys:\n  \"launcher.title\": \"My Game\"\n",
        "externalKeys:\n  \"launcher.title\": \"My Game\"\n  \"launcher.flags\":\n  - \"a\"\n  \"launcher.meta\":\n    nested: \"b\"\n",
    );

    let document = parse_document(&text).expect("document parsed");

    assert_eq!(
        document.external_keys,
        BTreeMap::from([("launcher.title".to_string(), "My Game".to_string())])
    );
}

#[test]
fn empty_collections_render_and_reparse() {
    let mut document = Document::new("");
    document.version = "0".to_string();

    let rendered = render_document(&document);
    assert!(rendered.contains("authors: []"));
    assert!(rendered.contains("keys: {}"));
    assert!(rendered.contains("externalKeys: {}"));
    assert!(rendered.contains("tips: []"));

    let restored = parse_document(&rendered).expect("rendered YAML parsed");
    assert_eq!(restored, document);
}

#[test]
fn missing_fields_fail_to_parse() {
    for field in ["authors", "version", "cultureCode", "keys", "externalKeys", "tips"] {
        let mut pruned = String::new();
        let mut skipping = false;
        for line in SAMPLE.lines() {
            let starts_field = line.starts_with(&format!("{field}:"));
            if starts_field {
                skipping = true;
                continue;
            }
            if skipping && (line.starts_with(' ') || line.starts_with('-')) {
                continue;
            }
            skipping = false;
            pruned.push_str(line);
            pruned.push('\n');
        }
        assert!(
            parse_document(&pruned).is_err(),
            "parse should fail without '{field}'"
        );
    }
}

#[test]
fn wrong_node_kinds_fail_to_parse() {
    let keys_as_sequence = SAMPLE.replace(
        "keys:\n  greeting: \"Hello\"\n  menu:\n    open: \"Open\"\n    close: \"Close\"\n",
        "keys:\n- \"Hello\"\n",
    );
    assert!(parse_document(&keys_as_sequence).is_err());

    let version_as_mapping = SAMPLE.replace("version: 1.2", "version:\n  major: 1");
    assert!(parse_document(&version_as_mapping).is_err());

    assert!(parse_document("- just\n- a\n- sequence\n").is_err());
}

#[test]
fn sync_files_overwrites_the_target_in_place() {
    let temp_dir = tempdir().expect("temporary directory");
    let source_path = temp_dir.path().join("english.yml");
    let target_path = temp_dir.path().join("french.yml");

    fs::write(&source_path, SAMPLE).expect("source written");
    fs::write(
        &target_path,
        r#"authors:
- "Claire"
version: 1.1
cultureCode: "fr-FR"
keys:
  greeting: "Bonjour"
externalKeys:
  "launcher.title": "Mon Jeu"
tips: []
"#,
    )
    .expect("target written");

    let report = sync::sync_files(&source_path, &target_path).expect("files synchronised");

    assert!(report.version_mismatch);
    assert!(report.tips_mismatch);

    let merged = sync::load_document(&target_path).expect("merged target parsed");
    assert_eq!(merged.name, "french");
    assert_eq!(merged.culture_code, "fr-FR");
    assert_eq!(
        merged.root.child("greeting"),
        Some(&Node::Value(ValueNode::new("greeting", "Bonjour")))
    );
    let Some(Node::Section(menu)) = merged.root.child("menu") else {
        panic!("menu section missing from merged target");
    };
    assert_eq!(menu.children.len(), 2);
    assert_eq!(
        merged.external_keys,
        BTreeMap::from([("launcher.title".to_string(), "Mon Jeu".to_string())])
    );
}
