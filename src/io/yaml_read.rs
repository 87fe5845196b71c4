use serde_yaml::{Mapping, Value};

use crate::error::{Result, SyncError};
use crate::model::{Document, Node, SectionNode, ValueNode};

/// Parses a localization document from YAML text.
///
/// The top level must be a mapping carrying `authors`, `version`,
/// `cultureCode`, `keys`, `externalKeys`, and `tips`. A missing field or a
/// wrong node kind at any of these positions yields
/// [`SyncError::InvalidDocument`]; malformed YAML yields [`SyncError::Yaml`].
/// Neither is ever surfaced as a panic.
pub fn parse_document(text: &str) -> Result<Document> {
    let value: Value = serde_yaml::from_str(text)?;
    let mapping = value
        .as_mapping()
        .ok_or_else(|| invalid("top-level node must be a mapping"))?;

    let mut document = Document::new("");
    document.authors = read_string_sequence(mapping, "authors")?;
    document.version = read_scalar(mapping, "version")?;
    document.culture_code = read_scalar(mapping, "cultureCode")?;
    document.tips = read_string_sequence(mapping, "tips")?;

    let keys = required_mapping(mapping, "keys")?;
    read_section(keys, &mut document.root)?;

    let external = required_mapping(mapping, "externalKeys")?;
    for (key, value) in external {
        let name =
            scalar_text(key).ok_or_else(|| invalid("external key names must be scalars"))?;
        // Entries with non-scalar values are skipped rather than rejected.
        if let Some(text) = scalar_text(value) {
            document.external_keys.insert(name, text);
        }
    }

    Ok(document)
}

fn read_section(mapping: &Mapping, section: &mut SectionNode) -> Result<()> {
    for (key, value) in mapping {
        let name = scalar_text(key).ok_or_else(|| invalid("key names must be scalars"))?;
        match value {
            Value::Mapping(child_mapping) => {
                let mut child = SectionNode::new(name);
                read_section(child_mapping, &mut child)?;
                section.children.push(Node::Section(child));
            }
            Value::Sequence(_) | Value::Tagged(_) => {
                // Sequences have no place in the key tree; ignore them.
            }
            scalar => {
                let text = scalar_text(scalar).unwrap_or_default();
                section.children.push(Node::Value(ValueNode::new(name, text)));
            }
        }
    }
    Ok(())
}

fn read_string_sequence(mapping: &Mapping, field: &str) -> Result<Vec<String>> {
    let sequence = required(mapping, field)?
        .as_sequence()
        .ok_or_else(|| invalid(format!("'{field}' must be a sequence")))?;
    sequence
        .iter()
        .map(|entry| {
            scalar_text(entry).ok_or_else(|| invalid(format!("'{field}' entries must be scalars")))
        })
        .collect()
}

fn read_scalar(mapping: &Mapping, field: &str) -> Result<String> {
    scalar_text(required(mapping, field)?)
        .ok_or_else(|| invalid(format!("'{field}' must be a scalar")))
}

fn required_mapping<'a>(mapping: &'a Mapping, field: &str) -> Result<&'a Mapping> {
    required(mapping, field)?
        .as_mapping()
        .ok_or_else(|| invalid(format!("'{field}' must be a mapping")))
}

fn required<'a>(mapping: &'a Mapping, field: &str) -> Result<&'a Value> {
    mapping
        .get(field)
        .ok_or_else(|| invalid(format!("missing field '{field}'")))
}

/// YAML scalars are untyped text as far as the localization format is
/// concerned, so numbers and booleans are accepted and stringified. A null
/// scalar reads as the empty string.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

fn invalid(reason: impl Into<String>) -> SyncError {
    SyncError::InvalidDocument(reason.into())
}
