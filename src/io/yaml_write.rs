use std::fmt::Write;

use serde_yaml::Value;

use crate::model::{Document, Node, SectionNode};

/// Renders a localization document back to YAML text.
///
/// The six top-level fields appear in the fixed order `authors`, `version`,
/// `cultureCode`, `keys`, `externalKeys`, `tips`. Authors, tips, the culture
/// code, external keys, and leaf values are double-quoted; the version and
/// tree key names stay plain unless a plain rendering would not re-parse as
/// the same string, in which case they fall back to double quotes (so a
/// degenerate version such as the empty string or `1e5` is quoted rather
/// than written plain). Child order of the key tree is written exactly as
/// held in memory.
pub fn render_document(document: &Document) -> String {
    let mut out = String::new();

    write_string_sequence(&mut out, "authors", &document.authors);
    let _ = writeln!(out, "version: {}", plain_or_quoted(&document.version));
    let _ = writeln!(out, "cultureCode: {}", double_quoted(&document.culture_code));

    if document.root.children.is_empty() {
        out.push_str("keys: {}\n");
    } else {
        out.push_str("keys:\n");
        write_section(&mut out, &document.root, 1);
    }

    if document.external_keys.is_empty() {
        out.push_str("externalKeys: {}\n");
    } else {
        out.push_str("externalKeys:\n");
        for (key, value) in &document.external_keys {
            let _ = writeln!(out, "  {}: {}", double_quoted(key), double_quoted(value));
        }
    }

    write_string_sequence(&mut out, "tips", &document.tips);
    out
}

fn write_string_sequence(out: &mut String, field: &str, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "{field}: []");
        return;
    }
    let _ = writeln!(out, "{field}:");
    for item in items {
        let _ = writeln!(out, "- {}", double_quoted(item));
    }
}

fn write_section(out: &mut String, section: &SectionNode, depth: usize) {
    for child in &section.children {
        for _ in 0..depth {
            out.push_str("  ");
        }
        match child {
            Node::Section(next) => {
                if next.children.is_empty() {
                    let _ = writeln!(out, "{}: {{}}", plain_or_quoted(&next.name));
                } else {
                    let _ = writeln!(out, "{}:", plain_or_quoted(&next.name));
                    write_section(out, next, depth + 1);
                }
            }
            Node::Value(leaf) => {
                let _ = writeln!(
                    out,
                    "{}: {}",
                    plain_or_quoted(&leaf.name),
                    double_quoted(&leaf.value)
                );
            }
        }
    }
}

/// Emits the scalar plain when it is safe to do so, falling back to the
/// double-quoted style when a plain rendering would change meaning (empty
/// string, YAML keywords, leading/odd punctuation).
fn plain_or_quoted(text: &str) -> String {
    if is_safe_plain(text) {
        text.to_string()
    } else {
        double_quoted(text)
    }
}

fn is_safe_plain(text: &str) -> bool {
    if text.is_empty() || text.starts_with('-') {
        return false;
    }
    if !text
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-'))
    {
        return false;
    }
    // A plain scalar is only safe when the reader resolves it back to the
    // identical string. Anything the resolver types (`true`, `null`, `1e5`,
    // `0x1A`, ...) would stringify differently on the next parse.
    matches!(
        serde_yaml::from_str::<Value>(text),
        Ok(Value::String(parsed)) if parsed == text
    )
}

/// YAML double-quoted scalar with the escapes the reader understands.
fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            ch if (ch as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04X}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}
