use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::io::yaml_read;
use crate::io::yaml_write;
use crate::model::{Document, Node, SectionNode};

/// Advisory findings produced by a sync run. Neither finding blocks the merge
/// or the write-back; they exist so the caller can nudge the translator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// The two documents carry different version markers.
    pub version_mismatch: bool,
    /// The two documents carry a different number of tips.
    pub tips_mismatch: bool,
}

/// Merges the source document's key structure into the target document.
///
/// The target adopts the source's key existence, kinds, and (best-effort)
/// ordering while keeping every translated value it already holds. The
/// external-key table is rebuilt around the source's key set, preferring the
/// target's values. `source` is consumed: subtrees the target lacks are moved
/// into it rather than copied.
///
/// Keys that exist only in the target are never visited or removed. Source
/// structure drives additions and kind fixes, never deletions, so stale
/// target-only keys persist unchanged.
#[instrument(level = "info", skip_all, fields(source = %source.name, target = %target.name))]
pub fn sync_documents(source: Document, target: &mut Document) -> SyncReport {
    let report = SyncReport {
        version_mismatch: source.version != target.version,
        tips_mismatch: source.tips.len() != target.tips.len(),
    };

    merge_children(source.root.children, &mut target.root);
    target.external_keys = reconcile_external_keys(source.external_keys, &target.external_keys);

    if report.version_mismatch {
        warn!(
            source = %source.version,
            target = %target.version,
            "version markers differ"
        );
    }
    if report.tips_mismatch {
        warn!(
            source = source.tips.len(),
            target = target.tips.len(),
            "tip counts differ"
        );
    }

    report
}

/// Walks the source children in order, reconciling each against the target
/// section. `index` tracks the child's position among its source siblings and
/// is where a moved node lands in the target when that slot exists.
fn merge_children(source_children: Vec<Node>, target: &mut SectionNode) {
    for (index, source_child) in source_children.into_iter().enumerate() {
        let opposite = target.child_position(source_child.name());
        match (source_child, opposite) {
            (Node::Section(source_section), Some(position)) => {
                if let Node::Section(target_section) = &mut target.children[position] {
                    merge_children(source_section.children, target_section);
                } else {
                    // The target holds a leaf where the source has a section.
                    target.children.remove(position);
                    insert_best_effort(&mut target.children, index, Node::Section(source_section));
                }
            }
            (Node::Value(source_value), Some(position)) => {
                // An existing leaf keeps its translation and its sibling
                // position; the source leaf is dropped.
                if !target.children[position].is_value() {
                    // The target holds a section where the source has a leaf.
                    target.children.remove(position);
                    insert_best_effort(&mut target.children, index, Node::Value(source_value));
                }
            }
            (node, None) => insert_best_effort(&mut target.children, index, node),
        }
    }
}

/// Inserts at the source position when that index is valid for the target
/// list, otherwise appends. Best-effort ordering, not a reordering guarantee.
fn insert_best_effort(children: &mut Vec<Node>, index: usize, node: Node) {
    if index <= children.len() {
        children.insert(index, node);
    } else {
        children.push(node);
    }
}

/// Rebuilds the external-key table around the source's key set. For each
/// source key the target's existing value wins; keys only the target defines
/// are dropped.
fn reconcile_external_keys(
    source: BTreeMap<String, String>,
    target: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    source
        .into_iter()
        .map(|(key, fallback)| {
            let value = target.get(&key).cloned().unwrap_or(fallback);
            (key, value)
        })
        .collect()
}

/// Reads and parses a localization document, naming it after the file stem.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)?;
    let mut document = yaml_read::parse_document(&text)?;
    document.name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(document)
}

/// Renders a document and writes it to the given path, replacing any
/// previous content.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn write_document(path: &Path, document: &Document) -> Result<()> {
    fs::write(path, yaml_write::render_document(document))?;
    Ok(())
}

/// Synchronises one localization file into another: loads both documents,
/// merges the source's structure into the target, and overwrites the target
/// file in place with the re-rendered result.
#[instrument(
    level = "info",
    skip_all,
    fields(source = %source_path.display(), target = %target_path.display())
)]
pub fn sync_files(source_path: &Path, target_path: &Path) -> Result<SyncReport> {
    let source = load_document(source_path)?;
    let mut target = load_document(target_path)?;
    let report = sync_documents(source, &mut target);
    info!("key tree merged");
    write_document(target_path, &target)?;
    Ok(report)
}
