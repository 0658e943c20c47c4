//! Pairs a reference tree with an edit tree as a flat event stream.

use crate::node::{
    ObjectNode,
    TranslationNode,
};

/// Opening or closing marker of a nested object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMarker {
    pub key: String,
    /// Nesting level; top-level keys are at depth 0.
    pub depth: usize,
    /// Keys from the root down to and including `key`.
    pub path: Vec<String>,
    /// Whether `key` is the final key of its level's merged key order.
    pub is_last_child: bool,
}

/// A leaf position with the node from each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedEntry {
    pub key: String,
    pub depth: usize,
    pub path: Vec<String>,
    pub is_last_child: bool,
    pub ref_node: TranslationNode,
    pub edit_node: TranslationNode,
}

impl AlignedEntry {
    /// Path joined with dots, for display.
    #[must_use]
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignEvent {
    ObjectStart(ObjectMarker),
    Entry(AlignedEntry),
    ObjectEnd(ObjectMarker),
}

impl AlignEvent {
    #[must_use]
    pub const fn as_entry(&self) -> Option<&AlignedEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::ObjectStart(_) | Self::ObjectEnd(_) => None,
        }
    }
}

/// Aligns `edit` against `reference`.
///
/// Keys are visited reference-first, then edit-only keys, each once. A key
/// missing on one side is paired with an emptied copy of the other side.
/// With `hide_translated`, entries whose edit node is not blank are skipped,
/// and objects left without events are elided entirely.
#[must_use]
pub fn align(reference: &ObjectNode, edit: &ObjectNode, hide_translated: bool) -> Vec<AlignEvent> {
    let mut events = Vec::new();
    align_level(reference, edit, hide_translated, &[], &mut events);
    events
}

/// Reference keys in order, then keys only the edit side has.
fn merged_keys<'a>(reference: &'a ObjectNode, edit: &'a ObjectNode) -> Vec<&'a str> {
    let mut keys: Vec<&str> = reference.keys().collect();
    keys.extend(edit.keys().filter(|key| !reference.contains_key(key)));
    keys
}

/// Appends the events of one object level, returning nothing for levels
/// that end up without entries.
fn align_level(
    reference: &ObjectNode,
    edit: &ObjectNode,
    hide_translated: bool,
    parent_path: &[String],
    events: &mut Vec<AlignEvent>,
) {
    let keys = merged_keys(reference, edit);
    let depth = parent_path.len();

    for (index, key) in keys.iter().enumerate() {
        let (ref_node, edit_node) = match (reference.get(key), edit.get(key)) {
            (Some(ref_node), Some(edit_node)) => (ref_node.clone(), edit_node.clone()),
            (Some(ref_node), None) => (ref_node.clone(), ref_node.emptied()),
            (None, Some(edit_node)) => (edit_node.emptied(), edit_node.clone()),
            (None, None) => continue,
        };

        let mut path = parent_path.to_vec();
        path.push((*key).to_string());
        let is_last_child = index + 1 == keys.len();

        if let (TranslationNode::Object(ref_object), TranslationNode::Object(edit_object)) =
            (&ref_node, &edit_node)
        {
            let mut children = Vec::new();
            align_level(ref_object, edit_object, hide_translated, &path, &mut children);
            if children.is_empty() {
                continue;
            }

            let marker = ObjectMarker { key: (*key).to_string(), depth, path, is_last_child };
            events.push(AlignEvent::ObjectStart(marker.clone()));
            events.extend(children);
            events.push(AlignEvent::ObjectEnd(marker));
            continue;
        }

        if hide_translated && !edit_node.is_blank() {
            continue;
        }

        events.push(AlignEvent::Entry(AlignedEntry {
            key: (*key).to_string(),
            depth,
            path,
            is_last_child,
            ref_node,
            edit_node,
        }));
    }
}
