//! Path-addressed edits on translation trees.

use crate::node::{
    ObjectNode,
    TranslationNode,
};

/// Result of applying an edit to one object level.
enum Step {
    /// Nothing changed; the caller keeps its original.
    Unchanged,
    Updated(ObjectNode),
    /// The object lost its last entry and should be removed from its parent.
    Emptied,
}

/// Returns `tree` with the node at `path` set to `node`.
///
/// - `None`, or a blank node replacing an existing entry, deletes the entry.
///   Objects left without entries are removed from their parents, up to the
///   root.
/// - Missing intermediate keys are created as objects. Descending through a
///   non-object node leaves the tree unchanged.
/// - An empty `path` replaces the whole tree, but only with an object.
#[must_use]
pub fn set_at_path<S: AsRef<str>>(
    tree: &ObjectNode,
    path: &[S],
    node: Option<TranslationNode>,
) -> ObjectNode {
    let Some((key, rest)) = path.split_first() else {
        return match node {
            Some(TranslationNode::Object(object)) => object,
            _ => tree.clone(),
        };
    };

    match set_in(tree, key.as_ref(), rest, node) {
        Step::Unchanged => tree.clone(),
        Step::Updated(object) => object,
        Step::Emptied => ObjectNode::new(),
    }
}

/// Applies the edit below `object`, creating `key` as an object if missing.
fn set_in<S: AsRef<str>>(
    object: &ObjectNode,
    key: &str,
    rest: &[S],
    node: Option<TranslationNode>,
) -> Step {
    let Some((next, rest)) = rest.split_first() else {
        return set_leaf(object, key, node);
    };

    let child_step = match object.get(key) {
        Some(TranslationNode::Object(child)) => set_in(child, next.as_ref(), rest, node),
        Some(other) => {
            tracing::debug!(key, kind = other.kind_name(), "Cannot descend into non-object node");
            return Step::Unchanged;
        }
        None => set_in(&ObjectNode::new(), next.as_ref(), rest, node),
    };

    match child_step {
        Step::Unchanged => Step::Unchanged,
        Step::Updated(child) => {
            let mut updated = object.clone();
            updated.insert(key, TranslationNode::Object(child));
            Step::Updated(updated)
        }
        Step::Emptied => remove_entry(object, key),
    }
}

/// Applies the edit to `key` itself.
fn set_leaf(object: &ObjectNode, key: &str, node: Option<TranslationNode>) -> Step {
    let exists = object.contains_key(key);
    match node {
        Some(node) if !(exists && node.is_blank()) => {
            let mut updated = object.clone();
            updated.insert(key, node);
            Step::Updated(updated)
        }
        _ => remove_entry(object, key),
    }
}

/// Removes `key`, reporting whether `object` was left empty.
fn remove_entry(object: &ObjectNode, key: &str) -> Step {
    let mut updated = object.clone();
    updated.remove(key);
    if updated.is_empty() {
        Step::Emptied
    } else if updated.len() == object.len() {
        Step::Unchanged
    } else {
        Step::Updated(updated)
    }
}
