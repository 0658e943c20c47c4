//! Auto-saved partial edits, keyed by locale and file.

use std::collections::HashMap;

use super::WorkspaceError;
use crate::node::ObjectNode;

/// Storage for draft trees.
pub trait DraftStore {
    fn load_draft(&self, locale: &str, file: &str) -> Option<ObjectNode>;
    fn save_draft(&mut self, tree: &ObjectNode, locale: &str, file: &str);
    fn clear_draft(&mut self, locale: &str, file: &str);
}

fn draft_key(locale: &str, file: &str) -> String {
    format!("{locale}/{file}")
}

/// Keeps drafts in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    drafts: HashMap<String, ObjectNode>,
}

impl MemoryDraftStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load_draft(&self, locale: &str, file: &str) -> Option<ObjectNode> {
        self.drafts.get(&draft_key(locale, file)).cloned()
    }

    fn save_draft(&mut self, tree: &ObjectNode, locale: &str, file: &str) {
        self.drafts.insert(draft_key(locale, file), tree.clone());
    }

    fn clear_draft(&mut self, locale: &str, file: &str) {
        self.drafts.remove(&draft_key(locale, file));
    }
}

/// Saves `tree` as the draft of `locale/file` when it holds any translation,
/// and clears the draft otherwise.
pub fn persist_draft<D: DraftStore + ?Sized>(store: &mut D, tree: &ObjectNode, locale: &str, file: &str) {
    if tree.is_blank() {
        tracing::debug!(locale, file, "Clearing blank draft");
        store.clear_draft(locale, file);
    } else {
        tracing::debug!(locale, file, "Saving draft");
        store.save_draft(tree, locale, file);
    }
}

/// Decodes a draft serialized with [`encode_draft`].
///
/// # Errors
/// Returns `WorkspaceError::Draft` if `text` is not a serialized tree.
pub fn decode_draft(text: &str) -> Result<ObjectNode, WorkspaceError> {
    Ok(serde_json::from_str(text)?)
}

/// # Errors
/// Returns `WorkspaceError::Draft` if serialization fails.
pub fn encode_draft(tree: &ObjectNode) -> Result<String, WorkspaceError> {
    Ok(serde_json::to_string(tree)?)
}
