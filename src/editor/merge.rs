//! Folds a saved draft over a freshly parsed tree.

use crate::node::{
    ObjectNode,
    TranslationNode,
};

/// Merges `draft` over `fresh`.
///
/// Fresh entries keep their order and draft-only keys are appended. When both
/// sides hold an object the two are merged recursively; otherwise the draft
/// node wins.
#[must_use]
pub fn merge(fresh: &ObjectNode, draft: &ObjectNode) -> ObjectNode {
    let mut merged = fresh.clone();

    for entry in &draft.entries {
        let node = match (fresh.get(&entry.key), &entry.node) {
            (Some(TranslationNode::Object(fresh_child)), TranslationNode::Object(draft_child)) => {
                TranslationNode::Object(merge(fresh_child, draft_child))
            }
            _ => entry.node.clone(),
        };
        merged.insert(entry.key.clone(), node);
    }

    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn object(entries: Vec<(&str, TranslationNode)>) -> TranslationNode {
        TranslationNode::Object(ObjectNode::from_entries(entries))
    }

    #[fixture]
    fn fresh() -> ObjectNode {
        ObjectNode::from_entries([
            ("title", TranslationNode::string("Titre")),
            (
                "menu",
                object(vec![
                    ("start", TranslationNode::string("Démarrer")),
                    ("quit", TranslationNode::string("Quitter")),
                ]),
            ),
        ])
    }

    #[rstest]
    fn test_empty_draft_is_identity(fresh: ObjectNode) {
        assert_that!(merge(&fresh, &ObjectNode::new()), eq(&fresh));
    }

    #[rstest]
    fn test_subset_draft_keeps_other_leaves(fresh: ObjectNode) {
        let draft = ObjectNode::from_entries([(
            "menu",
            object(vec![("quit", TranslationNode::string("Sortir"))]),
        )]);

        let merged = merge(&fresh, &draft);

        assert_that!(
            merged,
            eq(&ObjectNode::from_entries([
                ("title", TranslationNode::string("Titre")),
                (
                    "menu",
                    object(vec![
                        ("start", TranslationNode::string("Démarrer")),
                        ("quit", TranslationNode::string("Sortir")),
                    ])
                ),
            ]))
        );
    }

    #[rstest]
    fn test_draft_only_keys_are_appended_in_draft_order(fresh: ObjectNode) {
        let draft = ObjectNode::from_entries([
            ("zeta", TranslationNode::string("z")),
            ("title", TranslationNode::string("Titre!")),
            ("alpha", TranslationNode::string("a")),
        ]);

        let merged = merge(&fresh, &draft);

        assert_that!(
            merged.keys().collect::<Vec<_>>(),
            elements_are![eq(&"title"), eq(&"menu"), eq(&"zeta"), eq(&"alpha")]
        );
        assert_that!(merged.get("title"), some(eq(&TranslationNode::string("Titre!"))));
    }

    #[rstest]
    fn test_draft_leaf_replaces_object(fresh: ObjectNode) {
        let draft = ObjectNode::from_entries([("menu", TranslationNode::string("flat"))]);

        let merged = merge(&fresh, &draft);

        assert_that!(merged.get("menu"), some(eq(&TranslationNode::string("flat"))));
    }
}
