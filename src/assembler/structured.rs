//! JSON output for structured-data locale files.

use serde::ser::{
    Serialize,
    SerializeMap,
    Serializer,
};
use serde_json::ser::PrettyFormatter;

use super::AssembleError;
use crate::node::{
    ArrayItem,
    ArrayNode,
    ObjectNode,
    TranslationNode,
};

/// Serializes `tree` as pretty-printed JSON with keys in `reference` order.
///
/// Functions have no JSON form and are left out.
pub(super) fn render(
    tree: &ObjectNode,
    reference: &ObjectNode,
    indent_width: usize,
) -> Result<String, AssembleError> {
    let indent = " ".repeat(indent_width);
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));

    OrderedObject { object: tree, reference: Some(reference) }.serialize(&mut serializer)?;

    let mut text = String::from_utf8_lossy(&out).into_owned();
    text.push('\n');
    Ok(text)
}

/// Keys of `object` in reference order, then keys the reference lacks.
fn ordered_keys<'a>(object: &'a ObjectNode, reference: Option<&'a ObjectNode>) -> Vec<&'a str> {
    let Some(reference) = reference else {
        return object.keys().collect();
    };

    let mut keys: Vec<&str> = reference.keys().filter(|key| object.contains_key(key)).collect();
    keys.extend(object.keys().filter(|key| !reference.contains_key(key)));
    keys
}

struct OrderedObject<'a> {
    object: &'a ObjectNode,
    reference: Option<&'a ObjectNode>,
}

impl Serialize for OrderedObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        for key in ordered_keys(self.object, self.reference) {
            let Some(node) = self.object.get(key) else {
                continue;
            };
            match node {
                TranslationNode::StringLiteral { value } | TranslationNode::StringTemplate { value } => {
                    map.serialize_entry(key, value)?;
                }
                TranslationNode::Variable { name } => map.serialize_entry(key, name)?,
                TranslationNode::Array(array) => map.serialize_entry(key, &ArrayValues(array))?,
                TranslationNode::Object(child) => {
                    let reference = self
                        .reference
                        .and_then(|reference| reference.get(key))
                        .and_then(TranslationNode::as_object);
                    map.serialize_entry(key, &OrderedObject { object: child, reference })?;
                }
                TranslationNode::Function(_) | TranslationNode::Unknown => {
                    tracing::debug!(key, kind = node.kind_name(), "Skipping node without JSON form");
                }
            }
        }

        map.end()
    }
}

struct ArrayValues<'a>(&'a ArrayNode);

impl Serialize for ArrayValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.items.iter().map(|item| match item {
            ArrayItem::StringLiteral { value } | ArrayItem::StringTemplate { value } => value,
            ArrayItem::Variable { name } => name,
        }))
    }
}
