//! Builds translation trees from JSON locale files.
//!
//! Locale JSON is read loosely: comments, trailing commas, unquoted keys and
//! single-quoted strings are all accepted.

use jsonc_parser::ast::{
    Array,
    Object,
    ObjectPropName,
    Value,
};
use jsonc_parser::{
    CollectOptions,
    ParseOptions,
    parse_to_ast,
};

use super::error::ParseError;
use crate::node::{
    ArrayItem,
    ArrayNode,
    ObjectNode,
    TranslationNode,
};

/// Accepts the loose syntax hand-edited locale files tend to contain.
fn parse_options() -> ParseOptions {
    ParseOptions {
        allow_comments: true,
        allow_trailing_commas: true,
        allow_loose_object_property_names: true,
        allow_single_quoted_strings: true,
        ..ParseOptions::default()
    }
}

/// Parses a JSON document whose top-level value is an object.
///
/// # Errors
/// Returns `ParseError` if the document cannot be parsed or its top-level
/// value is not an object.
pub fn extract_object(json_text: &str) -> Result<ObjectNode, ParseError> {
    let result = parse_to_ast(json_text, &CollectOptions::default(), &parse_options())
        .map_err(|error| ParseError::Json(error.to_string()))?;

    match result.value {
        Some(Value::Object(object)) => Ok(extract_properties(&object)),
        _ => Err(ParseError::NotAnObject),
    }
}

/// Maps properties in declaration order; duplicates replace in place.
fn extract_properties(object: &Object<'_>) -> ObjectNode {
    let mut node = ObjectNode::new();

    for property in &object.properties {
        let key = match &property.name {
            ObjectPropName::String(literal) => literal.value.to_string(),
            ObjectPropName::Word(word) => word.value.to_string(),
        };

        match extract_value(&property.value) {
            Some(value) => node.insert(key, value),
            None => tracing::debug!(%key, "Dropping JSON value"),
        }
    }

    node
}

/// Maps one JSON value; nested objects and arrays recurse.
fn extract_value(value: &Value<'_>) -> Option<TranslationNode> {
    match value {
        Value::Object(object) => Some(TranslationNode::Object(extract_properties(object))),
        Value::Array(array) => Some(TranslationNode::Array(extract_array(array))),
        scalar => scalar_text(scalar).map(TranslationNode::string),
    }
}

/// Keeps only the elements that decode to strings.
fn extract_array(array: &Array<'_>) -> ArrayNode {
    let items = array
        .elements
        .iter()
        .filter_map(scalar_text)
        .map(|value| ArrayItem::StringLiteral { value })
        .collect();
    ArrayNode::new(items)
}

/// Text of a string, number, boolean or null value.
fn scalar_text(value: &Value<'_>) -> Option<String> {
    match value {
        Value::StringLit(literal) => Some(literal.value.to_string()),
        Value::NumberLit(number) => Some(number.value.to_string()),
        Value::BooleanLit(boolean) => Some(boolean.value.to_string()),
        Value::NullKeyword(_) => Some("null".to_string()),
        Value::Object(_) | Value::Array(_) => None,
    }
}
