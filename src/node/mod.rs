//! Translation tree data model.
//!
//! A locale file is represented as an [`ObjectNode`] whose entries are keyed
//! [`TranslationNode`]s. Trees are plain values: every component that changes
//! a tree returns a new one.

mod empty;

use serde::{
    Deserialize,
    Serialize,
};

/// Parameter type text used when a parameter carries no annotation.
pub const UNKNOWN_PARAM_TYPE: &str = "unknown";

/// Parameter name used for destructured and rest parameters.
pub const PLACEHOLDER_PARAM_NAME: &str = "[unknown]";

/// Parameter type text used for destructured and rest parameters.
pub const PLACEHOLDER_PARAM_TYPE: &str = "string";

/// A value together with the object key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyed<T> {
    pub key: String,
    pub node: T,
}

impl<T> Keyed<T> {
    #[must_use]
    pub fn new(key: impl Into<String>, node: T) -> Self {
        Self { key: key.into(), node }
    }
}

/// One node of a translation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranslationNode {
    /// A plain quoted string.
    StringLiteral { value: String },
    /// A template string; `value` is the raw text between the backticks,
    /// `${...}` markers included.
    StringTemplate { value: String },
    /// A bare identifier. Never rewritten by edits.
    Variable { name: String },
    Array(ArrayNode),
    Object(ObjectNode),
    Function(FunctionNode),
    /// Produced only when deserializing a draft written by a newer format.
    #[serde(other)]
    Unknown,
}

impl TranslationNode {
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral { value: value.into() }
    }

    #[must_use]
    pub fn template(value: impl Into<String>) -> Self {
        Self::StringTemplate { value: value.into() }
    }

    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into() }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, for logs and CLI output.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::StringLiteral { .. } => "string",
            Self::StringTemplate { .. } => "template",
            Self::Variable { .. } => "variable",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
            Self::Unknown => "unknown",
        }
    }
}

impl From<ObjectNode> for TranslationNode {
    fn from(object: ObjectNode) -> Self {
        Self::Object(object)
    }
}

impl From<ArrayNode> for TranslationNode {
    fn from(array: ArrayNode) -> Self {
        Self::Array(array)
    }
}

impl From<FunctionNode> for TranslationNode {
    fn from(function: FunctionNode) -> Self {
        Self::Function(function)
    }
}

impl From<ArrayItem> for TranslationNode {
    fn from(item: ArrayItem) -> Self {
        match item {
            ArrayItem::StringLiteral { value } => Self::StringLiteral { value },
            ArrayItem::StringTemplate { value } => Self::StringTemplate { value },
            ArrayItem::Variable { name } => Self::Variable { name },
        }
    }
}

/// Element of an [`ArrayNode`]. The set of element kinds is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArrayItem {
    StringLiteral { value: String },
    StringTemplate { value: String },
    Variable { name: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayNode {
    pub items: Vec<ArrayItem>,
}

impl ArrayNode {
    #[must_use]
    pub const fn new(items: Vec<ArrayItem>) -> Self {
        Self { items }
    }
}

/// Ordered object entries. Keys are unique; order is declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectNode {
    pub entries: Vec<Keyed<TranslationNode>>,
}

impl ObjectNode {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Builds an object from `(key, node)` pairs, applying [`ObjectNode::insert`]
    /// to each so duplicate keys keep their first position and last value.
    #[must_use]
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TranslationNode)>,
    {
        let mut object = Self::new();
        for (key, node) in entries {
            object.insert(key, node);
        }
        object
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TranslationNode> {
        self.entries.iter().find(|entry| entry.key == key).map(|entry| &entry.node)
    }

    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the object has no entries at all. See
    /// [`ObjectNode::is_blank`] for the translation emptiness predicate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the value of an existing key in place, or appends a new entry.
    pub fn insert(&mut self, key: impl Into<String>, node: TranslationNode) {
        let key = key.into();
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.node = node,
            None => self.entries.push(Keyed { key, node }),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<TranslationNode> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).node)
    }
}

/// A function parameter with its verbatim type annotation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParam {
    pub name: String,
    pub type_annotation: String,
}

impl FunctionParam {
    #[must_use]
    pub fn new(name: impl Into<String>, type_annotation: impl Into<String>) -> Self {
        Self { name: name.into(), type_annotation: type_annotation.into() }
    }

    /// Parameter standing in for a destructured or rest pattern.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_PARAM_NAME, PLACEHOLDER_PARAM_TYPE)
    }

    #[must_use]
    pub fn has_annotation(&self) -> bool {
        self.type_annotation != UNKNOWN_PARAM_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FunctionBody {
    StringLiteral { value: String },
    StringTemplate { value: String },
    Variable { name: String },
    Array(ArrayNode),
    /// Opaque statement text. Never parsed further.
    BlockExpression { raw_text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionNode {
    pub params: Vec<FunctionParam>,
    pub body: FunctionBody,
}
