//! Emptiness predicate and empty-node synthesis.
//!
//! A node is "blank" when it holds nothing a translator typed. Variables never
//! count as content because they are copied verbatim between locales.

use super::{
    ArrayItem,
    ArrayNode,
    FunctionBody,
    FunctionNode,
    ObjectNode,
    TranslationNode,
};

/// Blank check for string content. Function return values must hold
/// something other than whitespace.
fn is_blank_text(value: &str, function_return: bool) -> bool {
    if function_return { value.trim().is_empty() } else { value.is_empty() }
}

impl TranslationNode {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::StringLiteral { value } | Self::StringTemplate { value } => {
                is_blank_text(value, false)
            }
            Self::Variable { name } => name.is_empty(),
            Self::Array(array) => array.is_blank(),
            Self::Object(object) => object.is_blank(),
            Self::Function(function) => function.is_blank(),
            Self::Unknown => true,
        }
    }

    /// Same-shape node with all translatable text cleared.
    #[must_use]
    pub fn emptied(&self) -> Self {
        match self {
            Self::StringLiteral { .. } => Self::StringLiteral { value: String::new() },
            Self::StringTemplate { .. } => Self::StringTemplate { value: String::new() },
            Self::Variable { .. } | Self::Unknown => self.clone(),
            Self::Array(array) => Self::Array(array.emptied()),
            Self::Object(_) => Self::Object(ObjectNode::new()),
            Self::Function(function) => Self::Function(function.emptied()),
        }
    }
}

impl ObjectNode {
    /// An object is blank when every entry is blank (vacuously for no entries).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|entry| entry.node.is_blank())
    }
}

impl ArrayItem {
    #[must_use]
    pub fn is_blank(&self, function_return: bool) -> bool {
        match self {
            Self::StringLiteral { value } | Self::StringTemplate { value } => {
                is_blank_text(value, function_return)
            }
            Self::Variable { name } => name.is_empty(),
        }
    }

    #[must_use]
    pub fn emptied(&self) -> Self {
        match self {
            Self::StringLiteral { .. } => Self::StringLiteral { value: String::new() },
            Self::StringTemplate { .. } => Self::StringTemplate { value: String::new() },
            Self::Variable { .. } => self.clone(),
        }
    }
}

impl ArrayNode {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.items
            .iter()
            .filter(|item| !matches!(item, ArrayItem::Variable { .. }))
            .all(|item| item.is_blank(false))
    }

    #[must_use]
    pub fn emptied(&self) -> Self {
        Self { items: self.items.iter().map(ArrayItem::emptied).collect() }
    }
}

impl FunctionBody {
    /// Returned strings use the function-return variant of the string rule;
    /// returned arrays use the plain array rule.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::StringLiteral { value } | Self::StringTemplate { value } => {
                is_blank_text(value, true)
            }
            Self::Variable { name } => name.is_empty(),
            Self::Array(array) => array.is_blank(),
            Self::BlockExpression { raw_text } => raw_text.trim().is_empty(),
        }
    }

    #[must_use]
    pub fn emptied(&self) -> Self {
        match self {
            Self::StringLiteral { .. } => Self::StringLiteral { value: String::new() },
            Self::StringTemplate { .. } => Self::StringTemplate { value: String::new() },
            Self::Variable { .. } => self.clone(),
            Self::Array(array) => Self::Array(array.emptied()),
            Self::BlockExpression { .. } => Self::BlockExpression { raw_text: String::new() },
        }
    }
}

impl FunctionNode {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body.is_blank()
    }

    /// Keeps the parameter list and body kind, clears the body.
    #[must_use]
    pub fn emptied(&self) -> Self {
        Self { params: self.params.clone(), body: self.body.emptied() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::node::FunctionParam;

    fn function(body: FunctionBody) -> TranslationNode {
        TranslationNode::Function(FunctionNode {
            params: vec![FunctionParam::new("name", "string")],
            body,
        })
    }

    fn array(items: Vec<ArrayItem>) -> TranslationNode {
        TranslationNode::Array(ArrayNode::new(items))
    }

    fn lit(value: &str) -> ArrayItem {
        ArrayItem::StringLiteral { value: value.to_string() }
    }

    fn var(name: &str) -> ArrayItem {
        ArrayItem::Variable { name: name.to_string() }
    }

    #[rstest]
    #[case::empty_string(TranslationNode::string(""), true)]
    #[case::whitespace_string(TranslationNode::string("  "), false)]
    #[case::string(TranslationNode::string("Hi"), false)]
    #[case::empty_template(TranslationNode::template(""), true)]
    #[case::variable(TranslationNode::variable("APP"), false)]
    #[case::array_only_variables(array(vec![var("A"), var("B")]), true)]
    #[case::array_with_blank_strings(array(vec![lit(""), var("B")]), true)]
    #[case::array_with_text(array(vec![lit(""), lit("x")]), false)]
    #[case::empty_object(TranslationNode::Object(ObjectNode::new()), true)]
    #[case::object_of_blanks(
        TranslationNode::Object(ObjectNode::from_entries([("a", TranslationNode::string(""))])),
        true
    )]
    #[case::object_with_text(
        TranslationNode::Object(ObjectNode::from_entries([("a", TranslationNode::string("A"))])),
        false
    )]
    #[case::blank_block(function(FunctionBody::BlockExpression { raw_text: " \n ".to_string() }), true)]
    #[case::block(function(FunctionBody::BlockExpression { raw_text: "return 1;".to_string() }), false)]
    #[case::whitespace_return(function(FunctionBody::StringTemplate { value: "  ".to_string() }), true)]
    #[case::return_text(function(FunctionBody::StringTemplate { value: "Hi ${name}".to_string() }), false)]
    #[case::unknown(TranslationNode::Unknown, true)]
    fn test_is_blank(#[case] node: TranslationNode, #[case] expected: bool) {
        assert_that!(node.is_blank(), eq(expected));
    }

    #[rstest]
    fn emptied_array_keeps_variables_and_length() {
        let node = array(vec![lit("a"), var("X"), ArrayItem::StringTemplate { value: "${b}".to_string() }]);

        let emptied = node.emptied();

        assert_that!(
            emptied,
            eq(&array(vec![
                lit(""),
                var("X"),
                ArrayItem::StringTemplate { value: String::new() }
            ]))
        );
        assert_that!(emptied.is_blank(), eq(true));
    }

    #[rstest]
    fn emptied_function_keeps_params_and_body_kind() {
        let node = function(FunctionBody::BlockExpression { raw_text: "return name;".to_string() });

        let TranslationNode::Function(emptied) = node.emptied() else {
            panic!("expected function");
        };

        assert_that!(emptied.params, elements_are![eq(&FunctionParam::new("name", "string"))]);
        assert_that!(emptied.body, eq(&FunctionBody::BlockExpression { raw_text: String::new() }));
    }

    #[rstest]
    fn emptied_object_drops_entries() {
        let node = TranslationNode::Object(ObjectNode::from_entries([(
            "a",
            TranslationNode::string("A"),
        )]));

        assert_that!(node.emptied(), eq(&TranslationNode::Object(ObjectNode::new())));
    }
}
