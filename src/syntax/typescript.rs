//! Extracts translation trees from JavaScript/TypeScript locale modules using Tree-sitter.

use tree_sitter::{
    Language,
    Node,
    Parser,
};

use super::error::ParseError;
use super::literal::{
    continuation_indent,
    dedent,
    unescape,
};
use super::{
    ExportLayout,
    NamedExport,
    NamedExportKind,
    ScriptExports,
};
use crate::node::{
    ArrayItem,
    ArrayNode,
    FunctionBody,
    FunctionNode,
    FunctionParam,
    ObjectNode,
    TranslationNode,
    UNKNOWN_PARAM_TYPE,
};
use crate::types::{
    ByteSpan,
    SourcePosition,
};

/// Node kinds that only wrap another expression: `(x)`, `x satisfies T`,
/// `x as T`, `x!` and `<T>x`.
const WRAPPER_KINDS: &[&str] = &[
    "parenthesized_expression",
    "satisfies_expression",
    "as_expression",
    "non_null_expression",
    "type_assertion",
];

/// Function expression kinds across grammar versions.
const FUNCTION_KINDS: &[&str] = &["arrow_function", "function_expression", "function"];

/// A string-like literal before it is placed into a node variant.
enum StringValue {
    Literal(String),
    Template(String),
}

/// Named children other than comments.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).filter(|child| child.kind() != "comment").collect()
}

/// Strips wrapper expressions until a non-wrapper node is reached.
fn unwrap_expression(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while WRAPPER_KINDS.contains(&current.kind()) {
        let children = named_children(current);
        // `<T>x` keeps the expression last; the others keep it first
        let inner = if current.kind() == "type_assertion" {
            children.last().copied()
        } else {
            children.first().copied()
        };
        let Some(inner) = inner else {
            break;
        };
        current = inner;
    }
    current
}

/// Finds the first error or missing node, depth first.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Parses `source` with `language` and rejects trees that contain syntax errors.
fn parse_tree(source: &str, language: &Language) -> Result<tree_sitter::Tree, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(language).map_err(ParseError::LanguageSetup)?;
    let tree = parser.parse(source, None).ok_or(ParseError::ParseFailed)?;

    let root = tree.root_node();
    if root.has_error() {
        let position = first_error(root)
            .map_or(SourcePosition { line: 0, character: 0 }, |node| node.start_position().into());
        return Err(ParseError::Syntax(position));
    }

    Ok(tree)
}

/// Extracts the export shape and translation tree of a locale module.
///
/// # Errors
/// Returns `ParseError` if:
/// - Language setup fails
/// - The source has syntax errors
/// - No default-exported object literal and no named exports exist
pub fn extract_exports(source: &str, language: &Language) -> Result<ScriptExports, ParseError> {
    let tree = parse_tree(source, language)?;
    let extractor = Extractor { source };
    extractor.exports(tree.root_node())
}

/// A named export found at the top level, before mapping.
enum NamedDeclaration<'tree> {
    Initializer { name: String, value: Node<'tree> },
    Function { name: String, declaration: Node<'tree> },
}

/// Walks a parsed module and maps expressions to translation nodes.
struct Extractor<'a> {
    /// Source text the tree was parsed from
    source: &'a str,
}

impl<'a> Extractor<'a> {
    fn text(&self, node: Node<'_>) -> Option<&'a str> {
        node.utf8_text(self.source.as_bytes()).ok()
    }

    fn exports(&self, root: Node<'_>) -> Result<ScriptExports, ParseError> {
        let mut default_object: Option<Node<'_>> = None;
        let mut named = Vec::new();

        for statement in named_children(root) {
            if statement.kind() != "export_statement" {
                continue;
            }

            if let Some(value) = statement.child_by_field_name("value") {
                let unwrapped = unwrap_expression(value);
                if unwrapped.kind() == "object" && default_object.is_none() {
                    default_object = Some(unwrapped);
                } else {
                    tracing::debug!(kind = unwrapped.kind(), "Ignoring non-object default export");
                }
                continue;
            }

            let Some(declaration) = statement.child_by_field_name("declaration") else {
                continue;
            };
            let mut cursor = statement.walk();
            if statement.children(&mut cursor).any(|child| child.kind() == "default") {
                tracing::debug!("Ignoring default-exported declaration");
                continue;
            }

            self.collect_named_declarations(declaration, &mut named);
        }

        if let Some(object) = default_object {
            return Ok(ScriptExports {
                tree: self.object(object),
                layout: ExportLayout::Default { span: ByteSpan::from_node(&object) },
            });
        }

        if named.is_empty() {
            return Err(ParseError::NoExports);
        }

        let mut tree = ObjectNode::new();
        let mut exports = Vec::new();
        for declaration in named {
            match declaration {
                NamedDeclaration::Initializer { name, value } => {
                    let unwrapped = unwrap_expression(value);
                    if let Some(node) = self.expression(unwrapped) {
                        tree.insert(name.clone(), node);
                    } else {
                        tracing::debug!(%name, kind = unwrapped.kind(), "Dropping unmapped export");
                    }
                    exports.push(NamedExport {
                        name,
                        span: ByteSpan::from_node(&unwrapped),
                        kind: NamedExportKind::Initializer,
                    });
                }
                NamedDeclaration::Function { name, declaration } => {
                    tree.insert(name.clone(), TranslationNode::Function(self.function(declaration)));
                    exports.push(NamedExport {
                        name,
                        span: ByteSpan::from_node(&declaration),
                        kind: NamedExportKind::FunctionDeclaration,
                    });
                }
            }
        }

        Ok(ScriptExports { tree, layout: ExportLayout::Named(exports) })
    }

    fn collect_named_declarations<'tree>(
        &self,
        declaration: Node<'tree>,
        named: &mut Vec<NamedDeclaration<'tree>>,
    ) {
        match declaration.kind() {
            "lexical_declaration" | "variable_declaration" => {
                for declarator in named_children(declaration) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    let Some(name_node) = declarator.child_by_field_name("name") else {
                        continue;
                    };
                    let Some(value) = declarator.child_by_field_name("value") else {
                        continue;
                    };
                    if name_node.kind() != "identifier" {
                        continue;
                    }
                    if let Some(name) = self.text(name_node) {
                        named.push(NamedDeclaration::Initializer { name: name.to_string(), value });
                    }
                }
            }
            "function_declaration" => {
                if let Some(name) =
                    declaration.child_by_field_name("name").and_then(|node| self.text(node))
                {
                    named.push(NamedDeclaration::Function { name: name.to_string(), declaration });
                }
            }
            kind => tracing::debug!(kind, "Ignoring named export"),
        }
    }

    fn object(&self, node: Node<'_>) -> ObjectNode {
        let mut object = ObjectNode::new();

        for property in named_children(node) {
            if property.kind() != "pair" {
                tracing::debug!(kind = property.kind(), "Skipping object member");
                continue;
            }
            let Some(key) = property.child_by_field_name("key").and_then(|key| self.property_key(key))
            else {
                continue;
            };
            let Some(value) = property.child_by_field_name("value") else {
                continue;
            };

            match self.expression(unwrap_expression(value)) {
                Some(node) => object.insert(key, node),
                None => tracing::debug!(%key, kind = value.kind(), "Dropping unmapped property"),
            }
        }

        object
    }

    fn property_key(&self, node: Node<'_>) -> Option<String> {
        match node.kind() {
            "property_identifier" => self.text(node).map(ToString::to_string),
            "string" => match self.string(node)? {
                StringValue::Literal(value) | StringValue::Template(value) => Some(value),
            },
            _ => None,
        }
    }

    /// Maps an (already unwrapped) expression to a node, or `None` when no
    /// rule applies.
    fn expression(&self, node: Node<'_>) -> Option<TranslationNode> {
        match node.kind() {
            "object" => Some(TranslationNode::Object(self.object(node))),
            kind if FUNCTION_KINDS.contains(&kind) => {
                Some(TranslationNode::Function(self.function(node)))
            }
            "array" => self.array(node).map(TranslationNode::Array),
            "string" | "template_string" => self.string(node).map(|value| match value {
                StringValue::Literal(value) => TranslationNode::StringLiteral { value },
                StringValue::Template(value) => TranslationNode::StringTemplate { value },
            }),
            "identifier" | "undefined" => {
                self.text(node).map(|name| TranslationNode::Variable { name: name.to_string() })
            }
            _ => None,
        }
    }

    fn string(&self, node: Node<'_>) -> Option<StringValue> {
        let text = self.text(node)?;
        let inner = text.get(1..text.len().checked_sub(1)?)?;

        match node.kind() {
            "string" => Some(StringValue::Literal(unescape(inner))),
            "template_string" => {
                let has_substitution = named_children(node)
                    .iter()
                    .any(|child| child.kind() == "template_substitution");
                if has_substitution {
                    Some(StringValue::Template(inner.to_string()))
                } else {
                    Some(StringValue::Literal(unescape(inner)))
                }
            }
            _ => None,
        }
    }

    /// All-or-nothing: any element that is not a string, template or
    /// identifier drops the whole array.
    fn array(&self, node: Node<'_>) -> Option<ArrayNode> {
        let mut items = Vec::new();
        for element in named_children(node) {
            let item = match element.kind() {
                "string" | "template_string" => match self.string(element)? {
                    StringValue::Literal(value) => ArrayItem::StringLiteral { value },
                    StringValue::Template(value) => ArrayItem::StringTemplate { value },
                },
                "identifier" => ArrayItem::Variable { name: self.text(element)?.to_string() },
                kind => {
                    tracing::debug!(kind, "Dropping array with unsupported element");
                    return None;
                }
            };
            items.push(item);
        }
        Some(ArrayNode::new(items))
    }

    fn function(&self, node: Node<'_>) -> FunctionNode {
        let params = if let Some(parameters) = node.child_by_field_name("parameters") {
            named_children(parameters).into_iter().map(|param| self.param(param)).collect()
        } else if let Some(parameter) = node.child_by_field_name("parameter") {
            vec![self.param(parameter)]
        } else {
            Vec::new()
        };

        let body = node.child_by_field_name("body").map_or(
            FunctionBody::BlockExpression { raw_text: String::new() },
            |body| self.function_body(body),
        );

        FunctionNode { params, body }
    }

    fn param(&self, node: Node<'_>) -> FunctionParam {
        match node.kind() {
            "identifier" => self
                .text(node)
                .map_or_else(FunctionParam::placeholder, |name| {
                    FunctionParam::new(name, UNKNOWN_PARAM_TYPE)
                }),
            "required_parameter" | "optional_parameter" => {
                let Some(pattern) = node.child_by_field_name("pattern") else {
                    return FunctionParam::placeholder();
                };
                if pattern.kind() != "identifier" {
                    return FunctionParam::placeholder();
                }
                let Some(name) = self.text(pattern) else {
                    return FunctionParam::placeholder();
                };
                let type_text = node
                    .child_by_field_name("type")
                    .and_then(|annotation| named_children(annotation).first().copied())
                    .and_then(|type_node| self.text(type_node))
                    .unwrap_or(UNKNOWN_PARAM_TYPE);
                FunctionParam::new(name, type_text)
            }
            _ => FunctionParam::placeholder(),
        }
    }

    fn function_body(&self, body: Node<'_>) -> FunctionBody {
        if body.kind() == "statement_block" {
            return FunctionBody::BlockExpression { raw_text: self.block_text(body) };
        }

        let expression = unwrap_expression(body);
        let mapped = match expression.kind() {
            "array" => self.array(expression).map(FunctionBody::Array),
            "string" | "template_string" => self.string(expression).map(|value| match value {
                StringValue::Literal(value) => FunctionBody::StringLiteral { value },
                StringValue::Template(value) => FunctionBody::StringTemplate { value },
            }),
            "identifier" => {
                self.text(expression).map(|name| FunctionBody::Variable { name: name.to_string() })
            }
            _ => None,
        };

        mapped.unwrap_or_else(|| {
            let text = self.text(body).unwrap_or_default();
            let text = dedent(text, continuation_indent(text));
            FunctionBody::BlockExpression { raw_text: format!("return {text};") }
        })
    }

    /// Statement text between the braces, de-indented by the first statement's column.
    fn block_text(&self, block: Node<'_>) -> String {
        let mut cursor = block.walk();
        let statements: Vec<_> = block.named_children(&mut cursor).collect();
        let (Some(first), Some(last)) = (statements.first(), statements.last()) else {
            return String::new();
        };

        let span = ByteSpan::new(first.start_byte(), last.end_byte());
        span.slice(self.source)
            .map(|text| dedent(text, first.start_position().column))
            .unwrap_or_default()
    }
}
