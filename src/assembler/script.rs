//! Source output for script locale files: generated literals spliced into
//! the template text at the recorded export spans.

use super::AssembleError;
use crate::input::SourceLanguage;
use crate::node::{
    ArrayItem,
    ArrayNode,
    FunctionBody,
    FunctionNode,
    FunctionParam,
    ObjectNode,
    TranslationNode,
};
use crate::syntax::literal::TemplateTracker;
use crate::syntax::{
    ExportLayout,
    NamedExport,
    NamedExportKind,
    parse_exports,
};
use crate::types::ByteSpan;

/// Splices `tree` into `template`.
pub(super) fn render(
    file_name: &str,
    language: SourceLanguage,
    template: &str,
    tree: &ObjectNode,
    indent_width: usize,
) -> Result<String, AssembleError> {
    let exports = parse_exports(language, template).map_err(|error| {
        tracing::error!(file_name, %error, "Failed to parse assembly template");
        AssembleError::TemplateParse { file: file_name.to_string() }
    })?;

    let writer = ScriptWriter {
        indent_unit: " ".repeat(indent_width),
        annotations: language.supports_type_annotations(),
    };

    let replacements = match exports.layout {
        ExportLayout::Default { span } => vec![(span, writer.object(tree, 0)?)],
        ExportLayout::Named(named) => writer.named_replacements(&named, tree)?,
    };

    splice(template, &replacements)
}

/// Replaces each span of `text` with its new text. Spans must be sorted and
/// must not overlap.
fn splice(text: &str, replacements: &[(ByteSpan, String)]) -> Result<String, AssembleError> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for (span, replacement) in replacements {
        let before = text.get(cursor..span.start).ok_or(AssembleError::InvalidSpan)?;
        out.push_str(before);
        out.push_str(replacement);
        cursor = span.end;
    }

    out.push_str(text.get(cursor..).ok_or(AssembleError::InvalidSpan)?);
    Ok(out)
}

/// Whether `key` can be written without quotes.
/// Whether `key` can be written as an unquoted property name.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Double-quoted string literal with JSON escaping.
fn quote(value: &str) -> Result<String, AssembleError> {
    Ok(serde_json::to_string(value)?)
}

/// Pretty-prints translation nodes as script source.
struct ScriptWriter {
    /// One level of indentation
    indent_unit: String,
    /// Emit parameter type annotations
    annotations: bool,
}

impl ScriptWriter {
    fn indent(&self, level: usize) -> String {
        self.indent_unit.repeat(level)
    }

    fn named_replacements(
        &self,
        named: &[NamedExport],
        tree: &ObjectNode,
    ) -> Result<Vec<(ByteSpan, String)>, AssembleError> {
        let mut replacements = Vec::new();

        for export in named {
            let Some(node) = tree.get(&export.name) else {
                continue;
            };

            let replacement = match (export.kind, node) {
                (_, TranslationNode::Unknown) => continue,
                (NamedExportKind::Initializer, node) => self.value(node, 0)?,
                (NamedExportKind::FunctionDeclaration, TranslationNode::Function(function)) => {
                    self.function_declaration(&export.name, function)?
                }
                (NamedExportKind::FunctionDeclaration, node) => {
                    tracing::warn!(
                        name = %export.name,
                        kind = node.kind_name(),
                        "Keeping function declaration replaced by a non-function"
                    );
                    continue;
                }
            };
            replacements.push((export.span, replacement));
        }

        for key in tree.keys().filter(|key| !named.iter().any(|export| export.name == *key)) {
            tracing::debug!(key, "No export to splice key into");
        }

        Ok(replacements)
    }

    /// Writes `{ ... }` whose closing brace sits at `level`.
    fn object(&self, object: &ObjectNode, level: usize) -> Result<String, AssembleError> {
        let entries: Vec<_> = object
            .entries
            .iter()
            .filter(|entry| !matches!(entry.node, TranslationNode::Unknown))
            .collect();
        if entries.is_empty() {
            return Ok("{}".to_string());
        }

        let inner = self.indent(level + 1);
        let mut out = String::from("{\n");
        for entry in entries {
            let key = if is_identifier(&entry.key) { entry.key.clone() } else { quote(&entry.key)? };
            out.push_str(&inner);
            out.push_str(&key);
            out.push_str(": ");
            out.push_str(&self.value(&entry.node, level + 1)?);
            out.push_str(",\n");
        }
        out.push_str(&self.indent(level));
        out.push('}');
        Ok(out)
    }

    fn value(&self, node: &TranslationNode, level: usize) -> Result<String, AssembleError> {
        match node {
            TranslationNode::StringLiteral { value } => quote(value),
            TranslationNode::StringTemplate { value } => Ok(format!("`{value}`")),
            TranslationNode::Variable { name } => Ok(name.clone()),
            TranslationNode::Array(array) => self.array(array, level),
            TranslationNode::Object(object) => self.object(object, level),
            TranslationNode::Function(function) => self.function_expression(function, level),
            TranslationNode::Unknown => Ok("undefined".to_string()),
        }
    }

    fn array(&self, array: &ArrayNode, level: usize) -> Result<String, AssembleError> {
        if array.items.is_empty() {
            return Ok("[]".to_string());
        }

        let inner = self.indent(level + 1);
        let mut out = String::from("[\n");
        for item in &array.items {
            let text = match item {
                ArrayItem::StringLiteral { value } => quote(value)?,
                ArrayItem::StringTemplate { value } => format!("`{value}`"),
                ArrayItem::Variable { name } => name.clone(),
            };
            out.push_str(&inner);
            out.push_str(&text);
            out.push_str(",\n");
        }
        out.push_str(&self.indent(level));
        out.push(']');
        Ok(out)
    }

    fn params(&self, params: &[FunctionParam]) -> String {
        params
            .iter()
            .map(|param| {
                if self.annotations && param.has_annotation() {
                    format!("{}: {}", param.name, param.type_annotation)
                } else {
                    param.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Body text of a non-block function body, as an expression.
    fn body_expression(&self, body: &FunctionBody, level: usize) -> Result<Option<String>, AssembleError> {
        let text = match body {
            FunctionBody::StringLiteral { value } => quote(value)?,
            FunctionBody::StringTemplate { value } => format!("`{value}`"),
            FunctionBody::Variable { name } => name.clone(),
            FunctionBody::Array(array) => self.array(array, level)?,
            FunctionBody::BlockExpression { .. } => return Ok(None),
        };
        Ok(Some(text))
    }

    fn function_expression(&self, function: &FunctionNode, level: usize) -> Result<String, AssembleError> {
        let params = self.params(&function.params);
        match &function.body {
            FunctionBody::BlockExpression { raw_text } => {
                Ok(format!("function ({params}) {}", self.block(raw_text, level)))
            }
            body => {
                let expression = self.body_expression(body, level)?.unwrap_or_default();
                Ok(format!("({params}) => {expression}"))
            }
        }
    }

    fn function_declaration(&self, name: &str, function: &FunctionNode) -> Result<String, AssembleError> {
        let params = self.params(&function.params);
        let raw_text = match &function.body {
            FunctionBody::BlockExpression { raw_text } => raw_text.clone(),
            body => format!("return {};", self.body_expression(body, 1)?.unwrap_or_default()),
        };
        Ok(format!("function {name}({params}) {}", self.block(&raw_text, 0)))
    }

    /// Writes `{ ... }` around raw statements, indenting each line one level
    /// past `level` unless it is template literal content.
    fn block(&self, raw_text: &str, level: usize) -> String {
        if raw_text.trim().is_empty() {
            return "{}".to_string();
        }

        let inner = self.indent(level + 1);
        let mut tracker = TemplateTracker::default();
        let mut lines = Vec::new();
        for line in raw_text.split('\n') {
            if tracker.inside_template() {
                lines.push(line.to_string());
            } else if line.trim().is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{inner}{line}"));
            }
            tracker.feed(line);
        }

        format!("{{\n{}\n{}}}", lines.join("\n"), self.indent(level))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::syntax::parse;

    fn ts(template: &str, tree: &ObjectNode) -> String {
        render("translation.ts", SourceLanguage::TypeScript, template, tree, 4).unwrap()
    }

    #[rstest]
    fn test_default_export_is_spliced() {
        let template = "import type { Locale } from \"./types\";\n\n// keep me\nexport default {\n    old: \"value\",\n} satisfies Locale;\n";
        let tree = ObjectNode::from_entries([
            ("greeting", TranslationNode::string("Bonjour \"toi\"")),
            ("kebab-key", TranslationNode::template("Salut ${name}")),
            ("site", TranslationNode::variable("SITE")),
            (
                "items",
                TranslationNode::Array(ArrayNode::new(vec![
                    ArrayItem::StringLiteral { value: "a".to_string() },
                    ArrayItem::Variable { name: "B".to_string() },
                ])),
            ),
            ("nested", TranslationNode::Object(ObjectNode::from_entries([("x", TranslationNode::string("y"))]))),
            ("empty", TranslationNode::Object(ObjectNode::new())),
        ]);

        assert_that!(
            ts(template, &tree),
            eq("import type { Locale } from \"./types\";\n\n// keep me\nexport default {\n    greeting: \"Bonjour \\\"toi\\\"\",\n    \"kebab-key\": `Salut ${name}`,\n    site: SITE,\n    items: [\n        \"a\",\n        B,\n    ],\n    nested: {\n        x: \"y\",\n    },\n    empty: {},\n} satisfies Locale;\n")
        );
    }

    #[rstest]
    fn test_functions_are_written_with_annotations_for_typescript() {
        let tree = ObjectNode::from_entries([
            (
                "greet",
                TranslationNode::Function(FunctionNode {
                    params: vec![FunctionParam::new("name", "string"), FunctionParam::new("n", "unknown")],
                    body: FunctionBody::StringTemplate { value: "Salut ${name}".to_string() },
                }),
            ),
            (
                "count",
                TranslationNode::Function(FunctionNode {
                    params: vec![FunctionParam::new("n", "number")],
                    body: FunctionBody::BlockExpression {
                        raw_text: "if (n > 1) {\n    return `${n} éléments`;\n}\n\nreturn \"un élément\";".to_string(),
                    },
                }),
            ),
        ]);

        assert_that!(
            ts("export default {};", &tree),
            eq("export default {\n    greet: (name: string, n) => `Salut ${name}`,\n    count: function (n: number) {\n        if (n > 1) {\n            return `${n} éléments`;\n        }\n\n        return \"un élément\";\n    },\n};")
        );
    }

    #[rstest]
    fn test_javascript_drops_annotations() {
        let tree = ObjectNode::from_entries([(
            "greet",
            TranslationNode::Function(FunctionNode {
                params: vec![FunctionParam::new("name", "string")],
                body: FunctionBody::Variable { name: "name".to_string() },
            }),
        )]);

        let text = render("translation.js", SourceLanguage::JavaScript, "export default {};", &tree, 2).unwrap();

        assert_that!(text, eq("export default {\n  greet: (name) => name,\n};"));
    }

    #[rstest]
    fn test_block_keeps_template_lines_unindented() {
        let tree = ObjectNode::from_entries([(
            "about",
            TranslationNode::Function(FunctionNode {
                params: Vec::new(),
                body: FunctionBody::BlockExpression {
                    raw_text: "return `\n# About\n\n  indented\n`;".to_string(),
                },
            }),
        )]);

        assert_that!(
            ts("export default {};", &tree),
            eq("export default {\n    about: function () {\n        return `\n# About\n\n  indented\n`;\n    },\n};")
        );
    }

    #[rstest]
    fn test_named_exports_are_spliced_per_declaration() {
        let template = "import type { TermsProps } from \"../en/terms\";\n\nexport const TermsOfUse = (props: TermsProps) => `Terms`;\n\nexport const Untouched = \"keep\";\n\nexport function Footer(year: number) {\n    return `© ${year}`;\n}\n";
        let tree = ObjectNode::from_entries([
            (
                "TermsOfUse",
                TranslationNode::Function(FunctionNode {
                    params: vec![FunctionParam::new("props", "TermsProps")],
                    body: FunctionBody::StringTemplate { value: "Conditions ${props.site}".to_string() },
                }),
            ),
            (
                "Footer",
                TranslationNode::Function(FunctionNode {
                    params: vec![FunctionParam::new("year", "number")],
                    body: FunctionBody::StringTemplate { value: "© ${year} tous droits".to_string() },
                }),
            ),
            ("NotExported", TranslationNode::string("dropped")),
        ]);

        assert_that!(
            ts(template, &tree),
            eq("import type { TermsProps } from \"../en/terms\";\n\nexport const TermsOfUse = (props: TermsProps) => `Conditions ${props.site}`;\n\nexport const Untouched = \"keep\";\n\nexport function Footer(year: number) {\n    return `© ${year} tous droits`;\n}\n")
        );
    }

    #[rstest]
    fn test_output_parses_back_to_the_tree() {
        let source = r#"export default {
    title: "Titre",
    menu: { start: "Démarrer", "quit-now": 'Quitter' },
    list: ["a", B, `c ${d}`],
    greet: (name: string) => `Salut ${name}`,
    plural: function (n: number) {
        const word = n > 1 ? "s" : "";
        return `${n} élément${word}`;
    },
};
"#;
        let tree = parse(source);

        let text = ts(source, &tree);

        assert_that!(parse(&text), eq(&tree));
    }

    #[rstest]
    fn test_invalid_template_fails() {
        let result = render("translation.ts", SourceLanguage::TypeScript, "export default {", &ObjectNode::new(), 4);

        assert!(matches!(result, Err(AssembleError::TemplateParse { .. })));
    }

    #[rstest]
    fn test_template_without_exports_fails() {
        let result = render("translation.ts", SourceLanguage::TypeScript, "const a = 1;", &ObjectNode::new(), 4);

        assert!(matches!(result, Err(AssembleError::TemplateParse { .. })));
    }

    #[rstest]
    #[case::plain("title", true)]
    #[case::dollar("$count", true)]
    #[case::kebab("kebab-key", false)]
    #[case::digit_start("1st", false)]
    #[case::space("two words", false)]
    #[case::empty("", false)]
    fn test_is_identifier(#[case] key: &str, #[case] expected: bool) {
        assert_that!(is_identifier(key), eq(expected));
    }

    #[rstest]
    fn test_splice_rejects_out_of_range_spans() {
        let result = splice("abc", &[(ByteSpan::new(2, 10), "x".to_string()), (ByteSpan::new(1, 2), String::new())]);

        assert!(matches!(result, Err(AssembleError::InvalidSpan)));
    }
}
