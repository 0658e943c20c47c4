//! Turns an edited translation tree back into locale file text.
//!
//! JSON targets are re-serialized in reference key order. Script targets are
//! rewritten by splicing generated literals into a template so imports,
//! comments and other surrounding text survive unchanged.

mod script;
mod structured;
mod templates;

use std::collections::HashMap;

use thiserror::Error;

pub use templates::{
    DEFAULT_TEMPLATE,
    resolve_template,
    template_key,
};

use crate::input::{
    FileCategory,
    SourceLanguage,
};
use crate::node::ObjectNode;

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

#[derive(Error, Debug)]
pub enum AssembleError {
    /// No template could be resolved for the file
    #[error("No template available for {file}")]
    NoTemplate { file: String },
    /// The template text is not a parseable locale module
    #[error("Template for {file} could not be parsed")]
    TemplateParse { file: String },
    #[error("Failed to serialize translations: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A recorded export span does not fit the template text
    #[error("Export span is out of range for the template")]
    InvalidSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOptions {
    pub indent_width: usize,
    /// Boilerplate text by file stem, for locales that have no file yet.
    pub templates: HashMap<String, String>,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self { indent_width: DEFAULT_INDENT_WIDTH, templates: HashMap::new() }
    }
}

/// What to assemble.
#[derive(Debug, Clone, Copy)]
pub struct AssembleRequest<'a> {
    /// Target file name; its extension selects the output mode.
    pub file_name: &'a str,
    pub tree: &'a ObjectNode,
    /// Key order for JSON output.
    pub reference: &'a ObjectNode,
    /// Current text of the target file, if it exists.
    pub existing_text: Option<&'a str>,
}

/// Assembles the text of `request.file_name` from `request.tree`.
///
/// # Errors
/// Returns `AssembleError` if:
/// - The file extension is not a supported locale format
/// - The template cannot be parsed as a locale module
/// - Serialization fails
pub fn assemble(request: &AssembleRequest<'_>, options: &AssembleOptions) -> Result<String, AssembleError> {
    let Some(language) = SourceLanguage::from_file_name(request.file_name) else {
        tracing::error!(file_name = request.file_name, "Unsupported locale file for assembly");
        return Err(AssembleError::NoTemplate { file: request.file_name.to_string() });
    };

    match language.category() {
        FileCategory::StructuredData => {
            structured::render(request.tree, request.reference, options.indent_width)
        }
        FileCategory::Script => {
            let template =
                resolve_template(request.file_name, request.existing_text, &options.templates);
            script::render(request.file_name, language, template, request.tree, options.indent_width)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::node::TranslationNode;

    #[fixture]
    fn tree() -> ObjectNode {
        ObjectNode::from_entries([
            ("b", TranslationNode::string("2")),
            ("a", TranslationNode::string("1")),
        ])
    }

    #[fixture]
    fn reference() -> ObjectNode {
        ObjectNode::from_entries([
            ("a", TranslationNode::string("A")),
            ("b", TranslationNode::string("B")),
        ])
    }

    #[rstest]
    fn test_json_target(tree: ObjectNode, reference: ObjectNode) {
        let request =
            AssembleRequest { file_name: "game.json", tree: &tree, reference: &reference, existing_text: None };

        let text = assemble(&request, &AssembleOptions::default()).unwrap();

        assert_that!(text, eq("{\n    \"a\": \"1\",\n    \"b\": \"2\"\n}\n"));
    }

    #[rstest]
    fn test_script_target_without_file_uses_default_template(tree: ObjectNode, reference: ObjectNode) {
        let request = AssembleRequest {
            file_name: "translation.ts",
            tree: &tree,
            reference: &reference,
            existing_text: None,
        };

        let text = assemble(&request, &AssembleOptions::default()).unwrap();

        assert_that!(text, eq("export default {\n    b: \"2\",\n    a: \"1\",\n};\n"));
    }

    #[rstest]
    fn test_script_target_uses_boilerplate(reference: ObjectNode) {
        let tree = ObjectNode::from_entries([("Title", TranslationNode::string("Conditions"))]);
        let options = AssembleOptions {
            indent_width: 2,
            templates: HashMap::from([(
                "terms".to_string(),
                "// legal\nexport const Title = \"\";\n".to_string(),
            )]),
        };
        let request =
            AssembleRequest { file_name: "terms.ts", tree: &tree, reference: &reference, existing_text: None };

        let text = assemble(&request, &options).unwrap();

        assert_that!(text, eq("// legal\nexport const Title = \"Conditions\";\n"));
    }

    #[rstest]
    fn test_unsupported_extension(tree: ObjectNode, reference: ObjectNode) {
        let request =
            AssembleRequest { file_name: "notes.txt", tree: &tree, reference: &reference, existing_text: None };

        let result = assemble(&request, &AssembleOptions::default());

        assert!(matches!(result, Err(AssembleError::NoTemplate { file }) if file == "notes.txt"));
    }

    #[rstest]
    fn test_broken_existing_text_fails(tree: ObjectNode, reference: ObjectNode) {
        let request = AssembleRequest {
            file_name: "translation.ts",
            tree: &tree,
            reference: &reference,
            existing_text: Some("export default { a: "),
        };

        let result = assemble(&request, &AssembleOptions::default());

        assert!(matches!(result, Err(AssembleError::TemplateParse { .. })));
    }
}
