//! Locale source parsing.
//!
//! [`parse`] and [`parse_file`] never fail: unparseable input degrades to an
//! empty tree so a broken or missing locale file reads as untranslated.
//! [`parse_exports`] additionally reports where the exported values sit in
//! the source, which the assembler needs to splice new text in.

mod error;
mod json;
pub mod literal;
mod typescript;

pub use error::ParseError;

use crate::input::{
    FileCategory,
    SourceLanguage,
};
use crate::node::ObjectNode;
use crate::types::ByteSpan;

/// How a script exports its translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportLayout {
    /// `export default { ... }`; `span` covers the object literal only.
    Default { span: ByteSpan },
    /// Top-level named exports in declaration order.
    Named(Vec<NamedExport>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedExportKind {
    /// `export const name = <value>`; the span covers `<value>`.
    Initializer,
    /// `export function name() {}`; the span covers the whole declaration.
    FunctionDeclaration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedExport {
    pub name: String,
    pub span: ByteSpan,
    pub kind: NamedExportKind,
}

/// Translation tree of a script together with its export layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptExports {
    pub tree: ObjectNode,
    pub layout: ExportLayout,
}

/// Parses TypeScript (a superset of the JavaScript forms used by locale
/// modules) into a translation tree.
#[must_use]
pub fn parse(text: &str) -> ObjectNode {
    parse_with(SourceLanguage::TypeScript, text)
}

/// Parses a locale file, choosing the grammar from its extension.
///
/// Unsupported extensions give an empty tree.
#[must_use]
pub fn parse_file(file_name: &str, text: &str) -> ObjectNode {
    match SourceLanguage::from_file_name(file_name) {
        Some(language) => parse_with(language, text),
        None => {
            tracing::warn!("{}", ParseError::UnsupportedFile(file_name.to_string()));
            ObjectNode::new()
        }
    }
}

fn parse_with(language: SourceLanguage, text: &str) -> ObjectNode {
    let result = match language.category() {
        FileCategory::StructuredData => json::extract_object(text),
        FileCategory::Script => parse_exports(language, text).map(|exports| exports.tree),
    };

    result.unwrap_or_else(|error| {
        tracing::debug!(?language, %error, "Treating locale source as empty");
        ObjectNode::new()
    })
}

/// Parses a script and records its export layout.
///
/// # Errors
/// Returns `ParseError` if the source has syntax errors, exports nothing
/// usable, or `language` is not a script language.
pub fn parse_exports(language: SourceLanguage, text: &str) -> Result<ScriptExports, ParseError> {
    let Some(grammar) = language.tree_sitter_language() else {
        return Err(ParseError::UnsupportedFile(format!("{language:?}")));
    };
    typescript::extract_exports(text, &grammar)
}
