//! Locale file kinds.

use std::path::Path;

/// How a locale file is written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// Re-serialized as pretty-printed JSON.
    StructuredData,
    /// Spliced into the existing script text.
    Script,
}

/// Supported locale file languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Json,
}

impl SourceLanguage {
    /// Infers the language from a file name or path extension.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name).extension().and_then(|ext| ext.to_str())?;
        match extension.to_ascii_lowercase().as_str() {
            "tsx" => Some(Self::Tsx),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "jsx" => Some(Self::Jsx),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "json" | "jsonc" => Some(Self::Json),
            _ => None,
        }
    }

    /// Grammar for script languages; JSON is not read with tree-sitter.
    #[must_use]
    pub fn tree_sitter_language(&self) -> Option<tree_sitter::Language> {
        match self {
            Self::JavaScript | Self::Jsx => Some(tree_sitter_javascript::LANGUAGE.into()),
            Self::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Self::Tsx => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
            Self::Json => None,
        }
    }

    #[must_use]
    pub const fn category(&self) -> FileCategory {
        match self {
            Self::Json => FileCategory::StructuredData,
            Self::JavaScript | Self::Jsx | Self::TypeScript | Self::Tsx => FileCategory::Script,
        }
    }

    /// Whether parameter type annotations can be written in this language.
    #[must_use]
    pub const fn supports_type_annotations(&self) -> bool {
        matches!(self, Self::TypeScript | Self::Tsx)
    }

    /// Text standing in for a locale file that does not exist yet.
    #[must_use]
    pub const fn empty_document(&self) -> &'static str {
        match self {
            Self::Json => "{}",
            Self::JavaScript | Self::Jsx | Self::TypeScript | Self::Tsx => "export default {};",
        }
    }
}
