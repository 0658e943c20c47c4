use thiserror::Error;

use crate::types::SourcePosition;

/// Defines errors that may occur while reading a locale file
#[derive(Error, Debug)]
pub enum ParseError {
    /// Error when failing to set the language for the parser
    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),
    /// Error when tree-sitter returns no tree
    #[error("Failed to parse source code")]
    ParseFailed,
    /// The source contains syntax errors
    #[error("Syntax error at {0}")]
    Syntax(SourcePosition),
    /// Neither a default-exported object nor named exports were found
    #[error("No default-exported object literal or named exports found")]
    NoExports,
    /// A structured-data document that cannot be parsed
    #[error("Invalid JSON: {0}")]
    Json(String),
    /// A structured-data document whose top-level value is not an object
    #[error("Top-level value is not an object")]
    NotAnObject,
    /// The file name does not map to a supported language
    #[error("Unsupported locale file: {0}")]
    UnsupportedFile(String),
}
