use std::path::PathBuf;

use thiserror::Error;

use crate::assembler::AssembleError;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A locale or file name that would leave the locales directory
    #[error("Invalid locale path: {0}")]
    InvalidPath(String),

    #[error("Unsupported locale file: {0}")]
    UnsupportedFile(String),

    #[error("Invalid draft: {0}")]
    Draft(#[from] serde_json::Error),

    #[error(transparent)]
    Assemble(#[from] AssembleError),
}
