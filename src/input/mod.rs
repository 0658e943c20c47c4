//! Input file kinds.
mod language;

pub use language::{
    FileCategory,
    SourceLanguage,
};
