//! js-i18n-translator
//!
//! Round-trip editing of JavaScript/TypeScript/JSON locale files: parse a
//! reference and a target locale, align them key by key, edit the target,
//! and write it back without disturbing the surrounding source.

pub mod assembler;
pub mod config;
pub mod editor;
pub mod input;
pub mod node;
pub mod syntax;
pub mod types;
pub mod workspace;

pub use assembler::{
    AssembleOptions,
    AssembleRequest,
    assemble,
};
pub use editor::{
    AlignEvent,
    align,
    merge,
    set_at_path,
};
pub use node::{
    ObjectNode,
    TranslationNode,
};
pub use syntax::{
    parse,
    parse_file,
};
