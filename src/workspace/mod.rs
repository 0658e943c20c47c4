//! Collaborators around the editing core: where locale files and drafts
//! live, and a session tying them to parse, merge, align, edit and assemble.

mod drafts;
mod error;
mod session;
mod source;

pub use drafts::{
    DraftStore,
    MemoryDraftStore,
    decode_draft,
    encode_draft,
    persist_draft,
};
pub use error::WorkspaceError;
pub use session::{
    SessionRequest,
    TranslationSession,
};
pub use source::{
    FileSource,
    LocalFileSource,
};
