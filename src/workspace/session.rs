//! One file being translated from a reference locale into a target locale.

use super::{
    DraftStore,
    FileSource,
    WorkspaceError,
    persist_draft,
};
use crate::assembler::{
    AssembleOptions,
    AssembleRequest,
    assemble,
};
use crate::editor::{
    AlignEvent,
    align,
    merge,
    set_at_path,
};
use crate::input::SourceLanguage;
use crate::node::{
    ObjectNode,
    TranslationNode,
};
use crate::syntax::parse_file;

/// Which file to open, and between which locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub file: String,
    pub reference_locale: String,
    /// `None` starts from an empty tree that is never saved as a draft.
    pub target_locale: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TranslationSession {
    request: SessionRequest,
    reference: ObjectNode,
    edit: ObjectNode,
    /// Current text of the target file, used as the assembly template.
    existing_text: Option<String>,
}

impl TranslationSession {
    /// Reads and parses both locales, then folds in the target's draft.
    ///
    /// Missing files read as an empty export.
    ///
    /// # Errors
    /// Returns `WorkspaceError` if the file kind is unsupported or a file
    /// cannot be read.
    pub async fn open<F, D>(source: &F, drafts: &D, request: SessionRequest) -> Result<Self, WorkspaceError>
    where
        F: FileSource,
        D: DraftStore + ?Sized,
    {
        let language = SourceLanguage::from_file_name(&request.file)
            .ok_or_else(|| WorkspaceError::UnsupportedFile(request.file.clone()))?;

        let reference_text = source.read_locale_file(&request.reference_locale, &request.file);
        let target_text = async {
            match &request.target_locale {
                Some(locale) => source.read_locale_file(locale, &request.file).await,
                None => Ok(None),
            }
        };
        let (reference_text, target_text) = futures::join!(reference_text, target_text);
        let (reference_text, target_text) = (reference_text?, target_text?);

        let reference = parse_file(
            &request.file,
            reference_text.as_deref().unwrap_or_else(|| language.empty_document()),
        );

        let edit = match &request.target_locale {
            Some(locale) => {
                let fresh = parse_file(
                    &request.file,
                    target_text.as_deref().unwrap_or_else(|| language.empty_document()),
                );
                match drafts.load_draft(locale, &request.file) {
                    Some(draft) => {
                        tracing::info!(locale, file = %request.file, "Restoring draft");
                        merge(&fresh, &draft)
                    }
                    None => fresh,
                }
            }
            None => ObjectNode::new(),
        };

        tracing::debug!(
            file = %request.file,
            reference_keys = reference.len(),
            edit_keys = edit.len(),
            "Opened translation session"
        );

        Ok(Self { request, reference, edit, existing_text: target_text })
    }

    #[must_use]
    pub const fn request(&self) -> &SessionRequest {
        &self.request
    }

    #[must_use]
    pub const fn reference(&self) -> &ObjectNode {
        &self.reference
    }

    #[must_use]
    pub const fn edit(&self) -> &ObjectNode {
        &self.edit
    }

    #[must_use]
    pub fn events(&self, hide_translated: bool) -> Vec<AlignEvent> {
        align(&self.reference, &self.edit, hide_translated)
    }

    /// Sets the node at `path` and persists the result as the target's draft.
    pub fn set<S, D>(&mut self, path: &[S], node: Option<TranslationNode>, drafts: &mut D)
    where
        S: AsRef<str>,
        D: DraftStore + ?Sized,
    {
        self.edit = set_at_path(&self.edit, path, node);
        if let Some(locale) = &self.request.target_locale {
            persist_draft(drafts, &self.edit, locale, &self.request.file);
        }
    }

    /// Assembles the target file from the edit tree.
    ///
    /// # Errors
    /// Returns `WorkspaceError::Assemble` if no usable template exists.
    pub fn export(&self, options: &AssembleOptions) -> Result<String, WorkspaceError> {
        let request = AssembleRequest {
            file_name: &self.request.file,
            tree: &self.edit,
            reference: &self.reference,
            existing_text: self.existing_text.as_deref(),
        };
        assemble(&request, options).map_err(|error| {
            tracing::error!(file = %self.request.file, %error, "Assembly failed");
            WorkspaceError::from(error)
        })
    }
}
