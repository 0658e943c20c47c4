//! Where locale files come from.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{
    Component,
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use super::WorkspaceError;
use crate::config::ConfigManager;

/// Read access to locale files, addressed by locale and file name.
pub trait FileSource {
    /// Text of `file` in `locale`, or `None` when it does not exist.
    fn read_locale_file(
        &self,
        locale: &str,
        file: &str,
    ) -> impl Future<Output = Result<Option<String>, WorkspaceError>> + Send;

    /// Locale names, sorted.
    fn list_locales(&self) -> impl Future<Output = Result<Vec<String>, WorkspaceError>> + Send;

    /// File names of `locale` relative to its directory, sorted.
    fn list_files(
        &self,
        locale: &str,
    ) -> impl Future<Output = Result<Vec<String>, WorkspaceError>> + Send;
}

/// Reads `<locales_root>/<locale>/<file>` from disk.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    locales_root: PathBuf,
    file_set: GlobSet,
}

impl LocalFileSource {
    /// # Errors
    /// Returns `WorkspaceError::InvalidPattern` if `file_pattern` is not a valid glob.
    pub fn new(locales_root: PathBuf, file_pattern: &str) -> Result<Self, WorkspaceError> {
        let glob = Glob::new(file_pattern).map_err(|source| WorkspaceError::InvalidPattern {
            pattern: file_pattern.to_string(),
            source,
        })?;
        let mut builder = GlobSetBuilder::new();
        builder.add(glob);
        let file_set = builder.build().map_err(|source| WorkspaceError::InvalidPattern {
            pattern: file_pattern.to_string(),
            source,
        })?;

        Ok(Self { locales_root, file_set })
    }

    /// # Errors
    /// Returns `WorkspaceError::InvalidPattern` if the configured pattern is invalid.
    pub fn from_config(config_manager: &ConfigManager) -> Result<Self, WorkspaceError> {
        Self::new(config_manager.locales_root(), &config_manager.get_settings().file_pattern)
    }

    #[must_use]
    pub fn locales_root(&self) -> &Path {
        &self.locales_root
    }

    /// Joins `parts` under the locales root, refusing anything but plain names.
    fn locale_path(&self, parts: &[&str]) -> Result<PathBuf, WorkspaceError> {
        let mut path = self.locales_root.clone();
        for part in parts {
            let relative = Path::new(part);
            let is_plain = relative.components().count() > 0
                && relative.components().all(|component| matches!(component, Component::Normal(_)));
            if !is_plain {
                return Err(WorkspaceError::InvalidPath((*part).to_string()));
            }
            path.push(relative);
        }
        Ok(path)
    }
}

impl FileSource for LocalFileSource {
    async fn read_locale_file(&self, locale: &str, file: &str) -> Result<Option<String>, WorkspaceError> {
        let path = self.locale_path(&[locale, file])?;

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Locale file not found");
                Ok(None)
            }
            Err(source) => Err(WorkspaceError::Io { path, source }),
        }
    }

    async fn list_locales(&self) -> Result<Vec<String>, WorkspaceError> {
        let mut entries = match tokio::fs::read_dir(&self.locales_root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %self.locales_root.display(), "Locales directory not found");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(WorkspaceError::Io { path: self.locales_root.clone(), source });
            }
        };

        let mut locales = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => {
                    return Err(WorkspaceError::Io { path: self.locales_root.clone(), source });
                }
            };
            let is_dir = entry.file_type().await.is_ok_and(|file_type| file_type.is_dir());
            if !is_dir {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                locales.push(name.to_string());
            }
        }

        locales.sort();
        Ok(locales)
    }

    async fn list_files(&self, locale: &str) -> Result<Vec<String>, WorkspaceError> {
        let locale_dir = self.locale_path(&[locale])?;
        let mut files = Vec::new();

        for result in WalkBuilder::new(&locale_dir)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Ok(relative_path) = entry.path().strip_prefix(&locale_dir) else {
                continue;
            };
            if !self.file_set.is_match(relative_path) {
                continue;
            }

            let name = relative_path
                .components()
                .filter_map(|component| component.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/");
            files.push(name);
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn locales() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("en/legal")).unwrap();
        fs::create_dir_all(root.join("fr")).unwrap();
        fs::write(root.join("en/translation.ts"), "export default { a: \"A\" };").unwrap();
        fs::write(root.join("en/game.json"), "{}").unwrap();
        fs::write(root.join("en/legal/terms.ts"), "export const Terms = \"T\";").unwrap();
        fs::write(root.join("en/notes.md"), "# notes").unwrap();
        fs::write(root.join("README.md"), "not a locale").unwrap();
        temp_dir
    }

    fn source(temp_dir: &TempDir) -> LocalFileSource {
        LocalFileSource::new(temp_dir.path().to_path_buf(), "*.{ts,tsx,js,jsx,json}").unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_locales(locales: TempDir) {
        let result = source(&locales).list_locales().await.unwrap();

        assert_that!(result, elements_are![eq("en"), eq("fr")]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_files_filters_by_pattern(locales: TempDir) {
        let result = source(&locales).list_files("en").await.unwrap();

        assert_that!(result, elements_are![eq("game.json"), eq("legal/terms.ts"), eq("translation.ts")]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_read_locale_file(locales: TempDir) {
        let source = source(&locales);

        assert_that!(
            source.read_locale_file("en", "translation.ts").await.unwrap(),
            some(eq("export default { a: \"A\" };"))
        );
        assert_that!(source.read_locale_file("fr", "translation.ts").await.unwrap(), none());
    }

    #[rstest]
    #[case::parent("..")]
    #[case::nested_parent("en/../../etc")]
    #[case::empty("")]
    #[tokio::test]
    async fn test_read_rejects_escaping_paths(locales: TempDir, #[case] file: &str) {
        let result = source(&locales).read_locale_file("en", file).await;

        assert!(matches!(result, Err(WorkspaceError::InvalidPath(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_locales_dir_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let source = LocalFileSource::new(temp_dir.path().join("missing"), "*.ts").unwrap();

        assert_that!(source.list_locales().await.unwrap(), is_empty());
    }

    #[rstest]
    fn test_invalid_pattern() {
        let result = LocalFileSource::new(PathBuf::from("locales"), "*.{ts");

        assert!(matches!(result, Err(WorkspaceError::InvalidPattern { .. })));
    }
}
