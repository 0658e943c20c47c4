use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::assembler::AssembleOptions;
use crate::input::SourceLanguage;
use crate::syntax::parse_exports;

/// Allowed range for `indentWidth`.
const INDENT_WIDTH_RANGE: std::ops::RangeInclusive<usize> = 1..=16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "assemblyTemplates.terms")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorSettings {
    /// Directory holding one subdirectory per locale, relative to the workspace.
    pub locales_dir: String,
    /// Locale whose files define key order and shape.
    pub reference_locale: String,
    /// File names tried in order when no file is named; matched case-insensitively.
    pub preferred_files: Vec<String>,
    /// Glob selecting locale files inside a locale directory.
    pub file_pattern: String,
    pub indent_width: usize,
    pub hide_translated: bool,
    /// Boilerplate text by file stem, used when a locale has no file yet.
    pub assembly_templates: HashMap<String, String>,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            locales_dir: "locales".to_string(),
            reference_locale: "en".to_string(),
            preferred_files: vec!["translation.ts".to_string(), "game.json".to_string()],
            file_pattern: "*.{ts,tsx,js,jsx,json}".to_string(),
            indent_width: crate::assembler::DEFAULT_INDENT_WIDTH,
            hide_translated: true,
            assembly_templates: HashMap::new(),
        }
    }
}

impl TranslatorSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Indent width out of range
    /// - Boilerplate that is not a locale module
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locales_dir.is_empty() {
            errors.push(ValidationError::new(
                "localesDir",
                "The directory cannot be empty. Example: \"locales\"",
            ));
        }

        if self.reference_locale.is_empty() {
            errors.push(ValidationError::new(
                "referenceLocale",
                "The reference locale cannot be empty. Example: \"en\"",
            ));
        }

        if self.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "filePattern",
                "The pattern cannot be empty. Example: \"*.{ts,json}\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.file_pattern) {
            errors.push(ValidationError::new(
                "filePattern",
                format!("Invalid glob pattern '{}': {e}", self.file_pattern),
            ));
        }

        if !INDENT_WIDTH_RANGE.contains(&self.indent_width) {
            errors.push(ValidationError::new(
                "indentWidth",
                format!(
                    "Must be between {} and {}, got {}",
                    INDENT_WIDTH_RANGE.start(),
                    INDENT_WIDTH_RANGE.end(),
                    self.indent_width
                ),
            ));
        }

        let mut stems: Vec<_> = self.assembly_templates.keys().collect();
        stems.sort();
        for stem in stems {
            let Some(text) = self.assembly_templates.get(stem) else {
                continue;
            };
            if let Err(e) = parse_exports(SourceLanguage::TypeScript, text) {
                errors.push(ValidationError::new(
                    format!("assemblyTemplates.{stem}"),
                    format!("The boilerplate is not a usable locale module: {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Picks the file to open when none is named: the first preferred file
    /// present in `files`, else the first file.
    #[must_use]
    pub fn default_file<'a>(&self, files: &'a [String]) -> Option<&'a String> {
        self.preferred_files
            .iter()
            .find_map(|preferred| files.iter().find(|file| file.eq_ignore_ascii_case(preferred)))
            .or_else(|| files.first())
    }

    #[must_use]
    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            indent_width: self.indent_width,
            templates: self.assembly_templates.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn deserialize_settings() {
        let json = r#"{
            "localesDir": "i18n",
            "referenceLocale": "ja",
            "indentWidth": 2,
            "assemblyTemplates": { "terms": "export const TermsOfUse = () => ``;" }
        }"#;

        let settings: TranslatorSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.locales_dir, eq("i18n"));
        assert_that!(settings.reference_locale, eq("ja"));
        assert_that!(settings.indent_width, eq(2));
        assert_that!(settings.assembly_templates.get("terms"), some(anything()));
        assert_that!(settings.preferred_files, elements_are![eq("translation.ts"), eq("game.json")]);
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: TranslatorSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings, eq(&TranslatorSettings::default()));
        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn validate_empty_locales_dir() {
        let settings = TranslatorSettings { locales_dir: String::new(), ..TranslatorSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("localesDir")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_empty_reference_locale() {
        let settings =
            TranslatorSettings { reference_locale: String::new(), ..TranslatorSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("referenceLocale"))])
        );
    }

    #[rstest]
    fn validate_invalid_file_pattern() {
        let settings =
            TranslatorSettings { file_pattern: "*.{ts,json".to_string(), ..TranslatorSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("filePattern")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern")),
                field!(ValidationError.message, contains_substring("*.{ts,json"))
            ]])
        );
    }

    #[rstest]
    #[case::zero(0)]
    #[case::too_wide(17)]
    fn validate_indent_width_out_of_range(#[case] indent_width: usize) {
        let settings = TranslatorSettings { indent_width, ..TranslatorSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("indentWidth")),
                field!(ValidationError.message, contains_substring("between 1 and 16"))
            ]])
        );
    }

    #[rstest]
    fn validate_unparseable_boilerplate() {
        let settings = TranslatorSettings {
            assembly_templates: HashMap::from([
                ("good".to_string(), "export default {};".to_string()),
                ("broken".to_string(), "export default {".to_string()),
                ("empty".to_string(), "const a = 1;".to_string()),
            ]),
            ..TranslatorSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![
                field!(ValidationError.field_path, eq("assemblyTemplates.broken")),
                field!(ValidationError.field_path, eq("assemblyTemplates.empty"))
            ])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = TranslatorSettings {
            locales_dir: String::new(),
            indent_width: 0,
            ..TranslatorSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let error_message = format!("{}", ConfigError::ValidationErrors(errors));

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. localesDir"));
        assert_that!(error_message, contains_substring("2. indentWidth"));
    }

    #[rstest]
    #[case::preferred(&["about.ts", "Translation.ts"], Some("Translation.ts"))]
    #[case::second_preference(&["about.ts", "game.json"], Some("game.json"))]
    #[case::first_file(&["about.ts", "terms.ts"], Some("about.ts"))]
    #[case::no_files(&[], None)]
    fn test_default_file(#[case] files: &[&str], #[case] expected: Option<&str>) {
        let settings = TranslatorSettings::default();
        let files: Vec<String> = files.iter().map(ToString::to_string).collect();

        assert_that!(settings.default_file(&files).map(String::as_str), eq(expected));
    }
}
