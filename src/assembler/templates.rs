//! Picks the script text new translations are spliced into.

use std::collections::HashMap;
use std::path::Path;

/// Used when neither an existing file nor a boilerplate is available.
pub const DEFAULT_TEMPLATE: &str = "export default {};\n";

/// File stem used to look up boilerplates: `terms.ts` → `terms`.
#[must_use]
pub fn template_key(file_name: &str) -> Option<&str> {
    Path::new(file_name).file_stem().and_then(|stem| stem.to_str())
}

/// The locale's existing text, else the boilerplate registered for the file
/// stem, else [`DEFAULT_TEMPLATE`].
#[must_use]
pub fn resolve_template<'a>(
    file_name: &str,
    existing_text: Option<&'a str>,
    templates: &'a HashMap<String, String>,
) -> &'a str {
    if let Some(text) = existing_text {
        return text;
    }

    if let Some(boilerplate) = template_key(file_name).and_then(|key| templates.get(key)) {
        tracing::debug!(file_name, "Using registered boilerplate");
        return boilerplate;
    }

    DEFAULT_TEMPLATE
}
