//! Core building blocks for translating ICU messages
//!
//! This crate turns pasted localization strings into a normalized list of
//! entries, works out which target languages to translate into, and joins the
//! translations that come back onto the original message identifiers.
//!
//! # Workflow
//!
//! ```ignore
//! use icu_translate::{Arrangement, InputFormat, parse_input, resolve_languages, stitch};
//!
//! let entries = parse_input(InputFormat::Arb, r#"{"greeting": "Hello, {name}!"}"#)?;
//! let languages = resolve_languages(InputFormat::Arb, &Arrangement::preset("code-default"));
//!
//! // ... translate the entries with a provider from icu-translate-mt ...
//!
//! let results = stitch(&entries, service_translations);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod export;
pub mod format;
pub mod languages;
pub mod stitch;

pub use export::{PENDING_MARKER, ids_tsv, table_tsv, translations_tsv};
pub use format::{FormatError, InputFormat, parse_input};
pub use languages::{
    Arrangement, LanguageCode, LanguageSelection, Preset, presets_for, resolve_languages,
    validate_language_codes,
};
pub use stitch::stitch;

/// A single source string extracted from pasted input
///
/// `id` is only present for formats that carry message identifiers (ARB and
/// JS/TS). `original` is the literal source text, placeholders included, and is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub original: String,
}

impl ParsedEntry {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            id: None,
            original: original.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            original: original.into(),
        }
    }
}

/// One translated item as returned by a translation service, after normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTranslation {
    pub original: String,
    pub translations: HashMap<LanguageCode, String>,
}

impl ServiceTranslation {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translations: HashMap::new(),
        }
    }

    pub fn with_translation(mut self, language: &str, text: &str) -> Self {
        self.translations
            .insert(language.to_owned(), text.to_owned());
        self
    }
}

/// A translated message joined back to its identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub original: String,
    pub translations: HashMap<LanguageCode, String>,
}

impl TranslationResult {
    pub fn get_translation(&self, language: &str) -> Option<&str> {
        self.translations.get(language).map(String::as_str)
    }

    /// Translation for display, falling back to [`PENDING_MARKER`] when the
    /// service did not return this language
    pub fn display_translation(&self, language: &str) -> &str {
        self.get_translation(language).unwrap_or(PENDING_MARKER)
    }

    /// Requested languages that have no translation in this result
    pub fn missing_languages<'a>(&self, languages: &'a [LanguageCode]) -> Vec<&'a str> {
        languages
            .iter()
            .filter(|lang| !self.translations.contains_key(lang.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(translations: &[(&str, &str)]) -> TranslationResult {
        TranslationResult {
            id: Some("greeting".to_string()),
            original: "Hello".to_string(),
            translations: translations
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_display_translation_pending() {
        let result = result_with(&[("fr", "Bonjour")]);
        assert_eq!(result.display_translation("fr"), "Bonjour");
        assert_eq!(result.display_translation("es"), PENDING_MARKER);
    }

    #[test]
    fn test_missing_languages() {
        let result = result_with(&[("fr", "Bonjour")]);
        let languages = vec!["fr".to_string(), "es".to_string(), "de".to_string()];
        assert_eq!(result.missing_languages(&languages), vec!["es", "de"]);
    }

    #[test]
    fn test_entry_serialization_skips_missing_id() {
        let json = serde_json::to_string(&ParsedEntry::new("Hi")).unwrap();
        assert_eq!(json, r#"{"original":"Hi"}"#);

        let json = serde_json::to_string(&ParsedEntry::with_id("a", "Hi")).unwrap();
        assert_eq!(json, r#"{"id":"a","original":"Hi"}"#);
    }
}
