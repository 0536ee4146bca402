//! Tab-separated export of translation results
//!
//! Rows paste cleanly into spreadsheets: tabs and line breaks inside a cell are
//! replaced by a single space so they cannot break the row structure. Missing
//! translations export as empty cells.

use crate::{LanguageCode, TranslationResult};

/// Shown in place of a translation the service did not return
pub const PENDING_MARKER: &str = "...";

fn cell(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\t', '\n', '\r'], " ")
}

fn translation_cells(result: &TranslationResult, languages: &[LanguageCode]) -> Vec<String> {
    languages
        .iter()
        .map(|lang| result.get_translation(lang).map(cell).unwrap_or_default())
        .collect()
}

/// One id per line, empty lines for results without an id
pub fn ids_tsv(results: &[TranslationResult]) -> String {
    results
        .iter()
        .map(|r| cell(r.id.as_deref().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Translations only, one column per language in `languages` order
pub fn translations_tsv(results: &[TranslationResult], languages: &[LanguageCode]) -> String {
    results
        .iter()
        .map(|r| translation_cells(r, languages).join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full table: optional id column, the original, then one column per language
pub fn table_tsv(
    results: &[TranslationResult],
    languages: &[LanguageCode],
    with_ids: bool,
) -> String {
    results
        .iter()
        .map(|r| {
            let mut row = Vec::with_capacity(languages.len() + 2);
            if with_ids {
                row.push(cell(r.id.as_deref().unwrap_or_default()));
            }
            row.push(cell(&r.original));
            row.extend(translation_cells(r, languages));
            row.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
