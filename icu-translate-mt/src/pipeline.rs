//! The translate operation
//!
//! Validates user input, parses it, builds a single request, awaits the
//! provider and stitches the answer back onto the parsed entries. Every failure
//! comes back as an [`MtError`]; nothing is retried.

use crate::error::{MtError, MtResult};
use crate::request::build_request;
use crate::translator::IcuTranslator;
use icu_translate::{
    InputFormat, LanguageCode, ParsedEntry, TranslationResult, parse_input, stitch,
    validate_language_codes,
};

/// Source strings of the entries, without repeats, in first-seen order
pub fn distinct_sources(entries: &[ParsedEntry]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !sources.contains(&entry.original) {
            sources.push(entry.original.clone());
        }
    }
    sources
}

/// Translate raw pasted input into every language of `languages`
///
/// # Errors
/// - `ValidationError` when the input is blank, yields nothing to translate,
///   or the language list is empty or contains a malformed code
/// - `Format` when the input does not match `format`
/// - any provider error from [`IcuTranslator::translate`]
///
/// Validation and parsing happen before the provider is called.
pub async fn translate_input<T>(
    translator: &T,
    input: &str,
    format: InputFormat,
    languages: &[LanguageCode],
) -> MtResult<Vec<TranslationResult>>
where
    T: IcuTranslator + ?Sized,
{
    if input.trim().is_empty() {
        return Err(MtError::ValidationError(
            "Please enter at least one string to translate.".to_string(),
        ));
    }

    if languages.is_empty() {
        return Err(MtError::ValidationError(
            "Please select at least one target language.".to_string(),
        ));
    }

    if let Err(invalid) = validate_language_codes(languages) {
        return Err(MtError::ValidationError(format!(
            "Invalid language code(s): {}",
            invalid.join(", ")
        )));
    }

    let entries = parse_input(format, input)?;
    if entries.is_empty() {
        return Err(MtError::ValidationError(
            "Nothing to translate: no messages found in the input.".to_string(),
        ));
    }

    let sources = distinct_sources(&entries);
    if sources.len() < entries.len() {
        tracing::warn!(
            duplicates = entries.len() - sources.len(),
            "Duplicate source strings share one translation and the first id"
        );
    }

    let request = build_request(&sources, languages);
    tracing::debug!(
        provider = translator.provider_name(),
        strings = sources.len(),
        languages = %languages.join(","),
        "Translating"
    );

    let translations = translator.translate(&request).await?;
    let results = stitch(&entries, translations);

    for result in &results {
        let missing = result.missing_languages(languages);
        if !missing.is_empty() {
            tracing::warn!(
                original = %result.original,
                missing = %missing.join(","),
                "Translation is missing languages"
            );
        }
    }

    Ok(results)
}
