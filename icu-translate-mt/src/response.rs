//! Validation and normalization of structured translation responses

use crate::error::{MtError, MtResult};
use icu_translate::ServiceTranslation;
use serde_json::Value;

/// Parse the text generated by the service into translations
///
/// # Errors
/// - [`MtError::EmptyResponse`] when the text is empty or whitespace
/// - [`MtError::ResponseParse`] when the text is not valid JSON
/// - [`MtError::ResponseShape`] when the JSON is not an array
///
/// Individual items are normalized rather than rejected: a missing `original`
/// becomes an empty string, missing `translations` become an empty map, and
/// non-string translation values are dropped.
pub fn parse_translation_response(text: &str) -> MtResult<Vec<ServiceTranslation>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MtError::EmptyResponse);
    }

    let json: Value =
        serde_json::from_str(text).map_err(|e| MtError::ResponseParse(e.to_string()))?;

    let items = json.as_array().ok_or_else(|| {
        MtError::ResponseShape(format!("expected an array, got {}", value_kind(&json)))
    })?;

    Ok(items.iter().enumerate().map(normalize_item).collect())
}

fn normalize_item((index, item): (usize, &Value)) -> ServiceTranslation {
    let original = match item.get("original") {
        Some(Value::String(s)) => s.clone(),
        _ => {
            tracing::warn!(index, "Translation item has no string 'original'");
            String::new()
        }
    };

    let mut translation = ServiceTranslation::new(original);
    match item.get("translations") {
        Some(Value::Object(map)) => {
            for (lang, value) in map {
                match value.as_str() {
                    Some(text) => {
                        translation.translations.insert(lang.clone(), text.to_string());
                    }
                    None => {
                        tracing::warn!(index, lang = %lang, "Dropping non-string translation");
                    }
                }
            }
        }
        _ => {
            tracing::warn!(index, "Translation item has no 'translations' object");
        }
    }

    translation
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
