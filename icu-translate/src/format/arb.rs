use super::{FormatError, InputFormat};
use crate::ParsedEntry;
use serde_json::Value;

/// Parse ARB content into entries
///
/// The input should be a JSON object:
/// ```json
/// {
///     "@@locale": "en",
///     "greeting": "Hello, {name}!",
///     "@greeting": { "placeholders": { "name": {} } }
/// }
/// ```
///
/// Keys starting with `@` are metadata and are skipped. Entries keep the key
/// order of the input.
///
/// Pasting a fragment copied out of a larger file, such as
/// `"a": "b", "c": "d",`, is also accepted: when the trimmed input does not
/// start with `{` but contains a colon, a single trailing comma is removed and
/// the fragment is wrapped in braces.
///
/// # Errors
/// - Invalid JSON (after the fragment recovery)
/// - Root value that is not an object
pub fn parse_arb(input: &str) -> Result<Vec<ParsedEntry>, FormatError> {
    let source = recover_fragment(input);

    let json: Value = serde_json::from_str(&source)
        .map_err(|e| FormatError::new(InputFormat::Arb, format!("Failed to parse JSON: {}", e)))?;

    let obj = json
        .as_object()
        .ok_or_else(|| FormatError::new(InputFormat::Arb, "root must be an object"))?;

    let mut entries = Vec::with_capacity(obj.len());
    for (key, value) in obj {
        if key.starts_with('@') {
            continue;
        }

        match value.as_str() {
            Some(message) if !message.trim().is_empty() => {
                entries.push(ParsedEntry::with_id(key.as_str(), message));
            }
            Some(_) => {
                tracing::debug!(key = %key, "Skipping empty ARB message");
            }
            None => {
                tracing::warn!(key = %key, "ARB message is not a string, skipping");
            }
        }
    }

    Ok(entries)
}

/// Wrap a bare `"key": "value",` fragment in braces so it parses as an object
fn recover_fragment(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with('{') || !trimmed.contains(':') {
        return trimmed.to_string();
    }

    let body = trimmed.strip_suffix(',').unwrap_or(trimmed);
    tracing::debug!("Recovering ARB fragment without enclosing braces");
    format!("{{{}}}", body)
}
