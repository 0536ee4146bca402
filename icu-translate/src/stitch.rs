use crate::{ParsedEntry, ServiceTranslation, TranslationResult};

/// Join service output back onto the parsed entries
///
/// Results keep the order in which the service returned them. Each result gets
/// the `id` of the first entry whose `original` is exactly equal to the
/// returned `original`; results with no matching entry have no `id`.
///
/// Matching is by content, so two entries with the same text but different ids
/// both resolve to the first id.
pub fn stitch(
    entries: &[ParsedEntry],
    translations: Vec<ServiceTranslation>,
) -> Vec<TranslationResult> {
    translations
        .into_iter()
        .map(|item| {
            let matched = entries.iter().find(|entry| entry.original == item.original);
            if matched.is_none() {
                tracing::warn!(
                    original = %item.original,
                    "Translation does not match any source string"
                );
            }

            TranslationResult {
                id: matched.and_then(|entry| entry.id.clone()),
                original: item.original,
                translations: item.translations,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_content_not_order() {
        let entries = vec![
            ParsedEntry::with_id("a", "Hi"),
            ParsedEntry::with_id("b", "Bye"),
        ];
        let output = vec![
            ServiceTranslation::new("Bye").with_translation("fr", "Au revoir"),
            ServiceTranslation::new("Hi").with_translation("fr", "Salut"),
        ];

        let results = stitch(&entries, output);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].original, "Bye");
        assert_eq!(results[0].id.as_deref(), Some("b"));
        assert_eq!(results[0].get_translation("fr"), Some("Au revoir"));
        assert_eq!(results[1].original, "Hi");
        assert_eq!(results[1].id.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_output_is_empty_result() {
        let entries = vec![ParsedEntry::with_id("a", "Hi")];
        assert!(stitch(&entries, Vec::new()).is_empty());
    }

    #[test]
    fn test_duplicate_originals_first_match_wins() {
        let entries = vec![
            ParsedEntry::with_id("first", "OK"),
            ParsedEntry::with_id("second", "OK"),
        ];
        let results = stitch(&entries, vec![ServiceTranslation::new("OK")]);
        assert_eq!(results[0].id.as_deref(), Some("first"));
    }

    #[test]
    fn test_unmatched_original_has_no_id() {
        let entries = vec![ParsedEntry::with_id("a", "Hi")];
        let results = stitch(&entries, vec![ServiceTranslation::new("Hi ")]);
        assert_eq!(results[0].id, None);
        assert_eq!(results[0].original, "Hi ");
    }

    #[test]
    fn test_plain_text_entries_have_no_id() {
        let entries = vec![ParsedEntry::new("Hello")];
        let results = stitch(
            &entries,
            vec![ServiceTranslation::new("Hello").with_translation("es", "Hola")],
        );
        assert_eq!(results[0].id, None);
        assert_eq!(results[0].get_translation("es"), Some("Hola"));
    }
}
