//! End-to-end tests for the translation pipeline
//!
//! The mock-backed tests always run. Tests against the real API are ignored by
//! default:
//!
//! ```bash
//! export GEMINI_API_KEY=...
//! cargo test -p icu-translate-mt integration_tests -- --ignored --nocapture
//! ```

#[cfg(test)]
mod tests {
    use super::super::*;
    use icu_translate::{
        Arrangement, InputFormat, LanguageSelection, resolve_languages, table_tsv,
    };
    use std::collections::HashMap;

    fn require_provider() -> Option<GeminiProvider> {
        GeminiConfig::from_env()
            .and_then(GeminiProvider::new)
            .ok()
    }

    // ============================================================================
    // Mock-backed pipeline
    // ============================================================================

    #[tokio::test]
    async fn test_js_messages_to_table() {
        let input = r#"
export const messages = defineMessages({
  inbox: {
    id: 'app.inbox',
    defaultMessage: 'You have {count, plural, =0 {no messages} other {# messages}}',
  },
  greeting: { defaultMessage: "Hello, {name}!" },
});
"#;
        let mut mappings = HashMap::new();
        mappings.insert(
            ("Hello, {name}!".to_string(), "fr".to_string()),
            "Bonjour, {name} !".to_string(),
        );
        let mock = MockTranslator::new(MockMode::Mappings(mappings));

        let languages = resolve_languages(InputFormat::Js, &Arrangement::custom("fr, de"));
        let results = translate_input(&mock, input, InputFormat::Js, &languages)
            .await
            .unwrap();

        let table = table_tsv(&results, &languages, InputFormat::Js.has_ids());
        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("inbox\tYou have {count, plural,"));
        assert_eq!(
            rows[1],
            "greeting\tHello, {name}!\tBonjour, {name} !\tHello, {name}!_de"
        );
    }

    #[tokio::test]
    async fn test_selection_drives_columns() {
        let mut selection = LanguageSelection::new(InputFormat::Arb);
        selection.set_format(InputFormat::Text);
        let languages = selection.languages();

        let mock = MockTranslator::new(MockMode::Suffix);
        let results = translate_input(&mock, "Save\nCancel", InputFormat::Text, &languages)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.missing_languages(&languages).is_empty());
            assert!(!result.translations.contains_key("en"));
        }
    }

    #[tokio::test]
    async fn test_arb_fragment_pipeline() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let results = translate_input(
            &mock,
            r#""title": "Inbox", "@title": {}, "empty": "{count} items","#,
            InputFormat::Arb,
            &["es".to_string()],
        )
        .await
        .unwrap();

        let ids: Vec<_> = results.iter().filter_map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec!["title", "empty"]);
        assert_eq!(results[1].get_translation("es"), Some("{count} items_es"));
    }

    // ============================================================================
    // Real API
    // ============================================================================

    #[tokio::test]
    #[ignore]
    async fn test_e2e_plural_message() {
        let Some(provider) = require_provider() else {
            eprintln!("⚠️  Skipping: GEMINI_API_KEY not set");
            return;
        };

        let input = r#"{
            "unread": "You have {count, plural, =0{no new messages} =1{1 new message} other{{count} new messages}}.",
            "hello": "Hello, {name}!"
        }"#;
        let languages = vec!["fr".to_string(), "de".to_string(), "es".to_string()];

        let results = translate_input(&provider, input, InputFormat::Arb, &languages)
            .await
            .expect("translation succeeds");

        println!("{}", table_tsv(&results, &languages, true));

        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.id.is_some(), "unmatched original: {}", result.original);
            for lang in &languages {
                let text = result.get_translation(lang).unwrap_or_default();
                assert!(text.contains('{'), "{} lost placeholders: {}", lang, text);
            }
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_e2e_code_default_arrangement() {
        let Some(provider) = require_provider() else {
            eprintln!("⚠️  Skipping: GEMINI_API_KEY not set");
            return;
        };

        let languages = resolve_languages(InputFormat::Js, &Arrangement::preset("code-default"));
        let results = translate_input(
            &provider,
            "save: { defaultMessage: 'Save {count} files' }",
            InputFormat::Js,
            &languages,
        )
        .await
        .expect("translation succeeds");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_deref(), Some("save"));
        println!(
            "missing: {:?}",
            results[0].missing_languages(&languages)
        );
    }
}
