//! Mock translator for testing
//!
//! A deterministic, API-free provider for exercising the pipeline without API
//! keys or network access.
//!
//! # Example
//!
//! ```ignore
//! use icu_translate_mt::{IcuTranslator, MockMode, MockTranslator, build_request};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let request = build_request(&["hello".to_string()], &["fr".to_string()]);
//!     let result = mock.translate(&request).await.unwrap();
//!     assert_eq!(result[0].translations["fr"], "hello_fr");
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::request::TranslationRequest;
use crate::response::parse_translation_response;
use crate::translator::IcuTranslator;
use async_trait::async_trait;
use icu_translate::ServiceTranslation;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone, Default)]
pub enum MockMode {
    /// Append the language code: "hello" → "hello_fr"
    /// Placeholders are preserved untouched
    #[default]
    Suffix,

    /// Predefined mappings keyed by (text, language), falling back to `Suffix`
    Mappings(HashMap<(String, String), String>),

    /// Like `Suffix`, but items come back in reverse order
    Reversed,

    /// Like `Suffix`, but the listed languages are left out of every item
    Omit(Vec<String>),

    /// Return this raw model text, run through normal response validation
    Raw(String),

    /// Simulate a provider error
    Error(MtError),
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug, Default)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a MockTranslator with simulated network delay
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Number of times `translate` has been called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn translate_text(&self, text: &str, language: &str) -> String {
        if let MockMode::Mappings(map) = &self.mode
            && let Some(mapped) = map.get(&(text.to_string(), language.to_string()))
        {
            return mapped.clone();
        }
        format!("{}_{}", text, language)
    }

    fn suffix_items(
        &self,
        request: &TranslationRequest,
        omit: &[String],
    ) -> Vec<ServiceTranslation> {
        request
            .sources
            .iter()
            .map(|source| {
                let mut item = ServiceTranslation::new(source.as_str());
                for lang in request.languages.iter().filter(|l| !omit.contains(*l)) {
                    item.translations
                        .insert(lang.clone(), self.translate_text(source, lang));
                }
                item
            })
            .collect()
    }
}

#[async_trait]
impl IcuTranslator for MockTranslator {
    async fn translate(&self, request: &TranslationRequest) -> MtResult<Vec<ServiceTranslation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;

        match &self.mode {
            MockMode::Suffix | MockMode::Mappings(_) => Ok(self.suffix_items(request, &[])),
            MockMode::Reversed => {
                let mut items = self.suffix_items(request, &[]);
                items.reverse();
                Ok(items)
            }
            MockMode::Omit(languages) => Ok(self.suffix_items(request, languages)),
            MockMode::Raw(text) => parse_translation_response(text),
            MockMode::Error(err) => Err(err.clone()),
        }
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::build_request;

    fn request() -> TranslationRequest {
        build_request(
            &["Hello {name}".to_string(), "Bye".to_string()],
            &["fr".to_string(), "es".to_string()],
        )
    }

    #[tokio::test]
    async fn test_suffix_mode() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let items = mock.translate(&request()).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].original, "Hello {name}");
        assert_eq!(items[0].translations["fr"], "Hello {name}_fr");
        assert_eq!(items[1].translations["es"], "Bye_es");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_mappings_mode() {
        let mut map = HashMap::new();
        map.insert(("Bye".to_string(), "fr".to_string()), "Au revoir".to_string());
        let mock = MockTranslator::new(MockMode::Mappings(map));

        let items = mock.translate(&request()).await.unwrap();
        assert_eq!(items[1].translations["fr"], "Au revoir");
        assert_eq!(items[1].translations["es"], "Bye_es");
    }

    #[tokio::test]
    async fn test_reversed_mode() {
        let mock = MockTranslator::new(MockMode::Reversed);
        let items = mock.translate(&request()).await.unwrap();
        assert_eq!(items[0].original, "Bye");
        assert_eq!(items[1].original, "Hello {name}");
    }

    #[tokio::test]
    async fn test_omit_mode() {
        let mock = MockTranslator::new(MockMode::Omit(vec!["es".to_string()]));
        let items = mock.translate(&request()).await.unwrap();
        assert!(items.iter().all(|i| i.translations.len() == 1));
        assert!(items.iter().all(|i| i.translations.contains_key("fr")));
    }

    #[tokio::test]
    async fn test_raw_mode_validates() {
        let mock = MockTranslator::new(MockMode::Raw("oops".to_string()));
        assert!(matches!(
            mock.translate(&request()).await,
            Err(MtError::ResponseParse(_))
        ));
    }

    #[tokio::test]
    async fn test_error_mode() {
        let mock = MockTranslator::new(MockMode::Error(MtError::TranslationError(
            "boom".to_string(),
        )));
        assert_eq!(
            mock.translate(&request()).await,
            Err(MtError::TranslationError("boom".to_string()))
        );
    }

    #[tokio::test]
    async fn test_with_delay() {
        let mock = MockTranslator::with_delay(MockMode::Suffix, 5);
        let start = std::time::Instant::now();
        mock.translate(&request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
