//! Translation provider trait
//!
//! The [`IcuTranslator`] trait decouples the pipeline from any particular
//! backend (Gemini, mock, ...).
//!
//! # Example
//!
//! ```ignore
//! use icu_translate_mt::{GeminiConfig, GeminiProvider, IcuTranslator, build_request};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GeminiProvider::new(GeminiConfig::from_env()?)?;
//!
//!     let sources = vec!["Hello, {name}!".to_string()];
//!     let languages = vec!["fr".to_string(), "de".to_string()];
//!     let request = build_request(&sources, &languages);
//!
//!     for item in provider.translate(&request).await? {
//!         println!("{} -> {:?}", item.original, item.translations);
//!     }
//!     Ok(())
//! }
//! ```

use crate::error::MtResult;
use crate::request::TranslationRequest;
use async_trait::async_trait;
use icu_translate::ServiceTranslation;

/// Generic trait for ICU message translation providers
///
/// All methods are async to support I/O-bound operations like network requests.
#[async_trait]
pub trait IcuTranslator: Send + Sync {
    /// Translate every source string of the request into every requested language
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ServiceTranslation>)` - One item per source string, normalized;
    ///   order and completeness are whatever the provider returned
    /// * `Err(MtError)` - Configuration, transport or response failures
    async fn translate(&self, request: &TranslationRequest) -> MtResult<Vec<ServiceTranslation>>;

    /// Name of this provider, for logging
    fn provider_name(&self) -> &str;
}
