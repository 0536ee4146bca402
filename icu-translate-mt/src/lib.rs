//! Placeholder-preserving machine translation for ICU messages
//!
//! This crate sends batches of ICU Message Format strings to a generative
//! translation API with a structured output schema, validates what comes back,
//! and joins it onto the parsed input from `icu-translate`.
//!
//! # Workflow Example
//!
//! ```ignore
//! use icu_translate::{Arrangement, InputFormat, resolve_languages};
//! use icu_translate_mt::{GeminiConfig, GeminiProvider, translate_input};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Configure the provider (credentials are injected, not read inside)
//!     let provider = GeminiProvider::new(GeminiConfig::from_env()?)?;
//!
//!     // 2. Pick the target languages
//!     let languages = resolve_languages(InputFormat::Arb, &Arrangement::preset("code-default"));
//!
//!     // 3. Parse, translate and stitch in one call
//!     let input = r#"{"greeting": "Hello, {name}!"}"#;
//!     let results = translate_input(&provider, input, InputFormat::Arb, &languages).await?;
//!
//!     for result in results {
//!         println!("{:?} {} {:?}", result.id, result.original, result.translations);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod translator;

// Integration tests (only available during testing)
#[cfg(test)]
mod integration_tests;

// Re-export main types for convenient access
pub use config::GeminiConfig;
pub use error::{MtError, MtResult};
pub use gemini::GeminiProvider;
pub use mock::{MockMode, MockTranslator};
pub use pipeline::{distinct_sources, translate_input};
pub use request::{Schema, TranslationRequest, build_request, build_response_schema};
pub use response::parse_translation_response;
pub use translator::IcuTranslator;
