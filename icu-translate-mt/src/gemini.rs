//! Gemini API provider
//!
//! Sends the prompt together with a structured output schema to the
//! `generateContent` endpoint and validates the JSON array the model returns.
//!
//! # Authentication
//!
//! The API key comes from an injected [`GeminiConfig`]; load it with
//! [`GeminiConfig::from_env`] at the edge of the program. Obtain a key from
//! https://aistudio.google.com/
//!
//! # Example
//!
//! ```ignore
//! use icu_translate_mt::{GeminiConfig, GeminiProvider, IcuTranslator, build_request};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GeminiProvider::new(GeminiConfig::from_env()?)?;
//!     let request = build_request(&["Hello".to_string()], &["fr".to_string()]);
//!     let results = provider.translate(&request).await?;
//!     println!("{:?}", results);
//!     Ok(())
//! }
//! ```

use crate::config::GeminiConfig;
use crate::error::{MtError, MtResult};
use crate::request::TranslationRequest;
use crate::response::parse_translation_response;
use crate::translator::IcuTranslator;
use async_trait::async_trait;
use icu_translate::ServiceTranslation;
use reqwest::StatusCode;
use serde_json::{Value, json};

/// Gemini `generateContent` provider
///
/// A single request per call: no chunking, no retry and no timeout.
#[derive(Clone)]
pub struct GeminiProvider {
    config: GeminiConfig,
    /// HTTP client for async requests
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a provider from explicit configuration
    ///
    /// # Errors
    ///
    /// * `MtError::ConfigError` - If the API key is empty
    /// * `MtError::NetworkError` - If the HTTP client cannot be created
    pub fn new(config: GeminiConfig) -> MtResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Request body for `generateContent`
    fn request_body(request: &TranslationRequest) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.schema.to_json()
            }
        })
    }
}

/// Map a failing HTTP status to an error carrying the status and body
///
/// Rejected credentials are a configuration problem, everything else is a
/// translation failure.
fn status_error(status: StatusCode, body: &str) -> MtError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            MtError::ConfigError(format!("API rejected the credentials ({}): {}", status, body))
        }
        _ => MtError::TranslationError(format!("API error ({}): {}", status, body)),
    }
}

fn parse_envelope(body: &str) -> MtResult<Value> {
    serde_json::from_str(body)
        .map_err(|e| MtError::TranslationError(format!("Failed to parse API response: {}", e)))
}

/// Concatenate the text parts of the first candidate
///
/// A response without candidates is empty unless the prompt was blocked, in
/// which case the block reason is reported.
fn extract_generated_text(envelope: &Value) -> MtResult<String> {
    let Some(candidate) = envelope["candidates"].as_array().and_then(|c| c.first()) else {
        if let Some(reason) = envelope["promptFeedback"]["blockReason"].as_str() {
            return Err(MtError::TranslationError(format!(
                "Request was blocked by the API: {}",
                reason
            )));
        }
        return Err(MtError::EmptyResponse);
    };

    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(reason) = candidate["finishReason"].as_str() {
            tracing::warn!(finish_reason = reason, "Candidate finished without text");
        }
        return Err(MtError::EmptyResponse);
    }

    Ok(text)
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"***")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

#[async_trait]
impl IcuTranslator for GeminiProvider {
    async fn translate(&self, request: &TranslationRequest) -> MtResult<Vec<ServiceTranslation>> {
        let url = self.config.endpoint();
        let body = Self::request_body(request);

        tracing::info!(
            model = %self.config.model,
            strings = request.sources.len(),
            languages = request.languages.len(),
            "Sending translation request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        // Read as text first so error bodies are not lost
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Translation API returned an error");
            return Err(status_error(status, &text));
        }

        let envelope = parse_envelope(&text)?;
        let generated = extract_generated_text(&envelope)?;
        let items = parse_translation_response(&generated)?;

        tracing::debug!(items = items.len(), "Received translations");
        Ok(items)
    }

    fn provider_name(&self) -> &str {
        "Gemini"
    }
}
