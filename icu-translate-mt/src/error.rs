use icu_translate::FormatError;

/// Error types for the translation pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Missing or unusable credentials/configuration
    ConfigError(String),
    /// User-level precondition failed before any external call
    ValidationError(String),
    /// Input did not match the selected format
    Format(FormatError),
    /// The translation service returned nothing
    EmptyResponse,
    /// The translation service returned text that is not valid JSON
    ResponseParse(String),
    /// The response parsed but is not an array of translations
    ResponseShape(String),
    /// Transport failure talking to the service
    NetworkError(String),
    /// The service answered with an error status or an unusable envelope
    TranslationError(String),
}

impl MtError {
    /// Single human-readable sentence for display to the user
    pub fn user_message(&self) -> String {
        match self {
            MtError::ValidationError(msg) => msg.clone(),
            MtError::Format(err) => err.to_string(),
            MtError::ConfigError(msg) => format!("Translation is not configured: {}", msg),
            MtError::EmptyResponse => {
                "Translation failed: received an empty response from the API.".to_string()
            }
            MtError::ResponseParse(_) => "Translation failed: failed to parse the translation \
                response from the API. The format might be invalid."
                .to_string(),
            MtError::ResponseShape(_) => {
                "Translation failed: API response is not in the expected array format.".to_string()
            }
            MtError::NetworkError(msg) | MtError::TranslationError(msg) => {
                format!("Translation failed: {}", msg)
            }
        }
    }
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MtError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            MtError::Format(err) => write!(f, "{}", err),
            MtError::EmptyResponse => write!(f, "Empty response from translation service"),
            MtError::ResponseParse(msg) => write!(f, "Response parse error: {}", msg),
            MtError::ResponseShape(msg) => write!(f, "Unexpected response shape: {}", msg),
            MtError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MtError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
        }
    }
}

impl std::error::Error for MtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MtError::Format(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormatError> for MtError {
    fn from(err: FormatError) -> Self {
        MtError::Format(err)
    }
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::NetworkError(err.to_string())
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
