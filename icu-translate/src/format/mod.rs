//! Input format parsers
//!
//! Each parser converts raw pasted text into an ordered list of
//! [`ParsedEntry`] values. ARB and JS/TS parsers fail with a [`FormatError`]
//! naming the expected shape; the plain-text parser never fails.

pub mod arb;
pub mod js;
pub mod text;

use crate::ParsedEntry;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use arb::parse_arb;
pub use js::parse_js_messages;
pub use text::parse_text;

/// The shape of pasted input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Flutter Application Resource Bundle (JSON keyed by message id)
    Arb,
    /// JS/TS message descriptors (`key: { defaultMessage: '...' }`)
    #[serde(alias = "ts")]
    Js,
    /// One message per line
    #[serde(alias = "txt")]
    Text,
}

impl InputFormat {
    pub const ALL: [InputFormat; 3] = [InputFormat::Arb, InputFormat::Js, InputFormat::Text];

    /// Whether parsed entries carry message identifiers
    pub fn has_ids(self) -> bool {
        matches!(self, InputFormat::Arb | InputFormat::Js)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Arb => "arb",
            InputFormat::Js => "js",
            InputFormat::Text => "text",
        }
    }

    /// Human readable description of the shape this format expects
    pub fn expected_shape(self) -> &'static str {
        match self {
            InputFormat::Arb => "a JSON object mapping message keys to strings",
            InputFormat::Js => "message objects like `key: { defaultMessage: '...' }`",
            InputFormat::Text => "one message per line",
        }
    }

    fn label(self) -> &'static str {
        match self {
            InputFormat::Arb => "ARB",
            InputFormat::Js => "JS/TS",
            InputFormat::Text => "plain text",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arb" | "json" => Ok(InputFormat::Arb),
            "js" | "ts" => Ok(InputFormat::Js),
            "text" | "txt" => Ok(InputFormat::Text),
            other => Err(format!(
                "Unknown input format '{}': expected one of arb, js, text",
                other
            )),
        }
    }
}

/// Input did not match the shape expected by the selected format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub format: InputFormat,
    pub message: String,
}

impl FormatError {
    pub fn new(format: InputFormat, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid {} input, expected {}: {}",
            self.format.label(),
            self.format.expected_shape(),
            self.message
        )
    }
}

impl std::error::Error for FormatError {}

/// Parse raw input according to the selected format
pub fn parse_input(format: InputFormat, input: &str) -> Result<Vec<ParsedEntry>, FormatError> {
    let entries = match format {
        InputFormat::Arb => parse_arb(input)?,
        InputFormat::Js => parse_js_messages(input)?,
        InputFormat::Text => parse_text(input),
    };
    tracing::debug!(format = %format, count = entries.len(), "Parsed input");
    Ok(entries)
}
