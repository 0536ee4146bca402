//! Target language sets
//!
//! A language set is chosen through an [`Arrangement`]: either one of the
//! named presets offered for the current input format, or a custom
//! comma-separated list. Preset availability depends on the format, so the
//! selection is re-validated whenever the format changes.

use crate::format::InputFormat;
use icu_locale::Locale;
use serde::{Deserialize, Serialize};

/// Short language code such as `fr` or `zh-CN`
pub type LanguageCode = String;

/// Target languages for plain text input, where English is the source
pub const TEXT_TARGET_LANGUAGES: &[&str] = &[
    "fr", // French
    "es", // Spanish
    "pt", // Portuguese
    "de", // German
    "ru", // Russian
    "it", // Italian
    "uk", // Ukrainian
    "ro", // Romanian
    "cs", // Czech
    "pl", // Polish
    "nl", // Dutch
    "lt", // Lithuanian
    "et", // Estonian
    "lv", // Latvian
    "sk", // Slovak
    "hu", // Hungarian
    "bg", // Bulgarian
    "th", // Thai
    "vi", // Vietnamese
];

/// Target languages for ARB and JS/TS input, where the resource file also
/// needs its own `en` entry
pub const CODE_TARGET_LANGUAGES: &[&str] = &[
    "en", "fr", "es", "pt", "de", "ru", "it", "uk", "ro", "cs", "pl", "nl", "lt", "et", "lv",
    "sk", "hu", "bg", "th", "vi",
];

/// A named language set offered for some input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub label: &'static str,
    formats: &'static [InputFormat],
    base: &'static [&'static str],
    sorted: bool,
}

impl Preset {
    pub fn supports(&self, format: InputFormat) -> bool {
        self.formats.contains(&format)
    }

    /// Languages of this preset for the given format
    ///
    /// Presets that apply to every format (like `alphabetical`) start from the
    /// format's default list.
    pub fn languages(&self, format: InputFormat) -> Vec<LanguageCode> {
        let base = if self.base.is_empty() {
            default_languages(format)
        } else {
            self.base
        };
        let mut languages: Vec<LanguageCode> = base.iter().map(|l| l.to_string()).collect();
        if self.sorted {
            languages.sort();
        }
        languages
    }
}

const CODE_FORMATS: &[InputFormat] = &[InputFormat::Arb, InputFormat::Js];
const TEXT_FORMATS: &[InputFormat] = &[InputFormat::Text];
const ALL_FORMATS: &[InputFormat] = &InputFormat::ALL;

/// Preset catalogue, in display order
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "code-default",
        label: "English + 19 languages",
        formats: CODE_FORMATS,
        base: CODE_TARGET_LANGUAGES,
        sorted: false,
    },
    Preset {
        name: "code-without-en",
        label: "19 languages (no English)",
        formats: CODE_FORMATS,
        base: TEXT_TARGET_LANGUAGES,
        sorted: false,
    },
    Preset {
        name: "text-default",
        label: "19 languages",
        formats: TEXT_FORMATS,
        base: TEXT_TARGET_LANGUAGES,
        sorted: false,
    },
    Preset {
        name: "alphabetical",
        label: "Default languages, sorted by code",
        formats: ALL_FORMATS,
        base: &[],
        sorted: true,
    },
];

fn default_languages(format: InputFormat) -> &'static [&'static str] {
    if format.has_ids() {
        CODE_TARGET_LANGUAGES
    } else {
        TEXT_TARGET_LANGUAGES
    }
}

/// Presets offered for a format, in display order
pub fn presets_for(format: InputFormat) -> Vec<&'static Preset> {
    PRESETS.iter().filter(|p| p.supports(format)).collect()
}

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}

fn first_preset_for(format: InputFormat) -> &'static Preset {
    // Every format is covered by `alphabetical`, so the fallback never runs dry
    presets_for(format)
        .into_iter()
        .next()
        .unwrap_or(&PRESETS[PRESETS.len() - 1])
}

/// How the target languages are chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Arrangement {
    /// A named preset from [`PRESETS`]
    Preset(String),
    /// A user supplied comma-separated list such as `"fr, de,ja"`
    Custom(String),
}

impl Arrangement {
    pub fn preset(name: &str) -> Self {
        Arrangement::Preset(name.to_string())
    }

    pub fn custom(list: &str) -> Self {
        Arrangement::Custom(list.to_string())
    }

    /// Default arrangement for a format: its first preset
    pub fn default_for(format: InputFormat) -> Self {
        Arrangement::preset(first_preset_for(format).name)
    }

    /// Whether this arrangement can be used with the given format
    pub fn is_valid_for(&self, format: InputFormat) -> bool {
        match self {
            Arrangement::Preset(name) => find_preset(name).is_some_and(|p| p.supports(format)),
            Arrangement::Custom(_) => true,
        }
    }
}

/// Resolve the ordered, deduplicated target languages
///
/// A preset that is unknown or not offered for `format` falls back to the
/// first preset of that format.
pub fn resolve_languages(format: InputFormat, arrangement: &Arrangement) -> Vec<LanguageCode> {
    match arrangement {
        Arrangement::Preset(name) => match find_preset(name).filter(|p| p.supports(format)) {
            Some(preset) => preset.languages(format),
            None => {
                let fallback = first_preset_for(format);
                tracing::debug!(
                    requested = %name,
                    fallback = fallback.name,
                    format = %format,
                    "Preset not available for format, using fallback"
                );
                fallback.languages(format)
            }
        },
        Arrangement::Custom(list) => parse_custom_languages(list),
    }
}

/// Split a comma-separated list, trimming tokens and dropping empty and
/// repeated ones
pub fn parse_custom_languages(list: &str) -> Vec<LanguageCode> {
    let mut languages: Vec<LanguageCode> = Vec::new();
    for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !languages.iter().any(|l| l == token) {
            languages.push(token.to_string());
        }
    }
    languages
}

/// Check that each code is a well-formed BCP 47 language tag
///
/// Returns the offending codes in order, or `Ok(())` when all are valid.
pub fn validate_language_codes(languages: &[LanguageCode]) -> Result<(), Vec<String>> {
    let invalid: Vec<String> = languages
        .iter()
        .filter(|code| code.parse::<Locale>().is_err())
        .cloned()
        .collect();

    if invalid.is_empty() { Ok(()) } else { Err(invalid) }
}

/// Interactive selection of input format and arrangement
///
/// Keeps the arrangement valid for the current format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelection {
    format: InputFormat,
    arrangement: Arrangement,
}

impl LanguageSelection {
    pub fn new(format: InputFormat) -> Self {
        Self {
            format,
            arrangement: Arrangement::default_for(format),
        }
    }

    pub fn format(&self) -> InputFormat {
        self.format
    }

    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    /// Change the input format, falling back to the first preset of the new
    /// format when the current one is not offered for it
    pub fn set_format(&mut self, format: InputFormat) -> &mut Self {
        self.format = format;
        self.revalidate();
        self
    }

    pub fn set_arrangement(&mut self, arrangement: Arrangement) -> &mut Self {
        self.arrangement = arrangement;
        self.revalidate();
        self
    }

    pub fn languages(&self) -> Vec<LanguageCode> {
        resolve_languages(self.format, &self.arrangement)
    }

    fn revalidate(&mut self) {
        if !self.arrangement.is_valid_for(self.format) {
            self.arrangement = Arrangement::default_for(self.format);
        }
    }
}
