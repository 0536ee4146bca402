//! Translation request construction
//!
//! A request bundles the natural-language instruction, the target languages,
//! the batch of source strings and a structured output schema. The schema is
//! built by [`build_response_schema`], a pure function of the language list:
//! one string property per language under `translations`.

use icu_translate::LanguageCode;
use serde_json::{Map, Value, json};

/// Structured output schema, independent of any provider's wire format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    String {
        description: String,
    },
    Object {
        description: String,
        /// Properties in declaration order
        properties: Vec<(String, Schema)>,
        required: Vec<String>,
    },
    Array {
        description: String,
        items: Box<Schema>,
    },
}

impl Schema {
    pub fn string(description: impl Into<String>) -> Self {
        Schema::String {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Schema::String { description }
            | Schema::Object { description, .. }
            | Schema::Array { description, .. } => description,
        }
    }

    /// Look up a direct property of an object schema
    pub fn property(&self, name: &str) -> Option<&Schema> {
        match self {
            Schema::Object { properties, .. } => properties
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, schema)| schema),
            _ => None,
        }
    }

    /// Names of the direct properties of an object schema
    pub fn property_names(&self) -> Vec<&str> {
        match self {
            Schema::Object { properties, .. } => {
                properties.iter().map(|(key, _)| key.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn items(&self) -> Option<&Schema> {
        match self {
            Schema::Array { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Render in the generative API's OpenAPI-subset dialect
    pub fn to_json(&self) -> Value {
        match self {
            Schema::String { description } => json!({
                "type": "STRING",
                "description": description,
            }),
            Schema::Object {
                description,
                properties,
                required,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(key, schema)| (key.clone(), schema.to_json()))
                    .collect();
                let mut obj = json!({
                    "type": "OBJECT",
                    "description": description,
                    "properties": props,
                });
                if !required.is_empty() {
                    obj["required"] = json!(required);
                }
                obj
            }
            Schema::Array { description, items } => json!({
                "type": "ARRAY",
                "description": description,
                "items": items.to_json(),
            }),
        }
    }
}

/// Schema for the expected response: an array of `{original, translations}`
/// with one string property per requested language
pub fn build_response_schema(languages: &[LanguageCode]) -> Schema {
    let translation_properties = languages
        .iter()
        .map(|lang| {
            (
                lang.clone(),
                Schema::string(format!("The translation in {}.", lang)),
            )
        })
        .collect();

    Schema::Array {
        description: "A list of translation objects, one for each original English string provided."
            .to_string(),
        items: Box::new(Schema::Object {
            description: "One original string with its translations.".to_string(),
            properties: vec![
                (
                    "original".to_string(),
                    Schema::string("The original English ICU string that was translated."),
                ),
                (
                    "translations".to_string(),
                    Schema::Object {
                        description: "An object containing the translations, where each key is a language code."
                            .to_string(),
                        properties: translation_properties,
                        required: Vec::new(),
                    },
                ),
            ],
            required: vec!["original".to_string(), "translations".to_string()],
        }),
    }
}

/// Everything needed to ask a provider for one batch of translations
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub prompt: String,
    pub languages: Vec<LanguageCode>,
    pub sources: Vec<String>,
    pub schema: Schema,
}

/// Build the request for a batch of distinct source strings
pub fn build_request(sources: &[String], languages: &[LanguageCode]) -> TranslationRequest {
    TranslationRequest {
        prompt: build_prompt(sources, languages),
        languages: languages.to_vec(),
        sources: sources.to_vec(),
        schema: build_response_schema(languages),
    }
}

fn build_prompt(sources: &[String], languages: &[LanguageCode]) -> String {
    let language_list = languages.join(", ");
    let source_json = Value::from(sources.to_vec()).to_string();

    format!(
        "You are a specialized translation tool for application developers.
Your goal is to translate a given list of English strings that follow the ICU Message Format into multiple languages.

**Core Instruction:**
The most important rule is to preserve every placeholder exactly as written. A placeholder is any text delimited by curly braces, including the braces themselves, such as {{variableName}}, and this includes nested ICU plural and select syntax such as {{count, plural, one {{# item}} other {{# items}}}}. Copy placeholder names, keywords and structure verbatim and never translate them. Only translate the natural language outside the placeholders and the human-readable message text inside plural or select branches.

**Language List:**
Please provide the translations for the following languages: {language_list}.

**Input Strings:**
Here is a JSON array of the ICU strings to translate:
{source_json}

**Final Format:**
Respond with a valid JSON array that adheres to the provided schema. Each object in the array should correspond to one of the original input strings, repeat that string unchanged in `original`, and contain its translations. Ensure every language requested is present as a key in the 'translations' object for every string."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(codes: &[&str]) -> Vec<LanguageCode> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn translations_schema(schema: &Schema) -> &Schema {
        schema
            .items()
            .and_then(|item| item.property("translations"))
            .expect("translations property")
    }

    #[test]
    fn test_schema_has_one_property_per_language() {
        let schema = build_response_schema(&langs(&["fr", "es"]));
        let mut names = translations_schema(&schema).property_names();
        names.sort();
        assert_eq!(names, vec!["es", "fr"]);
    }

    #[test]
    fn test_schema_language_properties_are_strings() {
        let schema = build_response_schema(&langs(&["de", "zh-CN"]));
        let translations = translations_schema(&schema);
        for lang in ["de", "zh-CN"] {
            match translations.property(lang) {
                Some(Schema::String { description }) => assert!(description.contains(lang)),
                other => panic!("Expected string schema for {}, got {:?}", lang, other),
            }
        }
    }

    #[test]
    fn test_schema_requires_original_and_translations() {
        let schema = build_response_schema(&langs(&["fr"]));
        match schema.items() {
            Some(Schema::Object { required, .. }) => {
                assert_eq!(required, &vec!["original".to_string(), "translations".to_string()]);
            }
            other => panic!("Expected object items, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_json_rendering() {
        let json = build_response_schema(&langs(&["fr", "es"])).to_json();
        assert_eq!(json["type"], "ARRAY");
        assert_eq!(json["items"]["type"], "OBJECT");
        assert_eq!(json["items"]["required"], json!(["original", "translations"]));
        assert_eq!(json["items"]["properties"]["original"]["type"], "STRING");

        let props = json["items"]["properties"]["translations"]["properties"]
            .as_object()
            .unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props["fr"]["type"], "STRING");
        assert_eq!(props["es"]["description"], "The translation in es.");
    }

    #[test]
    fn test_prompt_lists_languages_and_sources() {
        let sources = vec!["Hello, {name}!".to_string(), "Say \"hi\"".to_string()];
        let request = build_request(&sources, &langs(&["fr", "es"]));

        assert!(request.prompt.contains("following languages: fr, es."));
        assert!(request.prompt.contains(r#"["Hello, {name}!","Say \"hi\""]"#));
        assert!(request.prompt.contains("{variableName}"));
        assert!(request.prompt.contains("{count, plural, one {# item} other {# items}}"));
        assert_eq!(request.sources, sources);
        assert_eq!(request.languages, vec!["fr", "es"]);
    }

    #[test]
    fn test_empty_language_list_gives_empty_properties() {
        let schema = build_response_schema(&[]);
        assert!(translations_schema(&schema).property_names().is_empty());
    }
}
