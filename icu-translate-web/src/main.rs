use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use icu_translate::{
    Arrangement, InputFormat, LanguageCode, LanguageSelection, TranslationResult, presets_for,
};
use icu_translate_mt::{GeminiConfig, GeminiProvider, IcuTranslator, MtError, translate_input};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Serialize, Deserialize)]
pub struct TranslateRequest {
    pub input: String,
    pub format: InputFormat,
    /// Preset name; ignored when `languages` is given
    #[serde(default)]
    pub arrangement: Option<String>,
    /// Custom comma-separated language list
    #[serde(default)]
    pub languages: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct TranslateResponse {
    pub format: InputFormat,
    pub arrangement: Arrangement,
    pub languages: Vec<LanguageCode>,
    pub results: Vec<TranslationResult>,
}

#[derive(Deserialize)]
pub struct ArrangementsQuery {
    pub format: InputFormat,
}

#[derive(Serialize)]
pub struct PresetInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub languages: Vec<LanguageCode>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    /// A missing credential is kept as an error and reported per request
    pub translator: Result<Arc<dyn IcuTranslator>, MtError>,
}

impl AppState {
    pub fn from_env() -> Self {
        let translator = GeminiConfig::from_env()
            .and_then(GeminiProvider::new)
            .map(|provider| Arc::new(provider) as Arc<dyn IcuTranslator>);
        if let Err(e) = &translator {
            warn!("Translator unavailable: {}", e);
        }
        Self { translator }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/arrangements", get(list_arrangements))
        .route("/api/translate", post(translate_messages))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let state = AppState::from_env();

    info!("Starting ICU message translator web server");

    let addr = std::env::var("ICU_MT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn serve_index() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        include_str!("static/index.html"),
    )
}

async fn list_arrangements(Query(query): Query<ArrangementsQuery>) -> Json<Vec<PresetInfo>> {
    Json(
        presets_for(query.format)
            .into_iter()
            .map(|preset| PresetInfo {
                name: preset.name,
                label: preset.label,
                languages: preset.languages(query.format),
            })
            .collect(),
    )
}

fn status_for(err: &MtError) -> StatusCode {
    match err {
        MtError::ValidationError(_) | MtError::Format(_) => StatusCode::BAD_REQUEST,
        MtError::ConfigError(_) => StatusCode::SERVICE_UNAVAILABLE,
        MtError::EmptyResponse
        | MtError::ResponseParse(_)
        | MtError::ResponseShape(_)
        | MtError::NetworkError(_)
        | MtError::TranslationError(_) => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(err: &MtError) -> (StatusCode, Json<ErrorResponse>) {
    (
        status_for(err),
        Json(ErrorResponse {
            error: err.user_message(),
        }),
    )
}

fn selection_for(request: &TranslateRequest) -> LanguageSelection {
    let mut selection = LanguageSelection::new(request.format);
    match (&request.languages, &request.arrangement) {
        (Some(list), _) if !list.trim().is_empty() => {
            selection.set_arrangement(Arrangement::custom(list));
        }
        (_, Some(name)) => {
            selection.set_arrangement(Arrangement::preset(name));
        }
        _ => {}
    }
    selection
}

async fn translate_messages(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let selection = selection_for(&request);
    let languages = selection.languages();

    info!(
        "Translating {} input ({} bytes) into {} languages",
        request.format,
        request.input.len(),
        languages.len()
    );

    let translator = state.translator.as_ref().map_err(error_response)?;

    let results = translate_input(translator.as_ref(), &request.input, request.format, &languages)
        .await
        .map_err(|e| {
            warn!("Translation failed: {}", e);
            error_response(&e)
        })?;

    info!("Successfully translated {} strings", results.len());

    Ok(Json(TranslateResponse {
        format: request.format,
        arrangement: selection.arrangement().clone(),
        languages,
        results,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use icu_translate_mt::{MockMode, MockTranslator};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn mock_state(mode: MockMode) -> AppState {
        AppState {
            translator: Ok(Arc::new(MockTranslator::new(mode))),
        }
    }

    async fn post_translate(state: AppState, body: Value) -> (StatusCode, Value) {
        let response = app(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/translate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_translate_arb_with_custom_languages() {
        let (status, body) = post_translate(
            mock_state(MockMode::Reversed),
            json!({
                "input": "{\"hi\": \"Hi {name}\", \"bye\": \"Bye\"}",
                "format": "arb",
                "languages": "fr, es"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["languages"], json!(["fr", "es"]));
        assert_eq!(body["results"][0]["id"], "bye");
        assert_eq!(body["results"][1]["id"], "hi");
        assert_eq!(body["results"][1]["translations"]["fr"], "Hi {name}_fr");
    }

    #[tokio::test]
    async fn test_preset_falls_back_for_format() {
        let (status, body) = post_translate(
            mock_state(MockMode::Suffix),
            json!({ "input": "Hello", "format": "text", "arrangement": "code-default" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["arrangement"]["value"], "text-default");
        assert_eq!(body["languages"].as_array().unwrap().len(), 19);
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let (status, body) = post_translate(
            mock_state(MockMode::Suffix),
            json!({ "input": "   ", "format": "text" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("at least one string"));
    }

    #[tokio::test]
    async fn test_format_error_names_format() {
        let (status, body) = post_translate(
            mock_state(MockMode::Suffix),
            json!({ "input": "nothing", "format": "js" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("JS/TS"));
    }

    #[tokio::test]
    async fn test_missing_credentials_reported() {
        let state = AppState {
            translator: Err(MtError::ConfigError(
                "GEMINI_API_KEY environment variable not set".into(),
            )),
        };
        let (status, body) =
            post_translate(state, json!({ "input": "Hello", "format": "text" })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_garbled_response_is_bad_gateway() {
        let (status, body) = post_translate(
            mock_state(MockMode::Raw("<html>oops</html>".to_string())),
            json!({ "input": "Hello", "format": "text", "languages": "fr" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("parse"));
    }

    #[tokio::test]
    async fn test_list_arrangements() {
        let response = app(mock_state(MockMode::Suffix))
            .oneshot(
                Request::builder()
                    .uri("/api/arrangements?format=js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["code-default", "code-without-en", "alphabetical"]);
        assert_eq!(body[0]["languages"][0], "en");
    }

    #[tokio::test]
    async fn test_index_served() {
        let response = app(mock_state(MockMode::Suffix))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }
}
