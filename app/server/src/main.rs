//! HTTP boundary for the PitchLens engine: upload, chat, recommendations,
//! and visual analysis, with CORS open for the local UI.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use pitchlens::{Analysis, EngineConfig, EngineError, PitchEngine, SlideData};

type AppState = Arc<PitchEngine>;
type ApiError = (StatusCode, Json<Value>);

fn error_reply(err: EngineError) -> ApiError {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!(error = ?err, "request failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let message = if err.is_client_error() {
        err.to_string()
    } else {
        "Failed to process request".to_string()
    };
    (status, Json(json!({ "error": message })))
}

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

async fn health() -> &'static str {
    "PitchLens API is running"
}

async fn upload(
    State(engine): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "malformed multipart body");
        bad_request("Malformed upload body")
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to read upload body");
            bad_request("Malformed upload body")
        })?;

        tracing::info!(filename = %filename, bytes = bytes.len(), "processing upload");

        let report = engine
            .analyze_upload(&filename, &content_type, &bytes)
            .await
            .map_err(error_reply)?;

        return Ok(Json(json!({
            "success": true,
            "filename": report.filename,
            "textLength": report.text_length,
            "analysis": report.analysis,
        })));
    }

    Err(bad_request("No file provided"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    pitch_deck_text: Option<String>,
    #[serde(default)]
    analysis: Option<Analysis>,
}

async fn chat(
    State(engine): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<Value>, ApiError> {
    let question = payload.question.unwrap_or_default();
    let deck_text = payload.pitch_deck_text.unwrap_or_default();

    let reply = engine
        .chat(&question, &deck_text, payload.analysis.as_ref())
        .await
        .map_err(error_reply)?;

    Ok(Json(json!({
        "success": true,
        "response": reply.response,
        "timestamp": reply.timestamp,
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationsRequest {
    #[serde(default)]
    analysis: Option<Analysis>,
    #[serde(default)]
    previous_questions: Vec<String>,
}

async fn recommendations(
    State(engine): State<AppState>,
    Json(payload): Json<RecommendationsRequest>,
) -> Result<Json<Value>, ApiError> {
    let analysis = payload
        .analysis
        .ok_or_else(|| bad_request("No analysis provided"))?;

    let recommendations = engine.recommendations(&analysis, &payload.previous_questions);
    tracing::info!(count = recommendations.len(), "recommendations generated");

    Ok(Json(json!({
        "success": true,
        "recommendations": recommendations,
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisualAnalysisRequest {
    #[serde(default)]
    analysis: Option<Analysis>,
    #[serde(default)]
    slide_data: Option<SlideData>,
}

async fn visual_analysis(
    State(engine): State<AppState>,
    Json(payload): Json<VisualAnalysisRequest>,
) -> Result<Json<Value>, ApiError> {
    let analysis = payload
        .analysis
        .ok_or_else(|| bad_request("No analysis provided"))?;
    let slide_data = payload
        .slide_data
        .ok_or_else(|| bad_request("No slide data provided"))?;

    let visual = engine.visual_analysis(&analysis, &slide_data).await;

    Ok(Json(json!({
        "success": true,
        "visualAnalysis": visual,
    })))
}

fn router(engine: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/chat", post(chat))
        .route("/recommendations", post(recommendations))
        .route("/visual-analysis", post(visual_analysis))
        .layer(DefaultBodyLimit::max(25 * 1024 * 1024))
        .layer(cors)
        .with_state(engine)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("PITCHLENS_CONFIG") {
        Ok(path) => EngineConfig::from_file(std::path::Path::new(&path))
            .map_err(|e| anyhow::anyhow!(e))?,
        Err(_) => EngineConfig::default(),
    };

    let engine = Arc::new(PitchEngine::with_defaults(config)?);

    let addr = std::env::var("PITCHLENS_ADDR").unwrap_or_else(|_| "127.0.0.1:3900".to_string());
    tracing::info!("PitchLens API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(engine)).await?;

    Ok(())
}
