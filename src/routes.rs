//! HTTP handlers and their request/response envelopes.
//!
//! Every `/ai` handler builds a provider-agnostic prompt, delegates to the
//! active provider, and shapes the plain-text result into a task-specific
//! envelope. Only `/ai/generate` normalizes `Error:`-prefixed results into a
//! structured failure; the task endpoints return the provider text verbatim
//! and callers must inspect it themselves.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::server::AppState;
use crate::types::GenerationParams;

fn default_max_tokens() -> u32 {
    100
}

fn default_temperature() -> f32 {
    0.7
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_summary_length() -> u32 {
    100
}

fn default_code_language() -> String {
    "python".to_string()
}

fn default_code_tokens() -> u32 {
    150
}

#[derive(Debug, Deserialize)]
pub struct TextGenerationRequest {
    pub prompt: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct TextGenerationResponse {
    pub generated_text: String,
    pub model: String,
    pub provider: String,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProviderInfoResponse {
    pub provider: String,
    pub status: String,
    pub message: String,
    pub configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
}

#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizationRequest {
    pub text: String,
    #[serde(default = "default_summary_length")]
    pub max_length: u32,
}

#[derive(Debug, Serialize)]
pub struct SummarizationResponse {
    pub original_length: usize,
    pub summary: String,
    pub summary_length: usize,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CodeGenerationRequest {
    pub instruction: String,
    #[serde(default = "default_code_language")]
    pub language: String,
    #[serde(default = "default_code_tokens")]
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct CodeGenerationResponse {
    pub instruction: String,
    pub language: String,
    pub code: String,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub user_message: String,
    pub ai_response: String,
    pub model: Option<String>,
}

/// `POST /ai/generate` — free-form generation with the structured
/// success/error envelope.
pub async fn generate_text(
    State(state): State<AppState>,
    Json(request): Json<TextGenerationRequest>,
) -> Json<TextGenerationResponse> {
    let params = GenerationParams::new(request.prompt)
        .with_max_tokens(request.max_tokens)
        .with_temperature(request.temperature);

    let generated_text = state.provider.generate(&params).await;
    let model = state.settings.reported_model();
    let provider = state.provider.provider_type().as_str().to_string();

    if generated_text.starts_with("Error:") {
        return Json(TextGenerationResponse {
            generated_text: String::new(),
            model,
            provider,
            success: false,
            error: Some(generated_text),
        });
    }

    Json(TextGenerationResponse {
        generated_text,
        model,
        provider,
        success: true,
        error: None,
    })
}

/// `GET /ai/provider` — which provider is active and whether any credential
/// is configured.
pub async fn provider_info(State(state): State<AppState>) -> Json<ProviderInfoResponse> {
    let provider = state.provider.provider_type();
    Json(ProviderInfoResponse {
        provider: provider.as_str().to_string(),
        status: "active".to_string(),
        message: format!("Using {} API", provider.as_str()),
        configured: state.settings.credentials_configured(),
    })
}

/// `POST /ai/translate`
pub async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Json<TranslationResponse> {
    let prompt = format!(
        "Translate the following text from {} to {}: {}",
        request.source_language, request.target_language, request.text
    );
    debug!(target = %request.target_language, "Translation request");

    let params = GenerationParams::new(prompt)
        .with_max_tokens(100)
        .with_temperature(0.3);
    let translated_text = state.provider.generate(&params).await;

    Json(TranslationResponse {
        original_text: request.text,
        translated_text,
        source_language: request.source_language,
        target_language: request.target_language,
        model: state.settings.task_model(),
    })
}

/// `POST /ai/summarize`
pub async fn summarize_text(
    State(state): State<AppState>,
    Json(request): Json<SummarizationRequest>,
) -> Json<SummarizationResponse> {
    let prompt = format!(
        "Please summarize the following text concisely: {}",
        request.text
    );

    let params = GenerationParams::new(prompt)
        .with_max_tokens(request.max_length)
        .with_temperature(0.2);
    let summary = state.provider.generate(&params).await;

    Json(SummarizationResponse {
        original_length: request.text.chars().count(),
        summary_length: summary.chars().count(),
        summary,
        model: state.settings.task_model(),
    })
}

/// `POST /ai/generate-code`
pub async fn generate_code(
    State(state): State<AppState>,
    Json(request): Json<CodeGenerationRequest>,
) -> Json<CodeGenerationResponse> {
    let prompt = format!(
        "Write {} code that: {}. Provide only the code with comments.",
        request.language, request.instruction
    );

    // Low temperature keeps code output deterministic.
    let params = GenerationParams::new(prompt)
        .with_max_tokens(request.max_tokens)
        .with_temperature(0.1);
    let code = state.provider.generate(&params).await;

    Json(CodeGenerationResponse {
        instruction: request.instruction,
        language: request.language,
        code,
        model: state.settings.task_model(),
    })
}

/// `POST /ai/chat`
pub async fn chat_completion(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let params = GenerationParams::new(request.message.clone())
        .with_max_tokens(request.max_tokens)
        .with_temperature(0.7);
    let ai_response = state.provider.generate(&params).await;

    Json(ChatResponse {
        user_message: request.message,
        ai_response,
        model: state.settings.task_model(),
    })
}

/// `GET /` — welcome envelope.
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Welcome to the LLM Relay API!",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.provider.provider_type().as_str(),
        "model": state.settings.reported_model(),
        "health_check": "/health",
    }))
}

/// `GET /health` — liveness probe.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "llm-relay",
        "environment": state.settings.app_env,
    }))
}

/// `GET /info` — configuration summary.
pub async fn api_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "api_name": "LLM Relay",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.settings.app_env,
        "ai_provider": state.provider.provider_type().as_str(),
        "model": state.settings.reported_model(),
        "api_key_configured": state.settings.credentials_configured(),
    }))
}
