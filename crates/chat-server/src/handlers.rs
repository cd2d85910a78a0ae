//! HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use chat_core::{
    error::ChatError,
    provider::{GenerationOptions, PromptMessage},
};

use crate::state::AppState;

/// System prompt injected when the caller does not supply one
const STOCK_SYSTEM_PROMPT: &str = "You are an AI assistant that helps people find information.";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of `POST /chat`.
///
/// Only `user_message` is required. The generation controls are individually
/// optional, and an explicit `null` means the same as leaving a field out:
/// both fall back to the stock [`GenerationOptions`] defaults. `stream` is
/// accepted for wire compatibility; the relay always answers in one piece.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_message: String,
    #[serde(default)]
    pub system_message: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub frequency_penalty: Option<f32>,
    #[serde(default)]
    pub presence_penalty: Option<f32>,
    #[serde(default)]
    pub stop: Option<Vec<String>>,
    #[serde(default)]
    pub stream: Option<bool>,
}

impl ChatRequest {
    /// Generation controls with the stock defaults folded in for every
    /// omitted or null field
    fn options(&self) -> GenerationOptions {
        let stock = GenerationOptions::default();
        GenerationOptions {
            max_tokens: self.max_tokens.unwrap_or(stock.max_tokens),
            temperature: self.temperature.unwrap_or(stock.temperature),
            top_p: self.top_p.unwrap_or(stock.top_p),
            frequency_penalty: self.frequency_penalty.unwrap_or(stock.frequency_penalty),
            presence_penalty: self.presence_penalty.unwrap_or(stock.presence_penalty),
            stop: self.stop.clone().unwrap_or(stock.stop),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub upstream_connected: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        upstream_connected,
    })
}

/// Main chat endpoint.
///
/// Relays the user message upstream and returns the reply text as a bare
/// JSON string, the shape the widget deserializes. Error details go to the
/// log; the wire only carries the sanitized message and a machine code.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<String>, (StatusCode, Json<ErrorResponse>)> {
    if payload.stream.unwrap_or(false) {
        tracing::debug!("stream requested; replying non-streaming");
    }

    let messages = build_prompt(payload.system_message.as_deref(), &payload.user_message);
    let options = payload.options();

    let completion = state
        .provider
        .complete(&messages, &options)
        .await
        .map_err(|e| {
            tracing::error!("Chat relay error: {}", e);
            let (status, code) = classify(&e);
            (
                status,
                Json(ErrorResponse {
                    error: e.user_message(),
                    code: code.into(),
                }),
            )
        })?;

    if let Some(usage) = &completion.usage {
        tracing::debug!(
            model = %completion.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "completion usage"
        );
    }

    Ok(Json(completion.text))
}

/// Assemble the upstream prompt: system line first, then the user message
fn build_prompt(system_message: Option<&str>, user_message: &str) -> Vec<PromptMessage> {
    vec![
        PromptMessage::system(system_message.unwrap_or(STOCK_SYSTEM_PROMPT)),
        PromptMessage::user(user_message),
    ]
}

/// Map an error to its response status and machine-readable code
fn classify(error: &ChatError) -> (StatusCode, &'static str) {
    match error {
        ChatError::UpstreamUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE")
        }
        ChatError::Auth(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_FAILED"),
        ChatError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
    }
}
