//! API Client

use chat_core::{ChatError, Result};

/// Base URL of the gateway, taken from the page that served the widget
fn base_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

/// Send a user message to the relay and return the reply text.
///
/// The gateway answers a bare JSON string on success. Transport and status
/// failures map onto [`ChatError`] so the controller can render its
/// fallback; the error detail never reaches the transcript.
pub async fn send_chat(text: &str) -> Result<String> {
    let client = reqwest::Client::new();

    let body = serde_json::json!({
        "user_message": text,
    });

    let response = client
        .post(format!("{}/chat", base_url()))
        .json(&body)
        .send()
        .await
        .map_err(|e| ChatError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ChatError::Status {
            status: response.status().as_u16(),
        });
    }

    response
        .json::<String>()
        .await
        .map_err(|e| ChatError::Network(e.to_string()))
}
