//! Upstream Provider Seam
//!
//! The relay gateway computes replies through this trait, keeping the
//! handler logic independent of the concrete AI backend. The production
//! implementation lives in `chat-runtime`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Role of an upstream-facing prompt line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    /// Instructions for the assistant
    System,
    /// The relayed user message
    User,
}

/// A single prompt line sent upstream.
///
/// Distinct from the display-side [`Message`](crate::message::Message): the
/// widget never sees this type, and the upstream never sees that one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub text: String,
}

impl PromptMessage {
    /// Create a system prompt line
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            text: text.into(),
        }
    }

    /// Create a user prompt line
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            text: text.into(),
        }
    }
}

/// Generation controls forwarded to the upstream model.
///
/// The defaults are the relay's wire contract: a caller that omits a control
/// gets the stock value, not whatever the provider would pick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Frequency penalty
    #[serde(default)]
    pub frequency_penalty: f32,

    /// Presence penalty
    #[serde(default)]
    pub presence_penalty: f32,

    /// Stop sequences; empty means none
    #[serde(default)]
    pub stop: Vec<String>,
}

fn default_max_tokens() -> u32 {
    800
}
fn default_temperature() -> f32 {
    0.7
}
fn default_top_p() -> f32 {
    0.95
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: Vec::new(),
        }
    }
}

/// Token usage statistics, when the upstream reports them
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A completed upstream reply
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The reply text
    pub text: String,

    /// Model or deployment that produced it
    pub model: String,

    /// Usage statistics (logged at debug level, never sent to the widget)
    pub usage: Option<TokenUsage>,
}

/// Strategy trait for upstream reply computation.
///
/// The gateway holds this as `Arc<dyn ReplyProvider>`; swapping backends
/// never touches handler code.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Generate a reply for the given prompt
    async fn complete(
        &self,
        messages: &[PromptMessage],
        options: &GenerationOptions,
    ) -> Result<Completion>;

    /// Check whether the upstream is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.max_tokens, 800);
        assert_eq!(opts.temperature, 0.7);
        assert_eq!(opts.top_p, 0.95);
        assert_eq!(opts.frequency_penalty, 0.0);
        assert_eq!(opts.presence_penalty, 0.0);
        assert!(opts.stop.is_empty());
    }

    #[test]
    fn test_omitted_fields_deserialize_to_defaults() {
        let opts: GenerationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.max_tokens, 800);
        assert_eq!(opts.temperature, 0.7);
    }

    #[test]
    fn test_prompt_roles_serialize_lowercase() {
        let line = PromptMessage::system("be brief");
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["role"], "system");
    }
}
