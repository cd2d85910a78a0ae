//! Azure OpenAI Provider
//!
//! Implementation of `ReplyProvider` for an Azure OpenAI chat-completions
//! deployment.

use async_trait::async_trait;
use serde_json::{Value, json};

use chat_core::error::{ChatError, Result};
use chat_core::provider::{
    Completion, GenerationOptions, PromptMessage, PromptRole, ReplyProvider, TokenUsage,
};

use crate::auth::{ClientCredentials, TokenSource, require_env};

/// Default API version when `AZURE_OPENAI_API_VERSION` is unset
const DEFAULT_API_VERSION: &str = "2025-01-01-preview";

/// Azure OpenAI provider configuration
#[derive(Clone, Debug)]
pub struct AzureConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,

    /// Chat model deployment name
    pub deployment: String,

    /// Data-plane API version
    pub api_version: String,
}

impl AzureConfig {
    pub fn new(endpoint: impl Into<String>, deployment: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            deployment: deployment.into(),
            api_version: DEFAULT_API_VERSION.into(),
        }
    }

    /// Read the configuration from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: require_env("AZURE_OPENAI_ENDPOINT")?,
            deployment: require_env("AZURE_OPENAI_DEPLOYMENT_NAME")?,
            api_version: std::env::var("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.into()),
        })
    }

    /// Chat-completions URL for this deployment
    fn chat_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }

    /// Models listing URL, used as the health probe
    fn models_url(&self) -> String {
        format!(
            "{}/openai/models?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.api_version
        )
    }
}

/// Azure OpenAI provider
pub struct AzureOpenAi {
    http: reqwest::Client,
    config: AzureConfig,
    tokens: TokenSource,
}

impl AzureOpenAi {
    /// Create from configuration parts
    pub fn new(config: AzureConfig, credentials: ClientCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            tokens: TokenSource::new(credentials),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            AzureConfig::from_env()?,
            ClientCredentials::from_env()?,
        ))
    }

    /// Convert prompt lines to the deployment's message format.
    ///
    /// Content uses the parts form: `[{"type": "text", "text": …}]`.
    fn convert_messages(messages: &[PromptMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    PromptRole::System => "system",
                    PromptRole::User => "user",
                };
                json!({
                    "role": role,
                    "content": [{"type": "text", "text": m.text}],
                })
            })
            .collect()
    }

    /// Build the chat-completions request body.
    ///
    /// Always a non-streaming call. `stop` is omitted entirely when empty
    /// rather than sent as an empty array.
    fn build_payload(messages: &[PromptMessage], options: &GenerationOptions) -> Value {
        let mut payload = json!({
            "messages": Self::convert_messages(messages),
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
            "top_p": options.top_p,
            "frequency_penalty": options.frequency_penalty,
            "presence_penalty": options.presence_penalty,
            "stream": false,
        });
        if !options.stop.is_empty() {
            payload["stop"] = json!(options.stop);
        }
        payload
    }

    /// Extract the reply from a chat-completions response body
    fn parse_completion(&self, body: &Value) -> Result<Completion> {
        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ChatError::Upstream("completion contained no choices".into()))?
            .to_string();

        let usage = body.get("usage").and_then(|u| {
            Some(TokenUsage {
                prompt_tokens: u["prompt_tokens"].as_u64()? as u32,
                completion_tokens: u["completion_tokens"].as_u64()? as u32,
                total_tokens: u["total_tokens"].as_u64()? as u32,
            })
        });

        Ok(Completion {
            text,
            model: self.config.deployment.clone(),
            usage,
        })
    }
}

#[async_trait]
impl ReplyProvider for AzureOpenAi {
    async fn complete(
        &self,
        messages: &[PromptMessage],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let token = self.tokens.bearer().await?;
        let payload = Self::build_payload(messages, options);

        let response = self
            .http
            .post(self.config.chat_url())
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ChatError::UpstreamUnavailable(e.to_string())
                } else {
                    ChatError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ChatError::Upstream(format!(
                "chat completion returned {status}: {detail}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ChatError::Upstream(format!("invalid completion response: {e}")))?;

        self.parse_completion(&body)
    }

    async fn health_check(&self) -> Result<bool> {
        let token = match self.tokens.bearer().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Azure OpenAI health check failed: {}", e);
                return Ok(false);
            }
        };

        match self
            .http
            .get(self.config.models_url())
            .bearer_auth(token)
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("Azure OpenAI health check failed: {}", e);
                Ok(false)
            }
        }
    }
}
