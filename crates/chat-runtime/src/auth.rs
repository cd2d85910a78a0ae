//! Entra Bearer Tokens
//!
//! Client-credentials token acquisition for the Azure OpenAI data plane,
//! with in-memory caching and early refresh.

use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;

use chat_core::error::{ChatError, Result};

/// OAuth scope for the Azure Cognitive Services data plane
const SCOPE: &str = "https://cognitiveservices.azure.com/.default";

/// Refresh this many seconds before the token actually expires
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Service principal credentials for the client-credentials grant
#[derive(Clone, Debug)]
pub struct ClientCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    /// Read credentials from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            tenant_id: require_env("AZURE_TENANT_ID")?,
            client_id: require_env("AZURE_CLIENT_ID")?,
            client_secret: require_env("AZURE_CLIENT_SECRET")?,
        })
    }

    /// Token endpoint for this tenant
    fn token_url(&self) -> String {
        format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
            self.tenant_id
        )
    }
}

/// Get a required environment variable or fail with a config error
pub(crate) fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ChatError::Config(format!("missing required environment variable: {name}")))
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// A cached bearer token with its expiry timestamp
#[derive(Clone, Debug)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

impl CachedToken {
    fn from_response(response: TokenResponse, now: i64) -> Self {
        Self {
            token: response.access_token,
            expires_at: now + response.expires_in,
        }
    }

    /// Whether the token expires within the given margin
    fn expires_within(&self, now: i64, seconds: i64) -> bool {
        now >= self.expires_at - seconds
    }
}

/// Cached client-credentials token source.
///
/// Tokens are fetched lazily, cached until shortly before expiry, and then
/// replaced. Concurrent refreshes are tolerated: both grants yield valid
/// tokens and the last writer wins.
pub struct TokenSource {
    http: reqwest::Client,
    credentials: ClientCredentials,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenSource {
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            cached: RwLock::new(None),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientCredentials::from_env()?))
    }

    /// A bearer token valid for at least the refresh margin
    pub async fn bearer(&self) -> Result<String> {
        let now = Utc::now().timestamp();
        if let Some(cached) = self.cached.read().await.as_ref() {
            if !cached.expires_within(now, EXPIRY_MARGIN_SECS) {
                return Ok(cached.token.clone());
            }
        }
        self.refresh(now).await
    }

    async fn refresh(&self, now: i64) -> Result<String> {
        tracing::debug!("requesting new bearer token");

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", SCOPE),
        ];

        let response = self
            .http
            .post(self.credentials.token_url())
            .form(&params)
            .send()
            .await
            .map_err(|e| ChatError::Auth(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ChatError::Auth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Auth(format!("invalid token response: {e}")))?;

        let cached = CachedToken::from_response(token, now);
        let bearer = cached.token.clone();
        *self.cached.write().await = Some(cached);

        Ok(bearer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> ClientCredentials {
        ClientCredentials {
            tenant_id: "tenant".into(),
            client_id: "client".into(),
            client_secret: "secret".into(),
        }
    }

    #[test]
    fn test_token_url() {
        let url = test_credentials().token_url();
        assert_eq!(
            url,
            "https://login.microsoftonline.com/tenant/oauth2/v2.0/token"
        );
    }

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{"token_type":"Bearer","expires_in":3599,"access_token":"abc"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, 3599);
    }

    #[test]
    fn test_expiry_margin() {
        let token = CachedToken {
            token: "tok".into(),
            expires_at: 1_000,
        };
        assert!(!token.expires_within(800, 60));
        assert!(token.expires_within(950, 60));
        assert!(token.expires_within(1_000, 60));
    }

    #[tokio::test]
    async fn test_fresh_token_is_reused_without_a_grant() {
        let source = TokenSource::new(test_credentials());
        let now = Utc::now().timestamp();
        *source.cached.write().await = Some(CachedToken {
            token: "tok".into(),
            expires_at: now + 3_600,
        });

        // No network: the cached token is still comfortably valid.
        assert_eq!(source.bearer().await.unwrap(), "tok");
    }

    #[tokio::test]
    async fn test_token_inside_margin_is_not_reused() {
        let source = TokenSource::new(test_credentials());
        let now = Utc::now().timestamp();
        *source.cached.write().await = Some(CachedToken {
            token: "stale".into(),
            expires_at: now + 30,
        });

        // Expiry is inside the refresh margin, so a fresh grant is attempted
        // (and fails against these credentials) instead of the cached token
        // being handed back.
        let result = source.bearer().await;
        assert!(!matches!(result.as_deref(), Ok("stale")));
    }

    #[test]
    fn test_require_env_names_the_variable() {
        let err = require_env("RUST_CHAT_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(err.to_string().contains("RUST_CHAT_TEST_UNSET_VARIABLE"));
    }
}
