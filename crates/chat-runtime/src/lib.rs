//! # chat-runtime
//!
//! Upstream provider implementations for rust-chat.
//!
//! The relay gateway talks through `chat-core`'s [`ReplyProvider`] seam; this
//! crate supplies the production implementation:
//!
//! - **Azure OpenAI**: chat completions against a named deployment,
//!   authenticated with an Entra client-credentials bearer token.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_runtime::AzureOpenAi;
//!
//! let provider = AzureOpenAi::from_env()?;
//! let completion = provider.complete(&messages, &options).await?;
//! ```

pub mod auth;
pub mod azure;

pub use auth::{ClientCredentials, TokenSource};
pub use azure::{AzureConfig, AzureOpenAi};

// Re-export core types for convenience
pub use chat_core::{
    ChatError, Completion, GenerationOptions, PromptMessage, PromptRole, ReplyProvider, Result,
};
