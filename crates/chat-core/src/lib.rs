//! # chat-core
//!
//! Shared chat model: the display-side transcript, the widget controller,
//! and the seams the frontend and the relay gateway plug into.
//!
//! ```text
//! ┌──────────┐  {"user_message"}  ┌─────────────┐  chat completions  ┌──────────────┐
//! │ chat-web │ ─────────────────▶ │ chat-server │ ─────────────────▶ │ Azure OpenAI │
//! └──────────┘     POST /chat     └─────────────┘   (chat-runtime)   └──────────────┘
//! ```
//!
//! The widget side is `ChatController` over the `ChatEndpoint` seam; the
//! gateway side is the `ReplyProvider` seam. Both frontends of a submission
//! share one rule: success renders the reply, failure renders the fixed
//! fallback text and logs the detail.

pub mod controller;
pub mod endpoint;
pub mod error;
pub mod message;
pub mod provider;

pub use controller::ChatController;
pub use endpoint::ChatEndpoint;
pub use error::{ChatError, FALLBACK_REPLY, Result};
pub use message::{Message, Role, Transcript};
pub use provider::{
    Completion, GenerationOptions, PromptMessage, PromptRole, ReplyProvider, TokenUsage,
};
