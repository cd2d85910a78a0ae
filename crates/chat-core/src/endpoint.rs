//! Remote Endpoint Seam
//!
//! The widget treats the service that computes bot replies as an opaque
//! collaborator behind this trait: text goes in, reply text (or an error)
//! comes out. Production implementations speak HTTP; tests substitute a
//! scripted double.

use async_trait::async_trait;

use crate::error::Result;

/// Strategy trait for the remote chat endpoint.
///
/// One call per submission. There is no retry, no queuing, and no timeout
/// here. A call either resolves with the reply text or fails with the
/// status or transport error the caller collapses into the fallback message.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Send one user message and await the bot's reply text.
    async fn send(&self, text: &str) -> Result<String>;
}
