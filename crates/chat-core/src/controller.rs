//! Chat UI Controller
//!
//! Wires submit events to transcript appends and the remote call. The
//! controller owns the append-only transcript and the input draft; each
//! submission is an independent asynchronous operation with exactly two
//! outcomes: the reply is rendered, or the fallback text is.

use crate::endpoint::ChatEndpoint;
use crate::error::{FALLBACK_REPLY, Result};
use crate::message::{Message, Transcript};

/// Controller state behind the chat widget.
///
/// The asynchronous half of a submission is split out so a UI can run it on
/// its own task: [`ChatController::submit`] appends the user message and
/// yields the outbound text, [`ChatController::complete`] attaches the
/// outcome when the network call resolves. Overlapping submissions are fine;
/// replies land in whatever order their calls complete.
#[derive(Clone, Debug, Default)]
pub struct ChatController {
    transcript: Transcript,
    draft: String,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The append-only conversation view
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Current content of the input field
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the input field content
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// First half of a submission.
    ///
    /// A blank (empty or whitespace-only) draft is ignored: nothing is
    /// appended and no text is yielded. Otherwise the trimmed user message is
    /// appended, the draft is cleared, and the text to send is returned, so
    /// the user line is in the transcript before any network call begins.
    pub fn submit(&mut self) -> Option<String> {
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.transcript.push(Message::user(&text));
        self.draft.clear();
        Some(text)
    }

    /// Second half of a submission: attach the outcome of the remote call.
    ///
    /// Success appends the reply as a bot message. Failure appends the fixed
    /// fallback text and writes the distinguishing detail to the diagnostic
    /// log; no error escapes to the caller either way.
    pub fn complete(&mut self, outcome: Result<String>) {
        match outcome {
            Ok(reply) => self.transcript.push(Message::bot(reply)),
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                self.transcript.push(Message::bot(FALLBACK_REPLY));
            }
        }
    }

    /// Run one full submit cycle against an endpoint.
    ///
    /// Returns whether a message was actually sent (a blank draft is not).
    pub async fn exchange(&mut self, endpoint: &dyn ChatEndpoint) -> bool {
        let Some(text) = self.submit() else {
            return false;
        };
        self.complete(endpoint.send(&text).await);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use crate::message::Role;
    use std::sync::Mutex;

    /// Endpoint double: records inbound texts, hands out scripted outcomes.
    struct ScriptedEndpoint {
        calls: Mutex<Vec<String>>,
        outcomes: Mutex<Vec<Result<String>>>,
    }

    impl ScriptedEndpoint {
        fn replying(reply: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                outcomes: Mutex::new(vec![Ok(reply.to_string())]),
            }
        }

        fn failing(error: ChatError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                outcomes: Mutex::new(vec![Err(error)]),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ChatEndpoint for ScriptedEndpoint {
        async fn send(&self, text: &str) -> Result<String> {
            self.calls.lock().unwrap().push(text.to_string());
            self.outcomes.lock().unwrap().pop().expect("no scripted outcome left")
        }
    }

    fn controller_with_draft(text: &str) -> ChatController {
        let mut ctl = ChatController::new();
        ctl.set_draft(text);
        ctl
    }

    #[test]
    fn submit_appends_one_user_message_and_clears_draft() {
        let mut ctl = controller_with_draft("Hi");

        let sent = ctl.submit();

        assert_eq!(sent.as_deref(), Some("Hi"));
        assert!(ctl.draft().is_empty());
        let messages = ctl.transcript().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].text, "Hi");
    }

    #[test]
    fn blank_draft_appends_nothing() {
        for blank in ["", "  ", " \t\n "] {
            let mut ctl = controller_with_draft(blank);
            assert_eq!(ctl.submit(), None);
            assert!(ctl.transcript().is_empty());
        }
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let mut ctl = controller_with_draft("  Hi  ");
        assert_eq!(ctl.submit().as_deref(), Some("Hi"));
        assert_eq!(ctl.transcript().messages()[0].text, "Hi");
    }

    #[tokio::test]
    async fn successful_exchange_appends_the_reply() {
        let endpoint = ScriptedEndpoint::replying("Hello!");
        let mut ctl = controller_with_draft("Hi");

        assert!(ctl.exchange(&endpoint).await);

        // The endpoint saw exactly the submitted text, after the user line
        // was already appended.
        assert_eq!(endpoint.calls(), ["Hi"]);
        let messages = ctl.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Bot);
        assert_eq!(messages[1].text, "Hello!");
    }

    #[tokio::test]
    async fn whitespace_only_exchange_makes_no_call() {
        let endpoint = ScriptedEndpoint::replying("unused");
        let mut ctl = controller_with_draft("  ");

        assert!(!ctl.exchange(&endpoint).await);

        assert!(endpoint.calls().is_empty());
        assert!(ctl.transcript().is_empty());
    }

    #[tokio::test]
    async fn status_failure_renders_the_fallback() {
        let endpoint = ScriptedEndpoint::failing(ChatError::Status { status: 500 });
        let mut ctl = controller_with_draft("Test");

        assert!(ctl.exchange(&endpoint).await);

        let messages = ctl.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Bot);
        assert_eq!(messages[1].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn transport_failure_renders_the_fallback() {
        let endpoint =
            ScriptedEndpoint::failing(ChatError::Network("connection reset".into()));
        let mut ctl = controller_with_draft("Test");

        assert!(ctl.exchange(&endpoint).await);

        assert_eq!(ctl.transcript().last().unwrap().text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn controller_stays_usable_after_a_failure() {
        let failing = ScriptedEndpoint::failing(ChatError::Status { status: 502 });
        let replying = ScriptedEndpoint::replying("Hello!");
        let mut ctl = controller_with_draft("Test");

        ctl.exchange(&failing).await;
        ctl.set_draft("Hi");
        ctl.exchange(&replying).await;

        let texts: Vec<_> = ctl.transcript().messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["Test", FALLBACK_REPLY, "Hi", "Hello!"]);
    }

    #[test]
    fn overlapping_replies_land_in_completion_order() {
        let mut ctl = ChatController::new();
        ctl.set_draft("first");
        let a = ctl.submit().unwrap();
        ctl.set_draft("second");
        let b = ctl.submit().unwrap();

        // The second request resolves before the first; no reordering.
        ctl.complete(Ok(format!("re: {b}")));
        ctl.complete(Ok(format!("re: {a}")));

        let texts: Vec<_> = ctl.transcript().messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "re: second", "re: first"]);
    }
}
