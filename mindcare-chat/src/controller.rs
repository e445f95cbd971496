//! The chat controller: single writer of the session transcript

use std::sync::Arc;
use tracing::{debug, info, warn};

use mindcare_core::config::AssistantConfig;
use mindcare_core::session::{Message, Session, SessionState, SubmitOutcome};
use mindcare_core::utils::truncate;
use mindcare_responder::{Reply, Responder};

/// Fixed welcome message appended when a session starts
pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI mental health assistant. I'm here to provide support, coping strategies, and a safe space to talk about what's on your mind. How are you feeling today?";

/// Outcome of a send attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The submission was accepted and this reply was appended
    Replied(Reply),
    /// Input was blank; nothing happened
    RejectedBlank,
    /// A reply was already in flight; the submission was dropped
    Busy,
}

/// Sequences one chat session against a responder.
///
/// The controller is the transcript's only writer. Submissions made
/// while a reply is in flight are dropped, and a responder failure is
/// surfaced as a fixed hotline message rather than an error, so a user
/// can always resubmit.
pub struct ChatController {
    state: SessionState,
    responder: Arc<dyn Responder>,
    welcome: String,
    fallback: String,
}

impl ChatController {
    /// Create a controller with the default welcome message and hotline
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self {
            state: SessionState::new(),
            responder,
            welcome: WELCOME_MESSAGE.to_string(),
            fallback: fallback_message("988"),
        }
    }

    /// Create a controller from assistant configuration
    pub fn from_config(responder: Arc<dyn Responder>, config: &AssistantConfig) -> Self {
        Self {
            state: SessionState::new(),
            responder,
            welcome: config
                .welcome
                .clone()
                .unwrap_or_else(|| WELCOME_MESSAGE.to_string()),
            fallback: fallback_message(&config.hotline),
        }
    }

    /// Start the session, appending the welcome message
    pub fn start(&mut self) -> mindcare_core::Result<()> {
        let welcome = self.welcome.clone();
        let session = self.state.start(welcome)?;
        info!(session_id = %session.id, responder = self.responder.name(), "chat session started");
        Ok(())
    }

    /// Submit user input and, if accepted, wait for the reply.
    ///
    /// Errors only on precondition violations (no active session);
    /// responder failures come back as a `Replied` fallback message.
    pub async fn send(&mut self, input: &str) -> mindcare_core::Result<SendOutcome> {
        match self.state.begin_submit(input)? {
            SubmitOutcome::RejectedBlank => return Ok(SendOutcome::RejectedBlank),
            SubmitOutcome::Busy => return Ok(SendOutcome::Busy),
            SubmitOutcome::Accepted => {}
        }

        debug!(preview = %truncate(input, 80), "processing submission");
        match self.responder.respond(input).await {
            Ok(reply) => {
                self.state.complete(reply.text.clone(), reply.crisis)?;
                if reply.crisis {
                    info!("crisis indicators detected, alert raised");
                }
                Ok(SendOutcome::Replied(reply))
            }
            Err(err) => {
                warn!(error = %err, "responder failed, appending fallback");
                self.state.fail(self.fallback.clone())?;
                Ok(SendOutcome::Replied(Reply::supportive(
                    self.fallback.clone(),
                )))
            }
        }
    }

    /// End the session
    pub fn end(&mut self) {
        self.state.end();
    }

    /// Dismiss the sticky crisis alert
    pub fn dismiss_crisis_alert(&mut self) {
        self.state.dismiss_crisis_alert();
    }

    /// The active session, if started
    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    /// The transcript so far
    pub fn transcript(&self) -> &[Message] {
        self.state.transcript()
    }

    /// Whether a reply is in flight
    pub fn is_typing(&self) -> bool {
        self.state.is_typing()
    }

    /// Whether the crisis alert is asserted
    pub fn crisis_alert(&self) -> bool {
        self.state.crisis_alert()
    }

    /// Name of the underlying responder
    pub fn responder_name(&self) -> &str {
        self.responder.name()
    }
}

fn fallback_message(hotline: &str) -> String {
    format!(
        "I'm sorry, I'm having trouble connecting right now. Please try again in a moment, or if this is urgent, please contact the crisis hotline at {}.",
        hotline
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mindcare_core::session::Sender;
    use mindcare_responder::{
        DelayPolicy, ResponderError, ResponderResult, ScriptedResponder,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn controller() -> ChatController {
        let responder = Arc::new(ScriptedResponder::with_seed(DelayPolicy::zero(), 7));
        let mut controller = ChatController::new(responder);
        controller.start().unwrap();
        controller
    }

    /// Counts respond() calls so tests can assert the classifier was
    /// never dispatched.
    struct CountingResponder {
        calls: AtomicUsize,
        inner: ScriptedResponder,
    }

    impl CountingResponder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                inner: ScriptedResponder::with_seed(DelayPolicy::zero(), 7),
            }
        }
    }

    #[async_trait]
    impl Responder for CountingResponder {
        async fn respond(&self, message: &str) -> ResponderResult<Reply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.respond(message).await
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct FailingResponder;

    #[async_trait]
    impl Responder for FailingResponder {
        async fn respond(&self, _message: &str) -> ResponderResult<Reply> {
            Err(ResponderError::Unavailable("backend is down".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let mut controller = controller();

        // Session starts with only the welcome message
        let transcript = controller.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].content, WELCOME_MESSAGE);

        // Sleep-themed message gets the fixed sleep response, no alert
        let outcome = controller
            .send("I can't sleep, feeling tired")
            .await
            .unwrap();
        match outcome {
            SendOutcome::Replied(reply) => {
                assert!(!reply.crisis);
                assert!(reply.text.starts_with("Sleep struggles"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(controller.transcript().len(), 3);
        assert!(!controller.crisis_alert());

        // Crisis message raises the sticky alert
        let outcome = controller.send("I want to die").await.unwrap();
        match outcome {
            SendOutcome::Replied(reply) => assert!(reply.crisis),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(controller.transcript().len(), 5);
        assert!(controller.crisis_alert());

        // Alert stays asserted across later exchanges
        controller.send("thank you").await.unwrap();
        assert!(controller.crisis_alert());

        controller.dismiss_crisis_alert();
        assert!(!controller.crisis_alert());
    }

    #[tokio::test]
    async fn test_transcript_shape_after_n_sends() {
        let mut controller = controller();
        for i in 0..4 {
            controller.send(&format!("message {}", i)).await.unwrap();
        }

        let transcript = controller.transcript();
        assert_eq!(transcript.len(), 9);
        assert_eq!(transcript[0].sender, Sender::Assistant);
        for pair in transcript[1..].chunks(2) {
            assert_eq!(pair[0].sender, Sender::User);
            assert_eq!(pair[1].sender, Sender::Assistant);
        }
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_responder() {
        let responder = Arc::new(CountingResponder::new());
        let mut controller = ChatController::new(responder.clone());
        controller.start().unwrap();

        assert_eq!(
            controller.send("   ").await.unwrap(),
            SendOutcome::RejectedBlank
        );
        assert_eq!(controller.send("").await.unwrap(), SendOutcome::RejectedBlank);

        assert_eq!(responder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_send_before_start_is_an_error() {
        let responder = Arc::new(ScriptedResponder::with_seed(DelayPolicy::zero(), 7));
        let mut controller = ChatController::new(responder);
        assert!(controller.send("hello").await.is_err());
    }

    #[tokio::test]
    async fn test_responder_failure_appends_fallback_and_recovers() {
        let mut controller = ChatController::new(Arc::new(FailingResponder));
        controller.start().unwrap();

        let outcome = controller.send("hello").await.unwrap();
        match outcome {
            SendOutcome::Replied(reply) => {
                assert!(!reply.crisis);
                assert!(reply.text.contains("crisis hotline at 988"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        // Gate released: the next submission is accepted again
        assert!(!controller.is_typing());
        let outcome = controller.send("are you back?").await.unwrap();
        assert!(matches!(outcome, SendOutcome::Replied(_)));
        assert_eq!(controller.transcript().len(), 5);
    }

    #[tokio::test]
    async fn test_config_overrides_welcome_and_hotline() {
        let config = AssistantConfig {
            welcome: Some("Hi, this is a safe space.".to_string()),
            hotline: "116 123".to_string(),
            ..Default::default()
        };
        let mut controller =
            ChatController::from_config(Arc::new(FailingResponder), &config);
        controller.start().unwrap();

        assert_eq!(
            controller.transcript()[0].content,
            "Hi, this is a safe space."
        );

        let outcome = controller.send("hello").await.unwrap();
        match outcome {
            SendOutcome::Replied(reply) => {
                assert!(reply.text.contains("crisis hotline at 116 123"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
