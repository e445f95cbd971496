//! Session state machine
//!
//! One `SessionState` owns the transcript for one chat screen visit and
//! is mutated only through the transitions below. The `typing` flag is
//! the single-flight gate: while a reply is in flight, new submissions
//! are dropped, never queued.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::store::{Message, Session};

/// Outcome of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// The user message was appended and a reply is now expected
    Accepted,
    /// Input was empty or whitespace-only; nothing was appended
    RejectedBlank,
    /// A reply is already in flight; the submission was dropped
    Busy,
}

/// Mutable state of one chat session
#[derive(Debug, Default)]
pub struct SessionState {
    session: Option<Session>,
    transcript: Vec<Message>,
    typing: bool,
    crisis_alert: bool,
}

impl SessionState {
    /// Create an uninitialized session state
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the session and append the fixed welcome message.
    ///
    /// Errors if the session was already started.
    pub fn start(&mut self, welcome: impl Into<String>) -> crate::Result<&Session> {
        if self.session.is_some() {
            return Err(crate::Error::Session(
                "session already started".to_string(),
            ));
        }

        let session = Session::new();
        debug!(session_id = %session.id, "session started");
        self.transcript.push(Message::assistant(welcome));
        self.session = Some(session);
        Ok(self.session.as_ref().expect("session just set"))
    }

    /// Submit user input.
    ///
    /// Blank input is rejected before dispatch and a submission while a
    /// reply is in flight is dropped. On acceptance the user message is
    /// appended and the typing gate is held until [`complete`] or
    /// [`fail`] releases it.
    ///
    /// Errors if no session is active (caller precondition).
    ///
    /// [`complete`]: SessionState::complete
    /// [`fail`]: SessionState::fail
    pub fn begin_submit(&mut self, input: &str) -> crate::Result<SubmitOutcome> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| crate::Error::Session("no active session".to_string()))?;
        if !session.active {
            return Err(crate::Error::Session("session has ended".to_string()));
        }

        if input.trim().is_empty() {
            return Ok(SubmitOutcome::RejectedBlank);
        }
        if self.typing {
            debug!("submission dropped: reply already in flight");
            return Ok(SubmitOutcome::Busy);
        }

        self.transcript.push(Message::user(input));
        self.typing = true;
        Ok(SubmitOutcome::Accepted)
    }

    /// Append the assistant reply for the in-flight submission and
    /// release the typing gate. A crisis reply latches the crisis alert
    /// until [`dismiss_crisis_alert`] clears it.
    ///
    /// [`dismiss_crisis_alert`]: SessionState::dismiss_crisis_alert
    pub fn complete(&mut self, reply: impl Into<String>, crisis: bool) -> crate::Result<()> {
        if !self.typing {
            return Err(crate::Error::Session(
                "no submission in flight".to_string(),
            ));
        }

        self.transcript.push(Message::assistant(reply));
        self.typing = false;
        if crisis {
            self.crisis_alert = true;
        }
        Ok(())
    }

    /// Append the fixed connection-trouble message for a failed reply
    /// and release the typing gate so the user can resubmit.
    pub fn fail(&mut self, fallback: impl Into<String>) -> crate::Result<()> {
        if !self.typing {
            return Err(crate::Error::Session(
                "no submission in flight".to_string(),
            ));
        }

        self.transcript.push(Message::assistant(fallback));
        self.typing = false;
        Ok(())
    }

    /// Dismiss the sticky crisis alert
    pub fn dismiss_crisis_alert(&mut self) {
        self.crisis_alert = false;
    }

    /// End the session. The transcript stays readable but no further
    /// submissions are accepted.
    pub fn end(&mut self) {
        if let Some(session) = self.session.as_mut() {
            debug!(session_id = %session.id, "session ended");
            session.active = false;
        }
        self.typing = false;
    }

    /// The active session, if started
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The append-only transcript
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Whether a reply is currently in flight
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Whether the crisis alert is currently asserted
    pub fn crisis_alert(&self) -> bool {
        self.crisis_alert
    }
}
