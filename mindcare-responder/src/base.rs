//! Base trait for responders

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for responder operations
#[derive(Error, Debug)]
pub enum ResponderError {
    #[error("Responder unavailable: {0}")]
    Unavailable(String),

    #[error("Internal responder error: {0}")]
    Internal(String),
}

pub type ResponderResult<T> = Result<T, ResponderError>;

/// A generated assistant reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Reply text to append to the transcript
    pub text: String,
    /// Whether the message that produced this reply contained
    /// self-harm indicators
    pub crisis: bool,
}

impl Reply {
    /// Create a non-crisis reply
    pub fn supportive(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            crisis: false,
        }
    }

    /// Create a crisis reply
    pub fn crisis(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            crisis: true,
        }
    }
}

/// The seam between the chat controller and whatever generates replies.
///
/// Implementations are total over all text input; a returned error means
/// the backend itself was unreachable, not that the message was
/// unclassifiable.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Generate a reply for a user message
    async fn respond(&self, message: &str) -> ResponderResult<Reply>;

    /// Human-readable responder name
    fn name(&self) -> &str;
}
