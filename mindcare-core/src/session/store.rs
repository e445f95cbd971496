//! Session data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single transcript message, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Opaque message id
    pub id: Uuid,
    /// Message text content
    pub content: String,
    /// Message author
    pub sender: Sender,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, content)
    }
}

/// A chat session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session id
    pub id: Uuid,
    /// Whether the session accepts input
    pub active: bool,
    /// Session creation time
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Create a new active session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            active: true,
            started_at: Utc::now(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_active() {
        let session = Session::new();
        assert!(session.active);
    }

    #[test]
    fn test_message_constructors() {
        let user = Message::user("Hello");
        let assistant = Message::assistant("Hi there");

        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.content, "Hello");
        assert_eq!(assistant.sender, Sender::Assistant);
        assert_ne!(user.id, assistant.id);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sender::User).unwrap(),
            r#""user""#
        );
        assert_eq!(
            serde_json::to_string(&Sender::Assistant).unwrap(),
            r#""assistant""#
        );
    }
}
