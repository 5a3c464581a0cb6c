//! Chat message and session models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sender role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// A single chat turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message sender role
    pub role: ChatRole,

    /// Message content
    pub content: String,

    /// When the message was produced; defaults to now when omitted on input
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message timestamped now
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message timestamped now
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A chat transcript scoped to one research plan
///
/// Session identifiers are the plan id plus a random suffix generated per
/// call, so a session currently never outlives a single exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Session identifier (`{plan_id}_{uuid}`)
    pub id: String,

    /// Plan this conversation is about
    pub plan_id: String,

    /// Messages in arrival order
    pub messages: Vec<ChatMessage>,

    /// When the session was opened
    pub created_at: DateTime<Utc>,

    /// When a message was last appended
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Open a new session for a plan with a fresh random suffix
    pub fn new(plan_id: impl Into<String>) -> Self {
        let plan_id = plan_id.into();
        let now = Utc::now();
        Self {
            id: format!("{}_{}", plan_id, uuid::Uuid::new_v4()),
            plan_id,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message, stamping the session as updated
    pub fn push(&mut self, message: ChatMessage) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }
}
