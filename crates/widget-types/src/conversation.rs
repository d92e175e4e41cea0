use serde::{Deserialize, Serialize};
use crate::message::Message;

/// A persisted conversation thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub name: String,
    pub messages: Vec<Message>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    /// Set semantics by exact string equality, insertion order preserved
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stats: ConversationStats,
}

impl Conversation {
    pub fn new(id: String, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            messages: Vec::new(),
            pinned: false,
            archived: false,
            tags: Vec::new(),
            stats: ConversationStats::default(),
        }
    }

    /// Timestamp of the most recent message, if any
    pub fn last_activity(&self) -> Option<&str> {
        self.messages.last().map(|m| m.timestamp.as_str())
    }
}

/// Aggregate statistics derived from a conversation's message sequence.
/// Never mutated directly — recomputed after every message-set change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationStats {
    pub message_count: usize,
    pub user_message_count: usize,
    pub assistant_message_count: usize,
    /// Mean elapsed time between a user message and the immediately
    /// following assistant reply, in milliseconds; 0 when no such pair exists
    pub average_response_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<String>,
}
