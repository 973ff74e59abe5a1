//! Chat session and participant entities.
//!
//! Both are persisted through the generic storage context, keyed by a
//! string id (a v7 UUID rendered as text when created here).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::StorageEntity;

/// Default balance between short-term and long-term memory for new chats.
pub const DEFAULT_MEMORY_BALANCE: f32 = 0.5;

/// A chat session. Memories are tagged with its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    /// System prompt text configured for this chat.
    #[serde(default)]
    pub system_description: String,
    #[serde(default = "default_memory_balance")]
    pub memory_balance: f32,
    pub created_on: DateTime<Utc>,
}

fn default_memory_balance() -> f32 {
    DEFAULT_MEMORY_BALANCE
}

impl ChatSession {
    /// Create a new session with a freshly generated id.
    pub fn new(title: impl Into<String>, system_description: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            system_description: system_description.into(),
            memory_balance: DEFAULT_MEMORY_BALANCE,
            created_on: Utc::now(),
        }
    }
}

impl StorageEntity for ChatSession {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Membership of a user in a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatParticipant {
    pub id: String,
    pub user_id: String,
    pub chat_id: String,
}

impl ChatParticipant {
    pub fn new(user_id: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            user_id: user_id.into(),
            chat_id: chat_id.into(),
        }
    }
}

impl StorageEntity for ChatParticipant {
    fn id(&self) -> &str {
        &self.id
    }

    fn partition(&self) -> &str {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_uuid_id() {
        let session = ChatSession::new("Planning", "You are helpful.");
        assert!(Uuid::parse_str(&session.id).is_ok());
        assert_eq!(session.title, "Planning");
        assert_eq!(session.memory_balance, DEFAULT_MEMORY_BALANCE);
    }

    #[test]
    fn test_session_deserialize_fills_defaults() {
        let json = r#"{"id":"c1","title":"t","created_on":"2024-01-01T00:00:00Z"}"#;
        let session: ChatSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, "c1");
        assert!(session.system_description.is_empty());
        assert_eq!(session.memory_balance, DEFAULT_MEMORY_BALANCE);
    }

    #[test]
    fn test_participant_partition_is_user() {
        let participant = ChatParticipant::new("user-1", "chat-1");
        assert_eq!(participant.partition(), "user-1");
        assert_ne!(participant.id(), "user-1");
    }
}
