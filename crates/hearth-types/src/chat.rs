//! Chat and message types for Hearth.
//!
//! A `Chat` is a titled, ordered conversation owned by one user. A
//! `ChatMessage` is one immutable turn within it, authored by either the
//! user or the assistant -- exactly two variants, not a free-form role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who wrote a message.
///
/// Maps to the `is_user` column in SQLite:
/// `CHECK (is_user IN (0, 1))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageAuthor {
    User,
    Assistant,
}

impl MessageAuthor {
    /// Column value for the `is_user` flag.
    pub fn is_user(self) -> bool {
        matches!(self, MessageAuthor::User)
    }

    /// Build an author from the `is_user` flag.
    pub fn from_is_user(is_user: bool) -> Self {
        if is_user {
            MessageAuthor::User
        } else {
            MessageAuthor::Assistant
        }
    }
}

impl fmt::Display for MessageAuthor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageAuthor::User => write!(f, "user"),
            MessageAuthor::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageAuthor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageAuthor::User),
            "assistant" => Ok(MessageAuthor::Assistant),
            other => Err(format!("invalid message author: '{other}'")),
        }
    }
}

/// A single immutable message within a chat.
///
/// Messages are ordered by `created_at` within a chat. There is no edit or
/// single-message delete operation; messages disappear only when their chat
/// is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub content: String,
    pub author: MessageAuthor,
    pub created_at: DateTime<Utc>,
}

/// A titled conversation owned by one user.
///
/// `updated_at` is bumped on every message append and on rename; the chat
/// list is always presented most-recently-updated first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Messages in chronological order.
    pub messages: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_roundtrip() {
        for author in [MessageAuthor::User, MessageAuthor::Assistant] {
            let s = author.to_string();
            let parsed: MessageAuthor = s.parse().unwrap();
            assert_eq!(author, parsed);
        }
    }

    #[test]
    fn test_author_is_user_flag() {
        assert!(MessageAuthor::User.is_user());
        assert!(!MessageAuthor::Assistant.is_user());
        assert_eq!(MessageAuthor::from_is_user(true), MessageAuthor::User);
        assert_eq!(MessageAuthor::from_is_user(false), MessageAuthor::Assistant);
    }

    #[test]
    fn test_author_serde() {
        let json = serde_json::to_string(&MessageAuthor::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageAuthor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageAuthor::Assistant);
    }

    #[test]
    fn test_chat_serialize() {
        let chat = Chat {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            title: "Evening check-in".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            messages: vec![ChatMessage {
                id: Uuid::now_v7(),
                chat_id: Uuid::now_v7(),
                content: "hi".to_string(),
                author: MessageAuthor::User,
                created_at: Utc::now(),
            }],
        };
        let json = serde_json::to_string(&chat).unwrap();
        assert!(json.contains("\"author\":\"user\""));
        assert!(json.contains("Evening check-in"));
    }
}
