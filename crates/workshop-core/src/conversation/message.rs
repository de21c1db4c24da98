//! Message types for conversation representation.
//!
//! Messages arrive from the server as a flat, ordered list. Only
//! `message_id` and `parent_message_id` carry structure; everything else is
//! payload that the tree, path and layout code never interprets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Who sent a message
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SenderRole {
    User,
    Assistant,
    System,
    Tool,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A single chat message as delivered by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub message_id: String,
    #[serde(default)]
    pub parent_message_id: Option<String>,
    #[serde(default)]
    pub sender_role: SenderRole,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields the server sends that this crate does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Message {
    pub fn new(
        message_id: impl Into<String>,
        parent_message_id: Option<&str>,
        sender_role: SenderRole,
        content: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            parent_message_id: parent_message_id.map(String::from),
            sender_role,
            content: content.into(),
            created_at: None,
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.message_id
    }

    pub fn parent_message_id(&self) -> Option<&str> {
        self.parent_message_id.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.parent_message_id.is_none()
    }

    /// First line of the content, cut to `max_chars` characters.
    pub fn preview(&self, max_chars: usize) -> String {
        let first_line = self.content.lines().next().unwrap_or_default().trim();
        if first_line.chars().count() <= max_chars {
            first_line.to_string()
        } else {
            let mut cut: String = first_line.chars().take(max_chars).collect();
            cut.push('…');
            cut
        }
    }
}

/// The two shapes a chat message listing arrives in.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageListing {
    Bare(Vec<Message>),
    Envelope { messages: Vec<Message> },
}

impl MessageListing {
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            MessageListing::Bare(messages) | MessageListing::Envelope { messages } => messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn deserializes_server_message_with_extra_fields() {
        let raw = r#"{
            "message_id": "m2",
            "parent_message_id": "m1",
            "sender_role": "assistant",
            "content": "Hello there",
            "created_at": "2025-03-01T10:00:00Z",
            "model": "gpt-4o",
            "token_count": 12
        }"#;

        let message: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(message.id(), "m2");
        assert_eq!(message.parent_message_id(), Some("m1"));
        assert_eq!(message.sender_role, SenderRole::Assistant);
        assert!(message.created_at.is_some());
        assert_eq!(message.extra.get("model"), Some(&serde_json::json!("gpt-4o")));
        assert_eq!(message.extra.get("token_count"), Some(&serde_json::json!(12)));
    }

    #[test]
    fn null_and_missing_parent_both_mean_root() {
        let with_null: Message =
            serde_json::from_str(r#"{"message_id": "a", "parent_message_id": null}"#).unwrap();
        let without: Message = serde_json::from_str(r#"{"message_id": "b"}"#).unwrap();

        assert!(with_null.is_root());
        assert!(without.is_root());
        assert_eq!(without.sender_role, SenderRole::Unknown);
        assert_eq!(without.content, "");
    }

    #[test]
    fn unknown_role_is_tolerated() {
        let message: Message =
            serde_json::from_str(r#"{"message_id": "a", "sender_role": "moderator"}"#).unwrap();
        assert_eq!(message.sender_role, SenderRole::Unknown);
    }

    #[test]
    fn role_display_round_trips_through_from_str() {
        assert_eq!(SenderRole::Assistant.to_string(), "assistant");
        assert_eq!(SenderRole::from_str("tool").unwrap(), SenderRole::Tool);
    }

    #[test]
    fn listing_accepts_bare_array_and_envelope() {
        let bare: MessageListing =
            serde_json::from_str(r#"[{"message_id": "a"}, {"message_id": "b"}]"#).unwrap();
        let envelope: MessageListing =
            serde_json::from_str(r#"{"messages": [{"message_id": "a"}]}"#).unwrap();

        assert_eq!(bare.into_messages().len(), 2);
        assert_eq!(envelope.into_messages().len(), 1);
    }

    #[test]
    fn preview_uses_first_line_and_truncates() {
        let message = Message::new("a", None, SenderRole::User, "What is Rust?\nMore detail");
        assert_eq!(message.preview(40), "What is Rust?");
        assert_eq!(message.preview(4), "What…");
    }
}
