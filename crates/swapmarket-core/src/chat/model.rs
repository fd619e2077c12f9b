//! Conversation and message domain models.
//!
//! These are the "pure" domain models the conversation state machine
//! operates on, independent of any transport. Timestamps are ISO 8601
//! strings as delivered by the server; lexicographic order on them is
//! chronological order.

use serde::{Deserialize, Serialize};

/// The payload kind of a message. Only `Text` is exercised by the
/// client logic today; the other kinds pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    File,
}

/// A single message in a two-party conversation.
///
/// A message belongs to exactly one conversation; membership is established
/// by the fetch that produced it, not by a stored foreign key. `is_read` is
/// the only field mutated in place after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier (server-assigned, opaque)
    pub id: String,
    pub text: String,
    pub sender_id: String,
    pub receiver_id: String,
    /// Creation time (ISO 8601)
    pub timestamp: String,
    pub is_read: bool,
    #[serde(default, rename = "type")]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// A two-party message thread, optionally tied to a product listing.
///
/// The client holds a read-through cache of these, replaced wholesale on
/// each full-list fetch. `last_message` is a denormalized copy for list
/// display; `unread_count` counts messages sent to the current user that
/// have not been acknowledged as read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique conversation identifier (server-assigned, stable)
    pub id: String,
    /// Exactly two user identifiers
    pub participants: Vec<String>,
    #[serde(default)]
    pub last_message: Option<Message>,
    #[serde(default)]
    pub unread_count: u32,
    /// Most recent activity (ISO 8601); conversation lists sort on this,
    /// descending
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl Conversation {
    /// Resolves the counterpart of `current_user_id` in this conversation.
    ///
    /// Returns `None` when the current user is in neither participant slot;
    /// callers treat that as an unknown counterpart rather than an error.
    pub fn other_participant(&self, current_user_id: &str) -> Option<&str> {
        if !self.participants.iter().any(|p| p == current_user_id) {
            return None;
        }
        self.participants
            .iter()
            .find(|p| *p != current_user_id)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(participants: &[&str]) -> Conversation {
        Conversation {
            id: "c1".to_string(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            last_message: None,
            unread_count: 0,
            updated_at: "2026-08-01T10:00:00Z".to_string(),
            product_id: None,
        }
    }

    #[test]
    fn other_participant_resolves_both_ways() {
        let conv = conversation(&["u1", "u2"]);
        assert_eq!(conv.other_participant("u1"), Some("u2"));
        assert_eq!(conv.other_participant("u2"), Some("u1"));
    }

    #[test]
    fn other_participant_unknown_when_user_absent() {
        let conv = conversation(&["u1", "u2"]);
        assert_eq!(conv.other_participant("u3"), None);
    }

    #[test]
    fn message_kind_defaults_to_text() {
        let json = r#"{
            "id": "m1",
            "text": "hi",
            "senderId": "u1",
            "receiverId": "u2",
            "timestamp": "2026-08-01T10:00:00Z",
            "isRead": false
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.kind, MessageKind::Text);
        assert!(msg.metadata.is_none());
    }

    #[test]
    fn conversation_wire_form_round_trips() {
        let json = r#"{
            "id": "c9",
            "participants": ["u1", "u2"],
            "lastMessage": {
                "id": "m1",
                "text": "sold?",
                "senderId": "u2",
                "receiverId": "u1",
                "timestamp": "2026-08-01T10:00:00Z",
                "isRead": true,
                "type": "text"
            },
            "unreadCount": 3,
            "updatedAt": "2026-08-01T10:00:00Z",
            "productId": "p7"
        }"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.unread_count, 3);
        assert_eq!(conv.product_id.as_deref(), Some("p7"));
        assert_eq!(conv.last_message.as_ref().unwrap().sender_id, "u2");
    }
}
