// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat messages stored at `chats/{uid}/{messageId}` and their status
//! transitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Admin,
    #[serde(other)]
    Unknown,
}

/// Delivery status. Moves forward only: sent, delivered, seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Seen,
    #[serde(other)]
    Unknown,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageStatus::Sent => "sent",
            MessageStatus::Delivered => "delivered",
            MessageStatus::Seen => "seen",
            MessageStatus::Unknown => "unknown",
        }
    }
}

/// The fields of a chat message that drive status transitions. Written by
/// clients and the admin panel, so every field may be missing; other
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender: Option<Sender>,
    pub status: Option<MessageStatus>,
}

impl ChatMessage {
    fn is_from_admin(&self) -> bool {
        self.sender == Some(Sender::Admin)
    }
}

/// Multi-path update moving admin messages from `sent` to `delivered`.
///
/// Messages in any other status are left alone.
pub fn delivered_updates(messages: &[(String, ChatMessage)]) -> Map<String, Value> {
    let mut updates = Map::new();
    for (id, message) in messages {
        if message.is_from_admin() && message.status == Some(MessageStatus::Sent) {
            updates.insert(
                format!("{id}/status"),
                Value::from(MessageStatus::Delivered.as_str()),
            );
        }
    }
    updates
}

/// Multi-path update marking every admin message as seen, whatever its
/// current status.
pub fn seen_updates(messages: &[(String, ChatMessage)]) -> Map<String, Value> {
    let mut updates = Map::new();
    for (id, message) in messages.iter().filter(|(_, m)| m.is_from_admin()) {
        updates.insert(
            format!("{id}/status"),
            Value::from(MessageStatus::Seen.as_str()),
        );
        updates.insert(format!("{id}/seen"), Value::Bool(true));
    }
    updates
}

/// A new message from the user, not yet delivered.
pub fn new_user_message(text: &str, timestamp: i64) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("text".to_string(), Value::from(text));
    fields.insert("sender".to_string(), Value::from("user"));
    fields.insert("timestamp".to_string(), Value::from(timestamp));
    fields.insert("isEdited".to_string(), Value::Bool(false));
    fields.insert(
        "status".to_string(),
        Value::from(MessageStatus::Sent.as_str()),
    );
    fields.insert("seen".to_string(), Value::Bool(false));
    fields
}

/// Fields written when a user edits their own message.
pub fn edit_fields(new_text: &str, edit_timestamp: i64) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("text".to_string(), Value::from(new_text));
    fields.insert("isEdited".to_string(), Value::Bool(true));
    fields.insert("editTimestamp".to_string(), Value::from(edit_timestamp));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn msg(sender: Sender, status: MessageStatus) -> ChatMessage {
        ChatMessage {
            sender: Some(sender),
            status: Some(status),
            ..Default::default()
        }
    }

    fn sample() -> Vec<(String, ChatMessage)> {
        vec![
            ("a1".to_string(), msg(Sender::Admin, MessageStatus::Sent)),
            ("a2".to_string(), msg(Sender::Admin, MessageStatus::Delivered)),
            ("a3".to_string(), msg(Sender::Admin, MessageStatus::Seen)),
            ("u1".to_string(), msg(Sender::User, MessageStatus::Sent)),
        ]
    }

    #[test]
    fn delivered_only_touches_sent_admin_messages() {
        let updates = delivered_updates(&sample());
        assert_eq!(Value::Object(updates), json!({ "a1/status": "delivered" }));
    }

    #[test]
    fn seen_touches_every_admin_message() {
        let updates = seen_updates(&sample());
        assert_eq!(
            Value::Object(updates),
            json!({
                "a1/status": "seen", "a1/seen": true,
                "a2/status": "seen", "a2/seen": true,
                "a3/status": "seen", "a3/seen": true
            })
        );
    }

    #[test]
    fn no_admin_messages_means_no_updates() {
        let messages = vec![("u1".to_string(), msg(Sender::User, MessageStatus::Sent))];
        assert!(delivered_updates(&messages).is_empty());
        assert!(seen_updates(&messages).is_empty());
    }

    #[test]
    fn unknown_values_deserialize() {
        let message: ChatMessage = serde_json::from_value(json!({
            "sender": "bot",
            "status": "queued",
            "text": "hi",
            "timestamp": 1700000000000i64
        }))
        .unwrap();

        assert_eq!(message.sender, Some(Sender::Unknown));
        assert_eq!(message.status, Some(MessageStatus::Unknown));
        assert!(delivered_updates(&[("x".to_string(), message)]).is_empty());
    }

    #[test]
    fn new_user_message_starts_as_sent() {
        let fields = new_user_message("hello", 1_700_000_000_000);
        assert_eq!(
            Value::Object(fields.clone()),
            json!({
                "text": "hello",
                "sender": "user",
                "timestamp": 1_700_000_000_000i64,
                "isEdited": false,
                "status": "sent",
                "seen": false
            })
        );

        let message: ChatMessage = serde_json::from_value(Value::Object(fields)).unwrap();
        assert_eq!(message.sender, Some(Sender::User));
        assert_eq!(message.status, Some(MessageStatus::Sent));
    }

    #[test]
    fn edit_fields_shape() {
        assert_eq!(
            Value::Object(edit_fields("hello", 1_700_000_000_123)),
            json!({ "text": "hello", "isEdited": true, "editTimestamp": 1_700_000_000_123i64 })
        );
    }
}
