//! Outbound messages fanned out to room members.
//!
//! The JSON shape of [`RoomMessage`] is the wire contract existing clients
//! depend on: a `type` discriminator (`system`, `presence`, `chat`) plus
//! the variant fields `message`, `users`, and `name`/`text`/`ts`.

use chrono::Utc;
use serde::Serialize;

use super::DisplayName;

/// A message broadcast to every member of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomMessage {
    /// Server notice such as `"Alice joined"`.
    System {
        /// Notice text.
        message: String,
    },

    /// Current roster of display names. Order is not meaningful and
    /// duplicate names are kept.
    Presence {
        /// Display names of the current members.
        users: Vec<String>,
    },

    /// Chat line sent by a member.
    Chat {
        /// Sender's display name.
        name: String,
        /// Message body.
        text: String,
        /// Unix timestamp in milliseconds, assigned at broadcast time.
        ts: i64,
    },
}

impl RoomMessage {
    /// Builds the arrival notice for `name`.
    #[must_use]
    pub fn joined(name: &DisplayName) -> Self {
        Self::System {
            message: format!("{name} joined"),
        }
    }

    /// Builds the departure notice for `name`.
    #[must_use]
    pub fn left(name: &DisplayName) -> Self {
        Self::System {
            message: format!("{name} left"),
        }
    }

    /// Builds a chat message stamped with the current wall-clock time.
    #[must_use]
    pub fn chat(sender: &DisplayName, text: impl Into<String>) -> Self {
        Self::Chat {
            name: sender.to_string(),
            text: text.into(),
            ts: Utc::now().timestamp_millis(),
        }
    }

    /// Returns the wire discriminator of this message.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::System { .. } => "system",
            Self::Presence { .. } => "presence",
            Self::Chat { .. } => "chat",
        }
    }

    /// Encodes the message as a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if encoding fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn name(raw: &str) -> DisplayName {
        let Ok(n) = DisplayName::parse(raw) else {
            panic!("valid name");
        };
        n
    }

    fn to_value(msg: &RoomMessage) -> serde_json::Value {
        let Ok(v) = serde_json::to_value(msg) else {
            panic!("serialization failed");
        };
        v
    }

    #[test]
    fn system_wire_shape() {
        let v = to_value(&RoomMessage::joined(&name("Bob")));
        assert_eq!(
            v,
            serde_json::json!({"type": "system", "message": "Bob joined"})
        );
    }

    #[test]
    fn left_notice_text() {
        let RoomMessage::System { message } = RoomMessage::left(&name("Bob")) else {
            panic!("expected system message");
        };
        assert_eq!(message, "Bob left");
    }

    #[test]
    fn presence_wire_shape() {
        let msg = RoomMessage::Presence {
            users: vec!["Alice".to_string(), "Alice".to_string()],
        };
        assert_eq!(
            to_value(&msg),
            serde_json::json!({"type": "presence", "users": ["Alice", "Alice"]})
        );
    }

    #[test]
    fn chat_wire_shape() {
        let msg = RoomMessage::chat(&name("Alice"), "hi");
        let v = to_value(&msg);
        assert_eq!(v.get("type").and_then(|t| t.as_str()), Some("chat"));
        assert_eq!(v.get("name").and_then(|t| t.as_str()), Some("Alice"));
        assert_eq!(v.get("text").and_then(|t| t.as_str()), Some("hi"));
        assert!(v.get("ts").and_then(serde_json::Value::as_i64).is_some_and(|ts| ts > 0));
    }

    #[test]
    fn kind_matches_discriminator() {
        assert_eq!(RoomMessage::joined(&name("x")).kind(), "system");
        assert_eq!(RoomMessage::Presence { users: vec![] }.kind(), "presence");
        assert_eq!(RoomMessage::chat(&name("x"), "y").kind(), "chat");
    }
}
