//! Events decoded from client frames.

use serde::Deserialize;

/// A structured event received from a member's connection.
///
/// Frames are JSON objects with a `type` discriminator; only `chat` is
/// understood. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A chat line. `text` may be absent or empty, in which case the event
    /// is dropped by the session.
    Chat {
        /// Message body.
        #[serde(default)]
        text: Option<String>,
    },
}

impl InboundEvent {
    /// Decodes a text frame, returning `None` for anything malformed or
    /// of an unknown type.
    #[must_use]
    pub fn decode(frame: &str) -> Option<Self> {
        serde_json::from_str(frame).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_chat() {
        assert_eq!(
            InboundEvent::decode(r#"{"type":"chat","text":"hi"}"#),
            Some(InboundEvent::Chat {
                text: Some("hi".to_string())
            })
        );
    }

    #[test]
    fn missing_text_decodes_as_none() {
        assert_eq!(
            InboundEvent::decode(r#"{"type":"chat"}"#),
            Some(InboundEvent::Chat { text: None })
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        assert!(InboundEvent::decode(r#"{"type":"chat","text":"a","ts":1}"#).is_some());
    }

    #[test]
    fn malformed_frames_are_rejected() {
        assert!(InboundEvent::decode("not json").is_none());
        assert!(InboundEvent::decode(r#"{"text":"no type"}"#).is_none());
        assert!(InboundEvent::decode(r#"{"type":"typing"}"#).is_none());
        assert!(InboundEvent::decode(r#"{"type":"chat","text":42}"#).is_none());
    }
}
