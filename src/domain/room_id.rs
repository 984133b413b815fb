//! Room identifiers and display names.
//!
//! [`RoomId`] is an opaque, non-empty string key. Rooms are never
//! pre-registered; any non-empty string is a valid key, and
//! [`RoomId::generate`] hands out fresh random ones for `POST /rooms`.
//! [`DisplayName`] is the non-unique, non-empty label a member joins with.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Alphabet used by [`RoomId::generate`].
const ROOM_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Opaque key identifying a room.
///
/// Guaranteed non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Validates and wraps a client-supplied room key.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidRoomId`] if `raw` is empty.
    pub fn parse(raw: impl Into<String>) -> Result<Self, RelayError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(RelayError::InvalidRoomId("room id must not be empty".to_string()));
        }
        Ok(Self(raw))
    }

    /// Generates a fresh random room id of `len` characters drawn from
    /// `[a-z0-9]`. A `len` of zero is bumped to one.
    ///
    /// Randomness comes from UUID v4 bytes; collisions are not checked
    /// since an existing room is simply joined.
    #[must_use]
    pub fn generate(len: usize) -> Self {
        let len = len.max(1);
        let mut out = String::with_capacity(len);
        while out.len() < len {
            let bytes = uuid::Uuid::new_v4().into_bytes();
            for b in bytes {
                if out.len() == len {
                    break;
                }
                let idx = usize::from(b) % ROOM_ID_ALPHABET.len();
                if let Some(&c) = ROOM_ID_ALPHABET.get(idx) {
                    out.push(char::from(c));
                }
            }
        }
        Self(out)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name a member joins a room with.
///
/// Names are not unique: two connections may share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validates and wraps a client-supplied display name.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidName`] if `raw` is empty.
    pub fn parse(raw: impl Into<String>) -> Result<Self, RelayError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(RelayError::InvalidName("name must not be empty".to_string()));
        }
        Ok(Self(raw))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_room_id_is_rejected() {
        assert!(matches!(
            RoomId::parse(""),
            Err(RelayError::InvalidRoomId(_))
        ));
    }

    #[test]
    fn any_non_empty_room_id_is_accepted() {
        let Ok(id) = RoomId::parse("my room/#1") else {
            panic!("expected valid room id");
        };
        assert_eq!(id.as_str(), "my room/#1");
    }

    #[test]
    fn generated_ids_use_alphabet_and_length() {
        let id = RoomId::generate(8);
        assert_eq!(id.as_str().len(), 8);
        assert!(
            id.as_str()
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        );
    }

    #[test]
    fn generated_ids_longer_than_a_uuid() {
        let id = RoomId::generate(40);
        assert_eq!(id.as_str().len(), 40);
    }

    #[test]
    fn zero_length_is_bumped() {
        assert_eq!(RoomId::generate(0).as_str().len(), 1);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(RoomId::generate(16), RoomId::generate(16));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            DisplayName::parse(""),
            Err(RelayError::InvalidName(_))
        ));
    }

    #[test]
    fn serializes_as_plain_string() {
        let Ok(name) = DisplayName::parse("Alice") else {
            panic!("expected valid name");
        };
        let json = serde_json::to_string(&name).ok();
        assert_eq!(json.as_deref(), Some("\"Alice\""));
    }
}
