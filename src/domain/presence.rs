//! Read-only presence view derived from the registry.

use super::room_registry::Member;
use super::{RoomId, RoomRegistry};

/// Extracts display names from a member snapshot, keeping duplicates.
#[must_use]
pub fn names(members: &[Member]) -> Vec<String> {
    members.iter().map(|m| m.name.to_string()).collect()
}

/// Returns the display names of everyone currently in `room`.
///
/// Empty if the room does not exist.
pub async fn presence(registry: &RoomRegistry, room: &RoomId) -> Vec<String> {
    names(&registry.snapshot_members(room).await)
}
