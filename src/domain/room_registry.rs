//! Process-wide room membership behind a single exclusive lock.
//!
//! [`RoomRegistry`] maps each [`RoomId`] to the connections currently in
//! that room and the display name each joined with. It is the only shared
//! mutable state in the relay and never calls outward.
//!
//! # Invariants
//!
//! - A room entry exists iff it has at least one member; the entry is
//!   removed in the same critical section that removes its last member.
//! - Every operation holds the lock only for an in-memory update or copy.
//!   Callers deliver to members from a [`RoomRegistry::snapshot_members`]
//!   copy, after the lock has been released.

use std::collections::HashMap;

use tokio::sync::Mutex;

use super::{ConnectionHandle, ConnectionId, DisplayName, RoomId};

/// One member of a room: its delivery handle and display name.
#[derive(Debug, Clone)]
pub struct Member {
    /// Delivery target for the member's connection.
    pub handle: ConnectionHandle,
    /// Name the member joined with.
    pub name: DisplayName,
}

type Rooms = HashMap<RoomId, HashMap<ConnectionId, Member>>;

/// Room membership registry.
///
/// Instantiate once per process and share via `Arc`; tests may create as
/// many isolated instances as they like.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: Mutex<Rooms>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Adds a connection to `room`, creating the room if needed.
    ///
    /// Callers join each accepted connection exactly once.
    pub async fn join(&self, room: &RoomId, handle: ConnectionHandle, name: DisplayName) {
        let conn = handle.id();
        let mut rooms = self.rooms.lock().await;
        let members = rooms.entry(room.clone()).or_default();
        if members.insert(conn, Member { handle, name }).is_some() {
            tracing::warn!(%room, %conn, "connection joined the same room twice");
        }
    }

    /// Removes a connection from `room` and returns the name it joined
    /// with, or `None` if it was not a member. Removes the room when it
    /// becomes empty.
    pub async fn leave(&self, room: &RoomId, conn: ConnectionId) -> Option<DisplayName> {
        let mut rooms = self.rooms.lock().await;
        let members = rooms.get_mut(room)?;
        let removed = members.remove(&conn)?;
        if members.is_empty() {
            rooms.remove(room);
            tracing::debug!(%room, "room emptied and removed");
        }
        Some(removed.name)
    }

    /// Returns a copy of the current members of `room`; empty if the room
    /// does not exist.
    pub async fn snapshot_members(&self, room: &RoomId) -> Vec<Member> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns `true` if `room` currently has at least one member.
    pub async fn contains_room(&self, room: &RoomId) -> bool {
        self.rooms.lock().await.contains_key(room)
    }

    /// Returns the number of live rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }

    /// Returns the number of connections across all rooms.
    pub async fn connection_count(&self) -> usize {
        self.rooms.lock().await.values().map(HashMap::len).sum()
    }
}
