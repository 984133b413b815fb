//! Per-connection session lifecycle: `unjoined → active → closed`.
//!
//! A [`Session`] owns one connection's membership and drives the registry
//! and broadcaster in the order observers expect:
//!
//! - join: register, then `"<name> joined"`, then the refreshed roster.
//! - chat: one `chat` broadcast per non-empty inbound text, in arrival
//!   order.
//! - close: leave, then `"<name> left"` and the refreshed roster, only if
//!   the connection was actually a member.

use crate::domain::{ConnectionHandle, DisplayName, InboundEvent, RoomId, RoomMessage};
use crate::error::RelayError;

use super::Broadcaster;

/// Observable lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepted but not yet in a room.
    Unjoined,
    /// Member of a room.
    Active,
    /// Terminated. Terminal.
    Closed,
}

#[derive(Debug)]
enum State {
    Unjoined,
    Active { room: RoomId, name: DisplayName },
    Closed,
}

/// Lifecycle of one accepted connection.
#[derive(Debug)]
pub struct Session {
    handle: ConnectionHandle,
    broadcaster: Broadcaster,
    state: State,
}

impl Session {
    /// Creates an unjoined session for `handle`.
    #[must_use]
    pub fn new(handle: ConnectionHandle, broadcaster: Broadcaster) -> Self {
        Self {
            handle,
            broadcaster,
            state: State::Unjoined,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        match self.state {
            State::Unjoined => SessionState::Unjoined,
            State::Active { .. } => SessionState::Active,
            State::Closed => SessionState::Closed,
        }
    }

    /// Joins `room` as `name` and announces the arrival.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::SessionState`] if the session already joined
    /// or has been closed.
    pub async fn join(&mut self, room: RoomId, name: DisplayName) -> Result<(), RelayError> {
        if !matches!(self.state, State::Unjoined) {
            return Err(RelayError::SessionState(format!(
                "cannot join from {:?}",
                self.state()
            )));
        }

        let registry = self.broadcaster.registry();
        registry.join(&room, self.handle.clone(), name.clone()).await;
        tracing::info!(%room, conn = %self.handle.id(), %name, "member joined");

        self.broadcaster
            .broadcast(&room, &RoomMessage::joined(&name))
            .await;
        self.broadcaster.broadcast_presence(&room).await;

        self.state = State::Active { room, name };
        Ok(())
    }

    /// Handles one decoded inbound event. Ignored unless active.
    pub async fn handle_event(&mut self, event: InboundEvent) {
        let State::Active { room, name } = &self.state else {
            tracing::debug!(conn = %self.handle.id(), "event outside active session dropped");
            return;
        };

        match event {
            InboundEvent::Chat { text } => {
                let Some(text) = text.filter(|t| !t.is_empty()) else {
                    return;
                };
                self.broadcaster
                    .broadcast(room, &RoomMessage::chat(name, text))
                    .await;
            }
        }
    }

    /// Leaves the room (if joined) and moves to `closed`.
    ///
    /// Safe to call more than once; only the first call on an active
    /// session broadcasts.
    pub async fn close(&mut self) {
        let previous = std::mem::replace(&mut self.state, State::Closed);
        let State::Active { room, .. } = previous else {
            return;
        };

        let registry = self.broadcaster.registry();
        let Some(name) = registry.leave(&room, self.handle.id()).await else {
            return;
        };
        tracing::info!(%room, conn = %self.handle.id(), %name, "member left");

        self.broadcaster
            .broadcast(&room, &RoomMessage::left(&name))
            .await;
        self.broadcaster.broadcast_presence(&room).await;
    }
}
