//! Connection identity and the outbound delivery handle.
//!
//! [`ConnectionId`] is a newtype wrapper around [`uuid::Uuid`] (v4) used as
//! the registry key for a live connection. [`ConnectionHandle`] pairs that
//! id with the sending half of the connection's outbound frame queue; the
//! registry stores clones of it as a delivery target while the owning
//! session keeps the socket itself.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Unique identifier for one accepted connection.
///
/// Generated once when the connection is accepted and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Creates a new random `ConnectionId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a single frame could not be handed to a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The connection's writer has shut down.
    #[error("connection closed")]
    Closed,

    /// The connection's outbound buffer is saturated.
    #[error("outbound buffer full")]
    Full,
}

/// Non-owning delivery target for one connection.
///
/// Cloning is cheap; every clone feeds the same outbound queue. Dropping
/// a handle never closes the connection.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    outbound: mpsc::Sender<String>,
}

impl ConnectionHandle {
    /// Creates a handle plus the receiving end of its outbound queue.
    ///
    /// The receiver belongs to whoever writes frames to the transport.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (outbound, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                id: ConnectionId::new(),
                outbound,
            },
            rx,
        )
    }

    /// Returns the connection's id.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queues an encoded frame for delivery without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Closed`] if the receiving side is gone, or
    /// [`DeliveryError::Full`] if the queue has no free slot.
    pub fn send(&self, frame: String) -> Result<(), DeliveryError> {
        self.outbound.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
            mpsc::error::TrySendError::Full(_) => DeliveryError::Full,
        })
    }
}
