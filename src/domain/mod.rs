//! Domain layer: identities, wire messages, the room registry, and
//! presence.
//!
//! This module contains the membership model: who is in which room, how
//! to reach them, and what gets sent to them.

pub mod connection;
pub mod inbound_event;
pub mod presence;
pub mod room_id;
pub mod room_message;
pub mod room_registry;

pub use connection::{ConnectionHandle, ConnectionId, DeliveryError};
pub use inbound_event::InboundEvent;
pub use room_id::{DisplayName, RoomId};
pub use room_message::RoomMessage;
pub use room_registry::{Member, RoomRegistry};
