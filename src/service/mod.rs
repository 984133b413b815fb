//! Service layer: fan-out and session orchestration.
//!
//! [`Broadcaster`] delivers messages to room members over the
//! [`super::domain::RoomRegistry`]; [`Session`] drives one connection's
//! join/chat/leave transitions through it.

pub mod broadcaster;
pub mod session;

pub use broadcaster::{Broadcaster, DeliveryReport};
pub use session::{Session, SessionState};
