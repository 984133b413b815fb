//! # room-relay
//!
//! Room-scoped WebSocket chat relay with presence fan-out.
//!
//! Clients allocate a room id over REST, then open a WebSocket bound to
//! that room and a display name. Every member receives join/leave
//! notices, roster snapshots, and chat lines sent by anyone in the room.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler + connection loops (ws/)
//!     │
//!     ├── Session (service/)
//!     ├── Broadcaster (service/)
//!     │
//!     └── RoomRegistry + Presence (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
