//! WebSocket layer: upgrade handling and the per-connection loops.
//!
//! The WebSocket endpoint at `/ws?room=<id>&name=<name>` joins the caller
//! to a room for the lifetime of the socket.

pub mod connection;
pub mod handler;
