//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names follow the existing client contract (`roomId`), not the
//! crate's snake_case convention.

pub mod room_dto;

pub use room_dto::*;
