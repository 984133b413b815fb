//! Room handlers: id allocation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::CreateRoomResponse;
use crate::app_state::AppState;
use crate::domain::RoomId;

/// `POST /rooms` — Allocate a fresh room id.
///
/// Nothing is registered; the room comes into existence when its first
/// member joins over `/ws`.
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "Rooms",
    summary = "Create a room id",
    description = "Returns a random room id. Rooms exist only while they have members.",
    responses(
        (status = 200, description = "Room id allocated", body = CreateRoomResponse),
        (status = 405, description = "Method not allowed"),
    )
)]
pub async fn create_room(State(state): State<AppState>) -> impl IntoResponse {
    let room_id = RoomId::generate(state.config.room_id_length);
    tracing::debug!(room = %room_id, "room id allocated");
    (
        StatusCode::OK,
        Json(CreateRoomResponse {
            room_id: room_id.to_string(),
        }),
    )
}

/// Room routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rooms", post(create_room))
}
