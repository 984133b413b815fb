//! Axum WebSocket upgrade handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use utoipa::IntoParams;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::{DisplayName, RoomId};
use crate::error::{ErrorResponse, RelayError};

/// Query parameters of the `/ws` endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JoinParams {
    /// Room to join.
    #[serde(default)]
    pub room: String,
    /// Display name to join with.
    #[serde(default)]
    pub name: String,
}

impl JoinParams {
    /// Builds params from raw query pairs. When a key repeats, the first
    /// value wins; unknown keys are ignored.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut room = None;
        let mut name = None;
        for (key, value) in pairs {
            match key.as_str() {
                "room" if room.is_none() => room = Some(value),
                "name" if name.is_none() => name = Some(value),
                _ => {}
            }
        }
        Self {
            room: room.unwrap_or_default(),
            name: name.unwrap_or_default(),
        }
    }

    /// Validates both fields.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidRoomId`] if `room` is empty, or
    /// [`RelayError::InvalidName`] if `name` is empty.
    pub fn validate(self) -> Result<(RoomId, DisplayName), RelayError> {
        let room = RoomId::parse(self.room)?;
        let name = DisplayName::parse(self.name)?;
        Ok((room, name))
    }
}

/// `GET /ws` — Upgrade HTTP connection to WebSocket and join a room.
///
/// Parameters are checked before the upgrade is attempted.
#[utoipa::path(
    get,
    path = "/ws",
    tag = "Rooms",
    summary = "Join a room over WebSocket",
    description = "Upgrades to a WebSocket bound to one room. Server frames are `system`, `presence` and `chat` messages; clients send `{\"type\":\"chat\",\"text\":...}`.",
    params(JoinParams),
    responses(
        (status = 101, description = "Switching protocols"),
        (status = 400, description = "Missing room or name", body = ErrorResponse),
    )
)]
pub async fn ws_handler(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    State(state): State<AppState>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let params = match query {
        Ok(Query(pairs)) => JoinParams::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unparseable /ws query");
            return RelayError::InvalidRequest("room and name required".to_string())
                .into_response();
        }
    };
    let (room, name) = match params.validate() {
        Ok(valid) => valid,
        Err(e) => return e.into_response(),
    };
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    let broadcaster = state.broadcaster.clone();
    let capacity = state.config.outbound_buffer_capacity;
    ws.on_upgrade(move |socket| run_connection(socket, room, name, broadcaster, capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(room: &str, name: &str) -> JoinParams {
        JoinParams {
            room: room.to_string(),
            name: name.to_string(),
        }
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn valid_params_pass() {
        let result = params("r1", "Alice").validate();
        assert!(result.is_ok_and(|(r, n)| r.as_str() == "r1" && n.as_str() == "Alice"));
    }

    #[test]
    fn empty_room_reports_room_error() {
        for p in [params("", "Alice"), params("", "")] {
            assert!(matches!(p.validate(), Err(RelayError::InvalidRoomId(_))));
        }
    }

    #[test]
    fn empty_name_reports_name_error() {
        assert!(matches!(
            params("r1", "").validate(),
            Err(RelayError::InvalidName(_))
        ));
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let p = JoinParams::from_pairs(pairs(&[
            ("room", "r1"),
            ("room", "r2"),
            ("name", "Alice"),
            ("name", "Bob"),
        ]));
        assert_eq!(p.room, "r1");
        assert_eq!(p.name, "Alice");
    }

    #[test]
    fn first_empty_value_is_not_replaced() {
        let p = JoinParams::from_pairs(pairs(&[("room", ""), ("room", "r2"), ("name", "A")]));
        assert!(matches!(p.validate(), Err(RelayError::InvalidRoomId(_))));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let p = JoinParams::from_pairs(pairs(&[("x", "1"), ("room", "r1"), ("name", "A")]));
        assert!(p.validate().is_ok());
    }
}
