//! Room endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body of `POST /rooms`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRoomResponse {
    /// Freshly generated room id.
    #[serde(rename = "roomId")]
    pub room_id: String,
}
