//! OpenAPI document and optional Swagger UI.

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of every HTTP endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "room-relay",
        description = "Room-scoped WebSocket chat relay with presence fan-out"
    ),
    paths(
        crate::api::handlers::room::create_room,
        crate::api::handlers::system::health_handler,
        crate::ws::handler::ws_handler,
    ),
    components(schemas(
        crate::api::dto::CreateRoomResponse,
        crate::api::handlers::system::HealthResponse,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "Rooms", description = "Room ids and membership"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Path the JSON document is served at.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Serves the document, plus Swagger UI when the `swagger-ui` feature is on.
#[cfg(feature = "swagger-ui")]
pub fn routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    )
}

/// Serves the document, plus Swagger UI when the `swagger-ui` feature is on.
#[cfg(not(feature = "swagger-ui"))]
pub fn routes() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}
