//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! Endpoints are mounted at the root (`/rooms`, `/health`) to stay
//! compatible with existing clients.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete router: REST endpoints, `/ws`, and API docs.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .route("/ws", get(ws_handler))
        .merge(openapi::routes())
}

/// Builds the router with tracing and CORS layers and binds `state`.
///
/// CORS is permissive: any origin may open a socket.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
