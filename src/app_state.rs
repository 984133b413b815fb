//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::domain::RoomRegistry;
use crate::service::Broadcaster;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Fan-out engine; also gives access to the room registry.
    pub broadcaster: Broadcaster,
    /// Startup configuration.
    pub config: Arc<RelayConfig>,
}

impl AppState {
    /// Builds state around a fresh, empty [`RoomRegistry`].
    #[must_use]
    pub fn new(config: RelayConfig) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        Self {
            broadcaster: Broadcaster::new(registry),
            config: Arc::new(config),
        }
    }
}
