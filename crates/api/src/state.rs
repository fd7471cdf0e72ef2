use std::sync::Arc;

use railtrack_core::engine::SectionStatusEngine;
use railtrack_core::store::TrackStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Section status engine over the shared store handle.
    pub engine: SectionStatusEngine,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn TrackStore>, config: ServerConfig) -> Self {
        Self {
            engine: SectionStatusEngine::new(store),
            config: Arc::new(config),
        }
    }
}
