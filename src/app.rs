use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::{
    api,
    config::Config,
    engine::RecommenderEngine,
    observability::Telemetry,
    store::{FileSnapshotStore, SnapshotStore},
};

/// Shared handler state.
#[derive(Clone)]
pub(crate) struct AppState {
    registry: Arc<ComponentRegistry>,
}

/// Everything the service owns: configuration, telemetry, the engine, and
/// the snapshot store.
///
/// The engine itself is single-threaded by design; the `RwLock` is the
/// caller-side serialization required to host it behind a concurrent
/// server.
pub struct ComponentRegistry {
    config: Arc<Config>,
    telemetry: Telemetry,
    engine: RwLock<RecommenderEngine>,
    snapshot_store: Arc<dyn SnapshotStore>,
}

impl AppState {
    pub(crate) fn new(registry: ComponentRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub(crate) fn telemetry(&self) -> &Telemetry {
        &self.registry.telemetry
    }

    pub(crate) fn engine(&self) -> &RwLock<RecommenderEngine> {
        &self.registry.engine
    }

    pub(crate) fn snapshot_store(&self) -> &dyn SnapshotStore {
        self.registry.snapshot_store.as_ref()
    }

    #[allow(dead_code)]
    pub(crate) fn config(&self) -> &Config {
        &self.registry.config
    }
}

impl ComponentRegistry {
    /// Initialize telemetry and assemble the shared components.
    ///
    /// # Errors
    /// Returns an error when telemetry initialization fails.
    pub fn build(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let telemetry = Telemetry::new()?;
        let engine = RwLock::new(RecommenderEngine::new(config.engine_params()));
        let snapshot_store: Arc<dyn SnapshotStore> =
            Arc::new(FileSnapshotStore::new(config.snapshot_path()));

        Ok(Self {
            config,
            telemetry,
            engine,
            snapshot_store,
        })
    }

    /// Swap the snapshot store (tests point it at a temp directory).
    #[must_use]
    pub fn with_snapshot_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.snapshot_store = store;
        self
    }
}

/// Build the HTTP router over the component registry.
#[must_use]
pub fn build_router(registry: ComponentRegistry) -> Router {
    api::router(AppState::new(registry)).layer(TraceLayer::new_for_http())
}
