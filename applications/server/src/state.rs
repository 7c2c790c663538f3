/// Shared application state
use crate::services::SnapshotExporter;
use roster_core::UserStore;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Handlers depend on the [`UserStore`] contract, never on a concrete
/// persistence backend.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub exporter: Arc<SnapshotExporter>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, exporter: Arc<SnapshotExporter>) -> Self {
        Self { store, exporter }
    }
}
