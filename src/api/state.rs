//! Application state for the timesheet engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, EngineConfig};
use crate::store::AttendanceStore;

/// Shared application state.
///
/// Holds the loaded engine configuration and the attendance store every
/// handler reads from.
pub struct AppState<S> {
    config: Arc<ConfigLoader>,
    store: Arc<S>,
}

impl<S: AttendanceStore> AppState<S> {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, store: S) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Creates a state over a store that is shared with other owners.
    pub fn with_shared_store(config: ConfigLoader, store: Arc<S>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the engine configuration.
    pub fn engine_config(&self) -> &EngineConfig {
        self.config.config()
    }

    /// Returns the attendance store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

// Manual impl: cloning the state must not require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            store: Arc::clone(&self.store),
        }
    }
}
