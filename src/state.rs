//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::pins::PinStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: PinStore,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Self {
        let store = PinStore::new(config.paths.pins_file());
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the pin collection store
    pub fn store(&self) -> &PinStore {
        &self.inner.store
    }
}
