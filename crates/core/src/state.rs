//! Shared application state.
//!
//! The resolved configuration is built once at startup and handed to
//! every component through this state instead of living in a global.

use crate::config::Config;
use std::sync::Arc;

/// Shared application state.
///
/// Cloning is cheap; all clones point at the same configuration.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<Config>,

    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new application state from a resolved configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            start_time: std::time::Instant::now(),
        }
    }

    /// Get the server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Whether debug mode is enabled.
    pub fn is_debug(&self) -> bool {
        self.config.settings.debug
    }
}
