//! Shared application state for axum handlers.

use std::sync::Arc;

use dmxmon_app::poll::MonitorHandle;

use crate::grid::GridRenderer;

/// Application state shared across all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Control channel into the running monitor.
    pub monitor: MonitorHandle,
    /// The grid the monitor draws on.
    pub grid: Arc<GridRenderer>,
    /// Auto-refresh interval of the HTML page.
    pub refresh_seconds: u32,
}

impl AppState {
    /// Create a new application state.
    pub fn new(monitor: MonitorHandle, grid: Arc<GridRenderer>) -> Self {
        Self {
            monitor,
            grid,
            refresh_seconds: 1,
        }
    }

    /// Override the HTML page refresh interval.
    #[must_use]
    pub fn with_refresh_seconds(mut self, refresh_seconds: u32) -> Self {
        self.refresh_seconds = refresh_seconds.max(1);
        self
    }
}
