//! The channel monitor state machine.
//!
//! [`ChannelMonitor`] owns the display cells and the enabled/universe state.
//! It performs no IO itself: the poll loop in [`crate::poll`] asks it whether
//! a fetch is due, hands it the received values, and asks again whether to
//! keep polling.

use dmxmon_domain::cell::{CellLabel, CellUpdate};
use dmxmon_domain::channel::{ChannelValues, NUMBER_OF_CHANNELS};
use dmxmon_domain::universe::UniverseId;
use serde::Serialize;

use crate::ports::CellRenderer;

/// Point-in-time view of the monitor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonitorStatus {
    /// Whether polling is enabled.
    pub enabled: bool,
    /// Universe selected by the last `set_state` call.
    pub universe: Option<UniverseId>,
    /// Whether the display cells have been created.
    pub setup: bool,
}

/// Live display of the 512 channels of one universe.
pub struct ChannelMonitor<R: CellRenderer> {
    renderer: R,
    cells: Vec<R::Cell>,
    is_setup: bool,
    is_enabled: bool,
    selected_universe: Option<UniverseId>,
}

impl<R: CellRenderer> ChannelMonitor<R> {
    /// Create a disabled monitor drawing on `renderer`. No cell exists yet.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            cells: Vec::new(),
            is_setup: false,
            is_enabled: false,
            selected_universe: None,
        }
    }

    /// Enable or disable the monitor for `universe`.
    ///
    /// Enabling builds the cells on first use. Returns `true` when the caller
    /// must trigger a fetch right away, i.e. whenever the monitor is enabled.
    /// Disabling only records the flag; a fetch already in flight is left alone.
    #[tracing::instrument(skip(self))]
    pub fn set_state(&mut self, enabled: bool, universe: UniverseId) -> bool {
        self.is_enabled = enabled;
        self.selected_universe = Some(universe);

        if self.is_enabled {
            if !self.is_setup {
                self.setup_cells();
            }
            tracing::info!("monitor enabled");
        } else {
            tracing::info!("monitor disabled");
        }
        self.is_enabled
    }

    /// Create one cell per channel, in channel order. Runs at most once.
    pub fn setup_cells(&mut self) {
        if self.is_setup {
            return;
        }
        self.cells.reserve_exact(NUMBER_OF_CHANNELS);
        for index in 0..NUMBER_OF_CHANNELS {
            let cell = self.renderer.create_cell(CellLabel::new(index));
            self.cells.push(cell);
        }
        self.is_setup = true;
        tracing::debug!(cells = self.cells.len(), "display cells created");
    }

    /// Universe to fetch now, or `None` when disabled.
    ///
    /// Checked when the fetch is about to be issued, not when it was scheduled.
    #[must_use]
    pub fn fetch_target(&self) -> Option<UniverseId> {
        if self.is_enabled {
            self.selected_universe
        } else {
            None
        }
    }

    /// Render a received frame: channels with data show their value, the
    /// remaining channels are cleared.
    pub fn update_data(&self, values: &ChannelValues) {
        let displayed = values.displayed();
        for (offset, &value) in displayed.iter().enumerate() {
            self.set_cell_value(offset, value);
        }
        for offset in displayed.len()..NUMBER_OF_CHANNELS {
            self.clear_cell_value(offset);
        }
    }

    /// Show `value` in the cell at `offset`. Unknown offsets are ignored.
    pub fn set_cell_value(&self, offset: usize, value: i32) {
        if let Some(cell) = self.cells.get(offset) {
            self.renderer.render(cell, &CellUpdate::for_value(value));
        }
    }

    /// Blank the cell at `offset` to show that no data arrived for it.
    pub fn clear_cell_value(&self, offset: usize) {
        if let Some(cell) = self.cells.get(offset) {
            self.renderer.render(cell, &CellUpdate::Cleared);
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    #[must_use]
    pub fn is_setup(&self) -> bool {
        self.is_setup
    }

    /// Number of cells created so far: 0 before setup, 512 after.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn status(&self) -> MonitorStatus {
        MonitorStatus {
            enabled: self.is_enabled,
            universe: self.selected_universe,
            setup: self.is_setup,
        }
    }
}
