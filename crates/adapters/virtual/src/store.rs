//! Latest-frame store, one entry per universe.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use dmxmon_app::ports::ChannelSource;
use dmxmon_domain::channel::ChannelValues;
use dmxmon_domain::error::MonitorError;
use dmxmon_domain::universe::UniverseId;

/// In-memory universes fed by pushed DMX data.
///
/// Whoever produces DMX (a demo animator, a bridge from another protocol)
/// calls [`new_dmx`](Self::new_dmx); the monitor reads the latest frame
/// back through [`ChannelSource`]. A universe that never received data
/// reads as an empty frame.
#[derive(Debug, Default)]
pub struct UniverseStore {
    frames: Mutex<HashMap<UniverseId, ChannelValues>>,
}

impl UniverseStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the frame of `universe` with `data`.
    pub fn new_dmx(&self, universe: UniverseId, data: &[u8]) {
        tracing::trace!(%universe, len = data.len(), "new dmx frame");
        self.lock().insert(universe, ChannelValues::from(data));
    }

    /// Latest frame of `universe`, empty if none was pushed.
    #[must_use]
    pub fn frame(&self, universe: UniverseId) -> ChannelValues {
        self.lock().get(&universe).cloned().unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UniverseId, ChannelValues>> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChannelSource for UniverseStore {
    async fn channel_values(&self, universe: UniverseId) -> Result<ChannelValues, MonitorError> {
        Ok(self.frame(universe))
    }
}
