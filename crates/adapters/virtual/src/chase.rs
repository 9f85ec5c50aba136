//! Demo chase pattern.

use std::sync::Arc;
use std::time::Duration;

use dmxmon_domain::channel::NUMBER_OF_CHANNELS;
use dmxmon_domain::universe::UniverseId;
use tokio::task::JoinHandle;

use crate::store::UniverseStore;

/// A block of lit channels that moves one channel per step and wraps around.
///
/// Channels inside the block fade from full at the head to dim at the tail,
/// so both text colours show up in the grid.
#[derive(Debug, Clone)]
pub struct Chase {
    width: usize,
    position: usize,
}

impl Chase {
    /// A chase lighting `width` channels at a time, starting at channel 1.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width: width.clamp(1, NUMBER_OF_CHANNELS),
            position: 0,
        }
    }

    /// The full 512-channel frame for the current position.
    #[must_use]
    pub fn frame(&self) -> Vec<u8> {
        let mut frame = vec![0_u8; NUMBER_OF_CHANNELS];
        for offset in 0..self.width {
            let channel = (self.position + NUMBER_OF_CHANNELS - offset) % NUMBER_OF_CHANNELS;
            let remaining = self.width - offset;
            let level = remaining * 255 / self.width;
            frame[channel] = u8::try_from(level).unwrap_or(u8::MAX);
        }
        frame
    }

    /// Move the head one channel forward.
    pub fn advance(&mut self) {
        self.position = (self.position + 1) % NUMBER_OF_CHANNELS;
    }
}

impl Default for Chase {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Push a [`Chase`] into `universe` every `interval` until the task is aborted.
pub fn spawn_chase(
    store: Arc<UniverseStore>,
    universe: UniverseId,
    interval: Duration,
) -> JoinHandle<()> {
    tracing::info!(%universe, ?interval, "starting demo chase");
    tokio::spawn(async move {
        let mut chase = Chase::default();
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            store.new_dmx(universe, &chase.frame());
            chase.advance();
        }
    })
}
