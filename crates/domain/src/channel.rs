//! DMX channel values as received from a lighting server.

use serde::{Deserialize, Serialize};

/// Number of channels in a DMX universe.
pub const NUMBER_OF_CHANNELS: usize = 512;

/// Highest value a DMX channel can carry.
pub const MAX_CHANNEL_VALUE: i32 = 255;

/// One frame of channel values for a universe.
///
/// The sequence may be shorter than [`NUMBER_OF_CHANNELS`] (partial data) or
/// longer (trailing values are ignored when displayed). Values are kept as
/// received; nothing is clamped to the `0..=255` range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelValues(Vec<i32>);

impl ChannelValues {
    /// Wrap a received value sequence.
    #[must_use]
    pub fn new(values: Vec<i32>) -> Self {
        Self(values)
    }

    /// Number of values actually received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no value was received at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of channels that carry data this frame: `min(512, len)`.
    #[must_use]
    pub fn displayed_len(&self) -> usize {
        self.0.len().min(NUMBER_OF_CHANNELS)
    }

    /// Values for the channels that can be displayed, in channel order.
    #[must_use]
    pub fn displayed(&self) -> &[i32] {
        &self.0[..self.displayed_len()]
    }

    /// All received values, including any beyond the last channel.
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }
}

impl From<Vec<i32>> for ChannelValues {
    fn from(values: Vec<i32>) -> Self {
        Self(values)
    }
}

impl From<&[u8]> for ChannelValues {
    fn from(data: &[u8]) -> Self {
        Self(data.iter().map(|&byte| i32::from(byte)).collect())
    }
}
