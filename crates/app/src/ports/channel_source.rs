//! Channel source port — where channel values come from.

use std::future::Future;
use std::sync::Arc;

use dmxmon_domain::channel::ChannelValues;
use dmxmon_domain::error::MonitorError;
use dmxmon_domain::universe::UniverseId;

/// Delivers the latest channel values of a universe.
///
/// Implementations live in adapter crates (e.g. the lighting server HTTP
/// client, or the in-memory virtual universe store). The monitor issues at
/// most one request at a time and applies no timeout of its own.
pub trait ChannelSource {
    /// Fetch the current values for `universe`.
    fn channel_values(
        &self,
        universe: UniverseId,
    ) -> impl Future<Output = Result<ChannelValues, MonitorError>> + Send;
}

impl<T: ChannelSource + Send + Sync> ChannelSource for Arc<T> {
    fn channel_values(
        &self,
        universe: UniverseId,
    ) -> impl Future<Output = Result<ChannelValues, MonitorError>> + Send {
        (**self).channel_values(universe)
    }
}
