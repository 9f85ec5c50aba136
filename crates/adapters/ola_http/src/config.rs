//! Lighting server connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the lighting server HTTP source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OlaConfig {
    /// Base URL of the server's web interface.
    pub url: String,
    /// TCP connect timeout in seconds. Requests themselves are not timed out.
    pub connect_timeout_secs: u64,
}

impl OlaConfig {
    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for OlaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9090".to_string(),
            connect_timeout_secs: 2,
        }
    }
}
