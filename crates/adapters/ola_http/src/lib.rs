//! # dmxmon-adapter-ola-http
//!
//! Channel source backed by a lighting server's HTTP JSON API.
//!
//! ## Wire format
//! - Request: `GET {base_url}/get_dmx?u={universe}`
//! - Response: a JSON object whose `dmx` field holds the channel values,
//!   e.g. `{"dmx": [0, 255, 12]}`. The array may be shorter than 512.
//!   A response without a `dmx` field is a decode error.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `dmxmon-app` and `dmxmon-domain`.

pub mod config;
pub mod error;

use serde::Deserialize;

use dmxmon_app::ports::ChannelSource;
use dmxmon_domain::channel::ChannelValues;
use dmxmon_domain::error::MonitorError;
use dmxmon_domain::universe::UniverseId;

pub use config::OlaConfig;
pub use error::OlaHttpError;

/// Body of a `get_dmx` response.
#[derive(Debug, Deserialize)]
struct DmxResponse {
    dmx: ChannelValues,
}

/// HTTP client for the lighting server.
#[derive(Debug, Clone)]
pub struct OlaHttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl OlaHttpSource {
    /// Build a client for the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`OlaHttpError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &OlaConfig) -> Result<Self, OlaHttpError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the `get_dmx` endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/get_dmx", self.base_url)
    }

    async fn fetch(&self, universe: UniverseId) -> Result<ChannelValues, OlaHttpError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("u", universe.get())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OlaHttpError::Status(status));
        }

        let body: DmxResponse = response.json().await?;
        Ok(body.dmx)
    }
}

impl ChannelSource for OlaHttpSource {
    async fn channel_values(&self, universe: UniverseId) -> Result<ChannelValues, MonitorError> {
        self.fetch(universe).await.map_err(|err| {
            tracing::debug!(%universe, error = %err, "get_dmx request failed");
            MonitorError::from(err)
        })
    }
}
