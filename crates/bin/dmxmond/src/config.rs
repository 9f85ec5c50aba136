//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `dmxmon.toml` in the working directory (or the file named by
//! `DMXMON_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use dmxmon_adapter_ola_http::OlaConfig;
use dmxmon_domain::universe::UniverseId;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Monitor settings.
    pub monitor: MonitorConfig,
    /// Where channel values come from.
    pub source: SourceConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Monitor behaviour.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Universe shown at startup.
    pub universe: UniverseId,
    /// Start polling immediately.
    pub enabled: bool,
    /// Pause between the end of a render and the next fetch, in milliseconds.
    pub poll_interval_ms: u64,
    /// Auto-refresh interval of the HTML grid page, in seconds.
    pub refresh_seconds: u32,
}

/// Kind of channel source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A lighting server reachable over HTTP.
    Ola,
    /// In-memory universes fed by a demo chase.
    Virtual,
}

/// Channel source configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Lighting server connection, used when `kind = "ola"`.
    pub ola: OlaConfig,
    /// Step interval of the demo chase, used when `kind = "virtual"`.
    pub chase_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `dmxmon.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("DMXMON_CONFIG").unwrap_or_else(|_| "dmxmon.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DMXMON_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("DMXMON_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("DMXMON_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("DMXMON_UNIVERSE") {
            if let Ok(universe) = val.parse() {
                self.monitor.universe = universe;
            }
        }
        if let Ok(val) = std::env::var("DMXMON_SOURCE") {
            match val.as_str() {
                "ola" => self.source.kind = SourceKind::Ola,
                "virtual" => self.source.kind = SourceKind::Virtual,
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("DMXMON_OLA_URL") {
            self.source.ola.url = val;
        }
        if let Ok(val) = std::env::var("DMXMON_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.monitor.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        match self.source.kind {
            SourceKind::Ola if self.source.ola.url.trim().is_empty() => Err(
                ConfigError::Validation("lighting server url must not be empty".to_string()),
            ),
            SourceKind::Virtual if self.source.chase_interval_ms == 0 => Err(
                ConfigError::Validation("chase interval must be non-zero".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Pause between polls.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.monitor.poll_interval_ms)
    }

    /// Step interval of the demo chase.
    #[must_use]
    pub fn chase_interval(&self) -> Duration {
        Duration::from_millis(self.source.chase_interval_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            universe: UniverseId::new(1),
            enabled: true,
            poll_interval_ms: 1000,
            refresh_seconds: 1,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Ola,
            ola: OlaConfig::default(),
            chase_interval_ms: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "dmxmond=info,dmxmon=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
