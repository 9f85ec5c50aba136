//! Lighting server adapter error types.

use dmxmon_domain::error::MonitorError;

/// Errors specific to the lighting server HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum OlaHttpError {
    /// The request could not be sent or its body could not be decoded.
    #[error("lighting server request failed")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("lighting server returned {0}")]
    Status(reqwest::StatusCode),
}

impl From<OlaHttpError> for MonitorError {
    fn from(err: OlaHttpError) -> Self {
        MonitorError::source(err)
    }
}
