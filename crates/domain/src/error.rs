//! Common error types used across the workspace.
//!
//! Each adapter defines its own typed errors and converts them into
//! [`MonitorError`] at the port boundary.

use std::num::ParseIntError;

/// Boxed adapter error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for monitor operations.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The channel source failed to deliver values (transport, decoding, …).
    #[error("channel source error")]
    Source(#[source] BoxError),

    /// A universe identifier could not be parsed.
    #[error("invalid universe identifier")]
    InvalidUniverse(#[from] ParseIntError),

    /// The monitor task is no longer running.
    #[error("monitor stopped")]
    Stopped,
}

impl MonitorError {
    /// Wrap any adapter error as a [`MonitorError::Source`].
    pub fn source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    #[test]
    fn should_display_stopped_error() {
        assert_eq!(MonitorError::Stopped.to_string(), "monitor stopped");
    }

    #[test]
    fn should_keep_underlying_error_as_source() {
        let err = MonitorError::source(Refused);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection refused");
    }

    #[test]
    fn should_convert_parse_int_error() {
        let parse_err = "abc".parse::<u32>().unwrap_err();
        let err: MonitorError = parse_err.into();
        assert!(matches!(err, MonitorError::InvalidUniverse(_)));
    }
}
