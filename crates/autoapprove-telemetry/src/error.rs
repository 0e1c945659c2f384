//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A log format or filter directive could not be parsed.
    #[error("invalid logging setting: {0}")]
    ConfigError(String),

    /// The global subscriber could not be installed.
    #[error("failed to install log subscriber: {0}")]
    InitError(String),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
