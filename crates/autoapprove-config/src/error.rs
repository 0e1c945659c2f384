//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating the policy file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The policy file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The policy file is not valid JSON, TOML or YAML for its extension.
    #[error("failed to parse config file {path}: {message}")]
    ParseError {
        /// Path that was parsed.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A value is present but not acceptable.
    #[error("invalid config value for {field}: {message}")]
    ValidationError {
        /// Dotted name of the offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
