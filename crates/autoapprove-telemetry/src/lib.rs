//! Autoapprove Telemetry - logging for the autoapprove action.
//!
//! Wraps `tracing-subscriber` behind a small [`LogConfig`] builder so the
//! CLI can pick level, format and output stream from flags.
//!
//! # Example
//!
//! ```rust,no_run
//! use autoapprove_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), autoapprove_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("autoapprove_core=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
