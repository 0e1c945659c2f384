//! Subscriber setup for the autoapprove binary.

use std::str::FromStr;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{TelemetryError, TelemetryResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Line format of log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, for reading in a terminal.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event.
    Json,
    /// The `tracing-subscriber` default format.
    Full,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            "full" => Ok(Self::Full),
            other => Err(TelemetryError::ConfigError(format!(
                "unknown log format '{other}'; expected pretty, compact, json or full"
            ))),
        }
    }
}

/// Stream log events are written to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard output.
    Stdout,
    /// Standard error. Keeps stdout free for the decision.
    #[default]
    Stderr,
}

/// How the binary logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Base filter, e.g. `info` or `autoapprove_github=debug,warn`.
    pub level: String,
    /// Line format.
    pub format: LogFormat,
    /// Output stream.
    pub target: LogTarget,
    /// Prefix events with a timestamp. The Actions log viewer adds its own.
    pub timestamps: bool,
    /// Colorize output.
    pub ansi: bool,
    /// Extra per-target directives added on top of `level`.
    pub directives: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl LogConfig {
    /// Log at `level` to stderr in the pretty format.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: LogFormat::Pretty,
            target: LogTarget::Stderr,
            timestamps: true,
            ansi: true,
            directives: Vec::new(),
        }
    }

    /// Use `format`.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Write to `target`.
    #[must_use]
    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    /// Add a per-target directive such as `autoapprove_core=trace`.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Leave timestamps out.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Leave colors out.
    #[must_use]
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    fn env_filter(&self) -> TelemetryResult<EnvFilter> {
        let invalid = |e: &dyn std::fmt::Display| TelemetryError::ConfigError(e.to_string());

        self.directives.iter().try_fold(
            EnvFilter::try_new(&self.level).map_err(|e| invalid(&e))?,
            |filter, directive| {
                let directive = directive.parse().map_err(|e| invalid(&e))?;
                Ok(filter.add_directive(directive))
            },
        )
    }

    fn fmt_layer(&self) -> BoxedLayer {
        let writer = match self.target {
            LogTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
            LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        };
        let base = fmt::layer().with_writer(writer).with_ansi(self.ansi);

        match (self.format, self.timestamps) {
            (LogFormat::Pretty, true) => base.pretty().boxed(),
            (LogFormat::Pretty, false) => base.pretty().without_time().boxed(),
            (LogFormat::Compact, true) => base.compact().boxed(),
            (LogFormat::Compact, false) => base.compact().without_time().boxed(),
            (LogFormat::Json, true) => base.json().boxed(),
            (LogFormat::Json, false) => base.json().without_time().boxed(),
            (LogFormat::Full, true) => base.boxed(),
            (LogFormat::Full, false) => base.without_time().boxed(),
        }
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Returns [`TelemetryError::ConfigError`] for an unparsable filter and
/// [`TelemetryError::InitError`] if a global subscriber is already set.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.env_filter()?;

    tracing_subscriber::registry()
        .with(config.fmt_layer())
        .with(filter)
        .try_init()
        .map_err(|e| TelemetryError::InitError(e.to_string()))
}

/// Install the subscriber for [`LogConfig::default`].
///
/// # Errors
///
/// Same as [`setup_logging`].
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::default())
}
