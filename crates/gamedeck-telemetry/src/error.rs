//! Error types for telemetry operations.

use thiserror::Error;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised by telemetry helpers.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Installing the tracing subscriber failed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
    /// The configured level is not a valid filter directive.
    #[error("invalid log level '{level}'")]
    InvalidLevel {
        /// Directive that failed to parse.
        level: String,
        /// Underlying parse error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// An unrecognised log format name.
    #[error("unknown log format '{input}' (expected 'json' or 'pretty')")]
    UnknownFormat {
        /// Rejected input.
        input: String,
    },
}
