//! Command-level span helpers.

use tracing::Span;

use crate::init::build_sha;

/// Span for one CLI command. Instrument the command future with it so every
/// event emitted while the command runs carries its name, trace id and build
/// SHA.
#[must_use]
pub fn command_span(command: &str, trace_id: &str) -> Span {
    tracing::info_span!(
        "command",
        command = %command,
        trace_id = %trace_id,
        build_sha = %build_sha()
    )
}
