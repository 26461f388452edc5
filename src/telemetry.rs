//! Tracing subscriber setup. Diagnostics go to stderr so they never mix with
//! the report printed on stdout.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// `--log-level` value parser: accepts only valid `EnvFilter` directives.
pub fn validate_filter(level: &str) -> Result<String, String> {
    EnvFilter::try_new(level)
        .map(|_| level.to_string())
        .map_err(|e| format!("invalid log filter `{level}`: {e}"))
}

/// Install the global fmt subscriber. Returns `false` when one is already set.
///
/// `level` is expected to have passed [`validate_filter`]; anything else
/// installs an `EnvFilter` that drops the bad directives.
pub fn init_tracing(level: &str) -> bool {
    let filter = EnvFilter::new(level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
