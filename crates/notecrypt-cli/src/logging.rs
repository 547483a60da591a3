//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays clean for envelopes and JSON output.
//! The core only emits scheme names and byte counts; nothing logged here
//! carries plaintext or key material.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive (e.g. `notecrypt_core=debug`).
pub const LOG_ENV: &str = "NOTECRYPT_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// Precedence: `--verbose`, then `NOTECRYPT_LOG`, then the config filter,
/// then `warn`.
pub fn init(config_filter: Option<&str>, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(config_filter.unwrap_or(DEFAULT_FILTER)))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
