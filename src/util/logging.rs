// ChatScribe - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - Host debug flag (sets the filter to debug)
//   - Explicit level from the host's own configuration
//
// Output: stderr. Never logs message bodies or sender names at any level;
// only counts, categories, and paths.

use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the host requests debug output.
/// `level` is an explicit level string from the host (if any).
///
/// Priority: RUST_LOG env var > debug flag > explicit level > default "info".
///
/// Intended for host binaries and integration tests; embedding hosts that
/// already install a `tracing` subscriber should skip this.
pub fn init(debug_flag: bool, level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
