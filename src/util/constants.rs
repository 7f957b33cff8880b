// ChatScribe - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ChatScribe";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ChatScribe";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Profiles
// =============================================================================

/// Name of the permanent default profile. It is created on first run,
/// always occupies slot 0 of the profile store, and can never be removed.
pub const DEFAULT_PROFILE_NAME: &str = "Default";

// =============================================================================
// Autosave
// =============================================================================

/// Default autosave interval in minutes.
pub const DEFAULT_AUTOSAVE_INTERVAL_MIN: f32 = 5.0;

/// Minimum configurable autosave interval in minutes.
/// Prevents a misconfigured interval from flushing on every host tick.
pub const MIN_AUTOSAVE_INTERVAL_MIN: f32 = 0.1;

/// Maximum configurable autosave interval in minutes (24 hours).
pub const MAX_AUTOSAVE_INTERVAL_MIN: f32 = 1_440.0;

// =============================================================================
// Output files
// =============================================================================

/// Extension appended to every flushed log file.
pub const LOG_FILE_EXTENSION: &str = "txt";

/// Platform line ending used for flushed files and clipboard text.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Platform line ending used for flushed files and clipboard text.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Upper bound on numbered-suffix collision probing (`name1.txt`,
/// `name2.txt`, ...). A directory that exhausts this many suffixes is
/// treated as an error rather than probed forever.
pub const MAX_COLLISION_SUFFIXES: u32 = 10_000;

/// chrono format for the fallback file name when no name hint is set,
/// e.g. `01-06-2025_10.05.42`. The hour is 12-hour clock.
pub const FILE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y_%I.%M.%S";

/// chrono format for the optional per-line timestamp prefix,
/// e.g. `10:05 AM`. Hour:minute granularity, 12-hour clock.
pub const LINE_TIMESTAMP_FORMAT: &str = "%-I:%M %p";

// =============================================================================
// Configuration
// =============================================================================

/// Settings persistence file name (stored in the platform config directory).
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Settings schema version. Bump on breaking `Settings` changes;
/// mismatched files are discarded and defaults used.
pub const SETTINGS_VERSION: u32 = 1;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
