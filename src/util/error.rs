// ChatScribe - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its causal chain
// for diagnostic logging.
//
// Note what is deliberately NOT an error: an unusable destination hint
// (substituted with the documents directory), illegal filename characters
// (sanitised), and output-path collisions (suffixed). Only genuine I/O
// failures and serialisation failures surface here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ChatScribe operations.
#[derive(Debug)]
pub enum ChatScribeError {
    /// A flush to a file destination failed.
    Flush(FlushError),

    /// Settings persistence failed.
    Settings(SettingsError),
}

impl fmt::Display for ChatScribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flush(e) => write!(f, "Flush error: {e}"),
            Self::Settings(e) => write!(f, "Settings error: {e}"),
        }
    }
}

impl std::error::Error for ChatScribeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Flush(e) => Some(e),
            Self::Settings(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Flush errors
// ---------------------------------------------------------------------------

/// Errors produced while writing a flushed view to a file.
///
/// A flush either writes the full formatted view or produces nothing
/// durable; there is no partial-write state to report.
#[derive(Debug)]
pub enum FlushError {
    /// I/O failure with path and operation context (permission denied,
    /// disk full, path too long, ...). Fatal to the operation; not retried.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// Numbered-suffix probing exhausted `max` candidates without finding
    /// a free path.
    CollisionLimit {
        dir: PathBuf,
        base: String,
        max: u32,
    },
}

impl fmt::Display for FlushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::CollisionLimit { dir, base, max } => write!(
                f,
                "No free output path for '{base}' in '{}' after {max} suffixes",
                dir.display()
            ),
        }
    }
}

impl std::error::Error for FlushError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::CollisionLimit { .. } => None,
        }
    }
}

impl From<FlushError> for ChatScribeError {
    fn from(e: FlushError) -> Self {
        Self::Flush(e)
    }
}

// ---------------------------------------------------------------------------
// Settings errors
// ---------------------------------------------------------------------------

/// Errors produced while persisting settings.
///
/// Loading never produces these: a missing, malformed, or incompatible
/// settings file silently yields defaults (first-run behaviour).
#[derive(Debug)]
pub enum SettingsError {
    /// Settings could not be serialised to JSON.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// I/O failure writing or renaming the settings file.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize { path, source } => {
                write!(
                    f,
                    "Failed to serialise settings for '{}': {source}",
                    path.display()
                )
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "Settings I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<SettingsError> for ChatScribeError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

/// Convenience type alias for ChatScribe results.
pub type Result<T> = std::result::Result<T, ChatScribeError>;
