// ChatScribe - core/model.rs
//
// Core data model types. Pure data definitions with no I/O; the shared
// vocabulary across the log, formatter, and host-facing session layer.

use crate::core::category::ChatCategory;
use chrono::{DateTime, Local};
use std::path::PathBuf;

// =============================================================================
// Chat message
// =============================================================================

/// A single buffered chat message.
///
/// Immutable after ingestion: the timestamp is fixed at creation time and
/// the body is stored verbatim (no parsing, no deduplication).
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Channel classification, drives filtering and formatting.
    pub category: ChatCategory,

    /// Sender display name. May be empty for system-style categories.
    pub sender: String,

    /// Message body, stored verbatim.
    pub body: String,

    /// Ingestion time in the local timezone (display uses local clock).
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    /// Create a message stamped with the current local time.
    pub fn new(
        category: ChatCategory,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            category,
            sender: sender.into(),
            body: body.into(),
            timestamp: Local::now(),
        }
    }

    /// Create a message with an explicit timestamp.
    pub fn at(
        category: ChatCategory,
        sender: impl Into<String>,
        body: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            category,
            sender: sender.into(),
            body: body.into(),
            timestamp,
        }
    }
}

// =============================================================================
// Flush request / outcome
// =============================================================================

/// Where a flushed view is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushSink {
    /// Write a text file under the resolved destination folder.
    File,

    /// Return the joined text to the caller, who places it on the
    /// clipboard (or wherever else). No filesystem access.
    Clipboard,
}

/// Parameters for a single flush operation.
#[derive(Debug, Clone)]
pub struct FlushRequest {
    /// Destination folder hint. Used only if non-empty, absolute, and an
    /// existing directory; otherwise the user's documents directory is
    /// substituted. Ignored in clipboard mode.
    pub folder_hint: String,

    /// Base file name hint. A blank hint falls back to a timestamp name.
    /// Illegal filename characters are sanitised to `_`.
    /// Ignored in clipboard mode.
    pub name_hint: String,

    /// Keep only the final `last_n` formatted lines (0 = keep all).
    /// Applied after filtering, never before.
    pub last_n: usize,

    /// Prefix each line with the local `[h:mm AM]` ingestion time.
    pub show_timestamp: bool,

    /// File or clipboard delivery.
    pub sink: FlushSink,
}

/// Result of a successful flush.
#[derive(Debug, Clone)]
pub struct FlushOutcome {
    /// Human-readable status line, ready for the host's messaging channel
    /// (e.g. "Last 20 messages saved at /path/log.txt.").
    pub status: String,

    /// Final output path. `None` in clipboard mode.
    pub path: Option<PathBuf>,

    /// Joined text for the caller to place on the clipboard.
    /// `None` in file mode.
    pub clipboard_text: Option<String>,

    /// Number of formatted lines delivered.
    pub line_count: usize,
}

// =============================================================================
// Autosave
// =============================================================================

/// Snapshot of the autosave configuration handed to the log for a
/// timer-driven flush. Built by the session layer from persisted settings.
#[derive(Debug, Clone, Default)]
pub struct AutosaveOptions {
    /// Master switch; when false `auto_save` is a no-op.
    pub enabled: bool,

    /// Autosave-specific destination folder hint.
    pub folder_hint: String,

    /// Autosave-specific base file name hint.
    pub name_hint: String,

    /// Whether autosaved lines carry the timestamp prefix.
    pub show_timestamp: bool,
}
