// ChatScribe - core/log.rs
//
// The chat log itself: an append-only in-session buffer of messages,
// plus view preparation (filter, format, truncate), flushing to file or
// clipboard text, and autosave timing state.
//
// Concurrency: the host delivers events and ticks serially, but the
// buffer is still guarded by a Mutex so a host that overlaps an event
// with a flush stays safe. The buffer is the only shared mutable
// resource; flushes hold the lock only while snapshotting.

use crate::core::format;
use crate::core::model::{AutosaveOptions, ChatMessage, FlushOutcome, FlushRequest, FlushSink};
use crate::core::output;
use crate::core::profile::ChannelProfile;
use crate::util::constants::LINE_ENDING;
use crate::util::error::FlushError;
use crate::core::category::ChatCategory;
use chrono::{DateTime, Duration, Local, Utc};
use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering the inner value if a previous holder
/// panicked. The guarded data is a plain buffer/instant and remains
/// structurally valid regardless of where a panic occurred.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Ordered buffer of chat messages with flush and autosave-timing state.
#[derive(Debug)]
pub struct ChatLog {
    /// Messages in insertion order. Append-only during a session;
    /// cleared wholesale by `wipe`.
    buffer: Mutex<Vec<ChatMessage>>,

    /// Instant of the last completed autosave (or the last re-arm).
    last_autosave: Mutex<DateTime<Utc>>,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(Vec::new()),
            last_autosave: Mutex::new(Utc::now()),
        }
    }

    // -------------------------------------------------------------------
    // Buffer mutation
    // -------------------------------------------------------------------

    /// Append a message stamped with the current time. O(1) amortised.
    pub fn add_message(
        &self,
        category: ChatCategory,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) {
        lock(&self.buffer).push(ChatMessage::new(category, sender, body));
    }

    /// Append an already-constructed message (e.g. with a fixed
    /// timestamp). Ingestion normally goes through `add_message`.
    pub fn push(&self, message: ChatMessage) {
        lock(&self.buffer).push(message);
    }

    /// Clear the buffer. Used after a session-ending autosave.
    pub fn wipe(&self) {
        let mut buffer = lock(&self.buffer);
        tracing::debug!(dropped = buffer.len(), "Chat log wiped");
        buffer.clear();
    }

    /// Number of buffered messages (before any filtering).
    pub fn len(&self) -> usize {
        lock(&self.buffer).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.buffer).is_empty()
    }

    // -------------------------------------------------------------------
    // View preparation
    // -------------------------------------------------------------------

    /// Produce the filtered, formatted view of the buffer.
    ///
    /// Messages whose category is not enabled in `profile` are dropped
    /// (missing map entries count as disabled), survivors are formatted
    /// in insertion order, and — only then — the result is truncated to
    /// the final `last_n` lines when `last_n > 0`.
    pub fn prepare_view(
        &self,
        profile: &ChannelProfile,
        last_n: usize,
        show_timestamp: bool,
    ) -> Vec<String> {
        let buffer = lock(&self.buffer);
        let mut lines: Vec<String> = buffer
            .iter()
            .filter(|m| profile.is_enabled(m.category))
            .map(|m| {
                format::format_line_as(m, profile.display_sender(&m.sender), show_timestamp)
            })
            .collect();
        drop(buffer);

        if last_n > 0 && lines.len() > last_n {
            let cut = lines.len() - last_n;
            lines.drain(..cut);
        }
        lines
    }

    // -------------------------------------------------------------------
    // Flushing
    // -------------------------------------------------------------------

    /// Flush the filtered view to the requested sink.
    ///
    /// Clipboard mode joins the lines with the platform newline and
    /// returns the text; placing it on an actual clipboard is the
    /// caller's job. File mode resolves the destination, never
    /// overwrites, and returns the final path. Both modes return a
    /// ready-made status line for the host's messaging channel.
    pub fn flush(
        &self,
        profile: &ChannelProfile,
        request: &FlushRequest,
    ) -> Result<FlushOutcome, FlushError> {
        let lines = self.prepare_view(profile, request.last_n, request.show_timestamp);

        match request.sink {
            FlushSink::Clipboard => {
                let mut text = String::new();
                for line in &lines {
                    text.push_str(line);
                    text.push_str(LINE_ENDING);
                }
                let status = if request.last_n > 0 {
                    format!("Last {} messages copied to clipboard.", request.last_n)
                } else {
                    "Chat log copied to clipboard.".to_string()
                };
                tracing::debug!(lines = lines.len(), "Prepared clipboard flush");
                Ok(FlushOutcome {
                    status,
                    path: None,
                    clipboard_text: Some(text),
                    line_count: lines.len(),
                })
            }
            FlushSink::File => {
                let folder = output::resolve_folder(&request.folder_hint);
                let name = output::resolve_base_name(&request.name_hint, Local::now());
                let path = output::collision_free_path(&folder, &name)?;
                output::write_log_file(&path, &name, &lines)?;

                let status = if request.last_n > 0 {
                    format!(
                        "Last {} messages saved at {}.",
                        request.last_n,
                        path.display()
                    )
                } else {
                    format!("Chat log saved at {}.", path.display())
                };
                tracing::info!(path = %path.display(), lines = lines.len(), "Chat log flushed");
                Ok(FlushOutcome {
                    status,
                    path: Some(path),
                    clipboard_text: None,
                    line_count: lines.len(),
                })
            }
        }
    }

    // -------------------------------------------------------------------
    // Autosave
    // -------------------------------------------------------------------

    /// Whether an autosave is due: `now >= last_save + interval`.
    /// Cheap comparison intended for every host tick; performs no I/O.
    pub fn check_autosave_due(&self, interval_minutes: f32) -> bool {
        let last = *lock(&self.last_autosave);
        let interval = Duration::milliseconds((f64::from(interval_minutes) * 60_000.0) as i64);
        Utc::now() >= last + interval
    }

    /// Record that an autosave just completed (or re-arm the timer on
    /// login), so the next one is a full interval away.
    pub fn mark_autosaved(&self) {
        *lock(&self.last_autosave) = Utc::now();
    }

    /// Instant of the last autosave, for persistence.
    pub fn last_autosave(&self) -> DateTime<Utc> {
        *lock(&self.last_autosave)
    }

    /// Seed the autosave timer from a persisted instant.
    pub fn set_last_autosave(&self, instant: DateTime<Utc>) {
        *lock(&self.last_autosave) = instant;
    }

    /// Timer- or logout-driven flush of the whole log using the
    /// autosave destination hints.
    ///
    /// Returns `Ok(None)` without touching the filesystem when autosave
    /// is disabled. Never wipes the buffer; wiping after a
    /// session-ending autosave is the caller's decision.
    pub fn auto_save(
        &self,
        profile: &ChannelProfile,
        options: &AutosaveOptions,
    ) -> Result<Option<FlushOutcome>, FlushError> {
        if !options.enabled {
            return Ok(None);
        }
        let request = FlushRequest {
            folder_hint: options.folder_hint.clone(),
            name_hint: options.name_hint.clone(),
            last_n: 0,
            show_timestamp: options.show_timestamp,
            sink: FlushSink::File,
        };
        let mut outcome = self.flush(profile, &request)?;
        if let Some(ref path) = outcome.path {
            outcome.status = format!("Autosaved chat log to {}.", path.display());
        }
        Ok(Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::ProfileStore;
    use tempfile::TempDir;

    fn say_only_store() -> ProfileStore {
        let mut store = ProfileStore::new();
        let profile = store.get_mut(0).unwrap();
        for category in ChatCategory::all() {
            profile.enabled.insert(*category, false);
        }
        profile.enabled.insert(ChatCategory::Say, true);
        store
    }

    #[test]
    fn test_prepare_view_filters_disabled_categories() {
        let log = ChatLog::new();
        log.add_message(ChatCategory::Say, "Alice", "hi");
        log.add_message(ChatCategory::Shout, "Carol", "HEY");

        let store = say_only_store();
        let view = log.prepare_view(store.active(), 0, false);
        assert_eq!(view, vec!["Alice: hi".to_string()]);
    }

    #[test]
    fn test_prepare_view_last_n_after_filtering() {
        let log = ChatLog::new();
        // Interleave enabled and disabled categories; truncation must
        // count only surviving lines.
        for i in 0..5 {
            log.add_message(ChatCategory::Say, "Alice", format!("say {i}"));
            log.add_message(ChatCategory::Linkshell1, "Bob", format!("ls {i}"));
        }

        let store = ProfileStore::new();
        let view = log.prepare_view(store.active(), 2, false);
        assert_eq!(view, vec!["Alice: say 3".to_string(), "Alice: say 4".to_string()]);
    }

    #[test]
    fn test_prepare_view_last_n_larger_than_log() {
        let log = ChatLog::new();
        log.add_message(ChatCategory::Say, "Alice", "only one");
        let store = ProfileStore::new();
        let view = log.prepare_view(store.active(), 10, false);
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_wipe_clears_buffer() {
        let log = ChatLog::new();
        log.add_message(ChatCategory::Say, "Alice", "hi");
        assert_eq!(log.len(), 1);
        log.wipe();
        assert!(log.is_empty());
    }

    #[test]
    fn test_clipboard_flush_joins_and_reports() {
        let log = ChatLog::new();
        log.add_message(ChatCategory::Say, "Alice", "one");
        log.add_message(ChatCategory::Say, "Alice", "two");

        let store = ProfileStore::new();
        let request = FlushRequest {
            folder_hint: String::new(),
            name_hint: String::new(),
            last_n: 0,
            show_timestamp: false,
            sink: FlushSink::Clipboard,
        };
        let outcome = log.flush(store.active(), &request).unwrap();
        assert_eq!(outcome.status, "Chat log copied to clipboard.");
        assert_eq!(
            outcome.clipboard_text.as_deref(),
            Some(format!("Alice: one{LINE_ENDING}Alice: two{LINE_ENDING}").as_str())
        );
        assert!(outcome.path.is_none());
        assert_eq!(outcome.line_count, 2);
    }

    #[test]
    fn test_clipboard_flush_last_n_status() {
        let log = ChatLog::new();
        log.add_message(ChatCategory::Say, "Alice", "one");
        let store = ProfileStore::new();
        let request = FlushRequest {
            folder_hint: String::new(),
            name_hint: String::new(),
            last_n: 5,
            show_timestamp: false,
            sink: FlushSink::Clipboard,
        };
        let outcome = log.flush(store.active(), &request).unwrap();
        assert_eq!(outcome.status, "Last 5 messages copied to clipboard.");
    }

    #[test]
    fn test_file_flush_writes_and_names() {
        let dir = TempDir::new().unwrap();
        let log = ChatLog::new();
        log.add_message(ChatCategory::Say, "Alice", "hi");

        let store = ProfileStore::new();
        let request = FlushRequest {
            folder_hint: dir.path().to_string_lossy().into_owned(),
            name_hint: "mylog".to_string(),
            last_n: 0,
            show_timestamp: false,
            sink: FlushSink::File,
        };
        let outcome = log.flush(store.active(), &request).unwrap();
        let path = outcome.path.unwrap();
        assert_eq!(path, dir.path().join("mylog.txt"));
        assert!(outcome.status.starts_with("Chat log saved at "));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            format!("mylog{LINE_ENDING}{LINE_ENDING}Alice: hi{LINE_ENDING}")
        );
    }

    #[test]
    fn test_double_flush_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let log = ChatLog::new();
        log.add_message(ChatCategory::Say, "Alice", "hi");

        let store = ProfileStore::new();
        let request = FlushRequest {
            folder_hint: dir.path().to_string_lossy().into_owned(),
            name_hint: "chat".to_string(),
            last_n: 0,
            show_timestamp: false,
            sink: FlushSink::File,
        };
        let first = log.flush(store.active(), &request).unwrap();
        let second = log.flush(store.active(), &request).unwrap();

        assert_eq!(first.path.as_deref(), Some(dir.path().join("chat.txt").as_path()));
        assert_eq!(second.path.as_deref(), Some(dir.path().join("chat1.txt").as_path()));
        for path in [first.path.unwrap(), second.path.unwrap()] {
            let meta = std::fs::metadata(&path).unwrap();
            assert!(meta.len() > 0, "{} should be non-empty", path.display());
        }
    }

    #[test]
    fn test_autosave_due_logic() {
        let log = ChatLog::new();
        log.mark_autosaved();
        assert!(!log.check_autosave_due(5.0));

        // Pretend the last autosave happened ten minutes ago.
        log.set_last_autosave(Utc::now() - Duration::minutes(10));
        assert!(log.check_autosave_due(5.0));
        assert!(!log.check_autosave_due(30.0));

        log.mark_autosaved();
        assert!(!log.check_autosave_due(5.0));
    }

    #[test]
    fn test_autosave_fractional_interval() {
        let log = ChatLog::new();
        log.set_last_autosave(Utc::now() - Duration::seconds(45));
        assert!(log.check_autosave_due(0.5));
        assert!(!log.check_autosave_due(1.0));
    }

    #[test]
    fn test_auto_save_disabled_is_noop() {
        let log = ChatLog::new();
        log.add_message(ChatCategory::Say, "Alice", "hi");
        let store = ProfileStore::new();
        let options = AutosaveOptions {
            enabled: false,
            ..Default::default()
        };
        let outcome = log.auto_save(store.active(), &options).unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn test_auto_save_writes_whole_log_and_keeps_buffer() {
        let dir = TempDir::new().unwrap();
        let log = ChatLog::new();
        log.add_message(ChatCategory::Say, "Alice", "one");
        log.add_message(ChatCategory::Say, "Alice", "two");

        let store = ProfileStore::new();
        let options = AutosaveOptions {
            enabled: true,
            folder_hint: dir.path().to_string_lossy().into_owned(),
            name_hint: "auto".to_string(),
            show_timestamp: false,
        };
        let outcome = log.auto_save(store.active(), &options).unwrap().unwrap();
        assert!(outcome.status.starts_with("Autosaved chat log to "));
        assert_eq!(outcome.line_count, 2);
        // The buffer survives; wiping is the caller's decision.
        assert_eq!(log.len(), 2);
    }
}
