// ChatScribe - app/session.rs
//
// The logger session: one explicitly constructed context object owning
// the persisted settings (profiles included) and the chat log, exposing
// the narrow hook surface the host drives:
//
//   on_event    — per incoming chat message, fire-and-forget
//   on_login    — session start, re-arms the autosave timer
//   on_logout   — session end, autosave (if enabled) then wipe
//   on_tick     — per host frame, runs autosave when due
//   save/copy   — the host's `save [n]` / `copy [n]` commands
//
// Status lines in returned outcomes are ready for the host's own
// messaging channel; error reporting to the user is the host's job.

use crate::core::category::ChatCategory;
use crate::core::log::ChatLog;
use crate::core::model::{AutosaveOptions, FlushOutcome, FlushRequest, FlushSink};
use crate::platform::config::{self, Settings};
use crate::util::error::FlushError;
use std::path::PathBuf;

/// A running logger session. Created at session start, dropped at end;
/// there is no ambient/static state.
#[derive(Debug)]
pub struct LoggerSession {
    settings: Settings,
    settings_path: PathBuf,
    log: ChatLog,
    logged_in: bool,
}

impl LoggerSession {
    /// Build a session from already-loaded settings.
    ///
    /// `settings_path` is where updated settings (active profile,
    /// last-autosave instant, ...) are persisted.
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        let log = ChatLog::new();
        log.set_last_autosave(settings.last_autosave);
        Self {
            settings,
            settings_path,
            log,
            logged_in: false,
        }
    }

    /// Convenience constructor: resolve platform paths and load (or
    /// default) the persisted settings.
    pub fn load_or_default() -> Self {
        let paths = config::PlatformPaths::resolve();
        let settings_path = paths.settings_path();
        let settings = config::load(&settings_path);
        Self::new(settings, settings_path)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings access for the host's configuration UI. Call
    /// [`LoggerSession::persist`] afterwards to write changes through.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    /// Persist the current settings. Failures are logged and swallowed;
    /// losing a settings write must never take the session down.
    pub fn persist(&mut self) {
        self.settings.last_autosave = self.log.last_autosave();
        if let Err(e) = config::save(&self.settings, &self.settings_path) {
            tracing::warn!(error = %e, "Failed to persist settings");
        }
    }

    // -------------------------------------------------------------------
    // Host lifecycle hooks
    // -------------------------------------------------------------------

    /// Ingest one chat message. Fire-and-forget.
    pub fn on_event(
        &self,
        category: ChatCategory,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) {
        self.log.add_message(category, sender, body);
    }

    /// Session start: re-arm the autosave timer so the first autosave
    /// happens a full interval after login.
    pub fn on_login(&mut self) {
        self.logged_in = true;
        self.log.mark_autosaved();
        self.persist();
        tracing::debug!("Session started; autosave re-armed");
    }

    /// Session end: if autosave is enabled, flush the whole log to the
    /// autosave destination and wipe the buffer.
    pub fn on_logout(&mut self) -> Result<Option<FlushOutcome>, FlushError> {
        self.logged_in = false;
        if !self.settings.autosave_enabled {
            return Ok(None);
        }
        let outcome = self
            .log
            .auto_save(self.settings.profiles.active(), &self.autosave_options())?;
        self.log.wipe();
        Ok(outcome)
    }

    /// Per-tick update: runs an autosave when one is due. Cheap when
    /// nothing is due (a single time comparison, no I/O).
    ///
    /// Returns `Ok(Some(..))` only when an autosave actually ran.
    pub fn on_tick(&mut self) -> Result<Option<FlushOutcome>, FlushError> {
        if !self.settings.autosave_enabled || !self.logged_in {
            return Ok(None);
        }
        if !self
            .log
            .check_autosave_due(self.settings.autosave_interval_minutes)
        {
            return Ok(None);
        }

        let outcome = self
            .log
            .auto_save(self.settings.profiles.active(), &self.autosave_options())?;
        if outcome.is_some() {
            self.log.mark_autosaved();
            self.persist();
        }
        Ok(outcome)
    }

    // -------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------

    /// `save [n]`: flush to a text file using the manual-save hints.
    pub fn save_command(&self, args: &str) -> Result<FlushOutcome, FlushError> {
        self.flush_command(args, FlushSink::File)
    }

    /// `copy [n]`: flush to clipboard text using the current settings.
    pub fn copy_command(&self, args: &str) -> Result<FlushOutcome, FlushError> {
        self.flush_command(args, FlushSink::Clipboard)
    }

    fn flush_command(&self, args: &str, sink: FlushSink) -> Result<FlushOutcome, FlushError> {
        let request = FlushRequest {
            folder_hint: self.settings.save_folder.clone(),
            name_hint: self.settings.save_name.clone(),
            last_n: parse_last_n(args),
            show_timestamp: self.settings.show_timestamps,
            sink,
        };
        self.log.flush(self.settings.profiles.active(), &request)
    }

    fn autosave_options(&self) -> AutosaveOptions {
        AutosaveOptions {
            enabled: self.settings.autosave_enabled,
            folder_hint: self.settings.autosave_folder.clone(),
            name_hint: self.settings.autosave_name.clone(),
            show_timestamp: self.settings.show_timestamps,
        }
    }
}

/// Parse the optional trailing message count of `save [n]` / `copy [n]`.
/// Anything that is not a plain positive integer means "the whole log".
fn parse_last_n(args: &str) -> usize {
    args.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> LoggerSession {
        let mut settings = Settings::default();
        let folder = dir.path().to_string_lossy().into_owned();
        settings.save_folder = folder.clone();
        settings.save_name = "manual".to_string();
        settings.autosave_folder = folder;
        settings.autosave_name = "auto".to_string();
        LoggerSession::new(settings, dir.path().join("settings.json"))
    }

    #[test]
    fn test_parse_last_n() {
        assert_eq!(parse_last_n(""), 0);
        assert_eq!(parse_last_n("  42 "), 42);
        assert_eq!(parse_last_n("abc"), 0);
        assert_eq!(parse_last_n("-5"), 0);
        assert_eq!(parse_last_n("3.5"), 0);
    }

    #[test]
    fn test_on_event_appends() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        session.on_event(ChatCategory::Say, "Alice", "hi");
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_save_command_with_count() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        for i in 0..5 {
            session.on_event(ChatCategory::Say, "Alice", format!("msg {i}"));
        }
        let outcome = session.save_command("2").unwrap();
        assert_eq!(outcome.line_count, 2);
        assert!(outcome.status.starts_with("Last 2 messages saved at "));

        let content = std::fs::read_to_string(outcome.path.unwrap()).unwrap();
        assert!(content.contains("msg 3"));
        assert!(content.contains("msg 4"));
        assert!(!content.contains("msg 2"));
    }

    #[test]
    fn test_copy_command_returns_text() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        session.on_event(ChatCategory::Say, "Alice", "hi");
        let outcome = session.copy_command("").unwrap();
        assert_eq!(outcome.status, "Chat log copied to clipboard.");
        assert!(outcome.clipboard_text.unwrap().contains("Alice: hi"));
        // Nothing was written to the save folder.
        assert!(!dir.path().join("manual.txt").exists());
    }

    #[test]
    fn test_logout_with_autosave_disabled_keeps_buffer() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.on_event(ChatCategory::Say, "Alice", "hi");
        let outcome = session.on_logout().unwrap();
        assert!(outcome.is_none());
        assert_eq!(session.log().len(), 1);
        assert!(!dir.path().join("auto.txt").exists());
    }

    #[test]
    fn test_logout_with_autosave_flushes_and_wipes() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.settings_mut().autosave_enabled = true;
        session.on_event(ChatCategory::Say, "Alice", "hi");

        let outcome = session.on_logout().unwrap().unwrap();
        assert!(outcome.status.starts_with("Autosaved chat log to "));
        assert!(session.log().is_empty());
        assert!(dir.path().join("auto.txt").exists());
    }

    #[test]
    fn test_tick_runs_autosave_when_due() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.settings_mut().autosave_enabled = true;
        session.on_login();
        session.on_event(ChatCategory::Say, "Alice", "hi");

        // Freshly re-armed: nothing due yet.
        assert!(session.on_tick().unwrap().is_none());

        // Backdate the timer past the interval.
        session
            .log()
            .set_last_autosave(chrono::Utc::now() - chrono::Duration::minutes(30));
        let outcome = session.on_tick().unwrap();
        assert!(outcome.is_some());
        assert!(dir.path().join("auto.txt").exists());
        // The buffer is NOT wiped by a periodic autosave.
        assert_eq!(session.log().len(), 1);

        // Timer was re-armed; an immediate second tick does nothing.
        assert!(session.on_tick().unwrap().is_none());
    }

    #[test]
    fn test_tick_ignores_when_logged_out() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.settings_mut().autosave_enabled = true;
        session.on_event(ChatCategory::Say, "Alice", "hi");
        session
            .log()
            .set_last_autosave(chrono::Utc::now() - chrono::Duration::minutes(30));
        assert!(session.on_tick().unwrap().is_none());
    }

    #[test]
    fn test_persist_records_last_autosave() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.on_login();

        let reloaded = crate::platform::config::load(&dir.path().join("settings.json"));
        let drift = chrono::Utc::now() - reloaded.last_autosave;
        assert!(drift < chrono::Duration::minutes(1));
    }
}
