// ChatScribe - platform/config.rs
//
// Persisted settings and platform path resolution.
//
// Design principles:
// - Settings are saved atomically (write→temp, rename→final) so a crash
//   during save never corrupts the previous good file.
// - Load errors are silently discarded: a missing, malformed, or
//   version-mismatched file just yields defaults (first-run behaviour).
// - Out-of-range values are clamped to defaults with a warning rather
//   than rejected.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::profile::ProfileStore;
use crate::util::constants::{
    APP_ID, DEFAULT_AUTOSAVE_INTERVAL_MIN, MAX_AUTOSAVE_INTERVAL_MIN, MIN_AUTOSAVE_INTERVAL_MIN,
    SETTINGS_FILE_NAME, SETTINGS_VERSION,
};
use crate::util::error::SettingsError;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// Platform paths
// =============================================================================

/// Resolved platform paths for ChatScribe data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/chatscribe/ or
    /// %APPDATA%\ChatScribe\).
    pub config_dir: PathBuf,

    /// Data directory.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();
            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );
            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Path of the persisted settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE_NAME)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// The complete persisted configuration.
///
/// Owned by the session layer at runtime; the core reads individual
/// fields through it. Unknown keys in the file are ignored and missing
/// keys take defaults, so minor format additions are tolerated without
/// bumping the version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema version — must equal `SETTINGS_VERSION` to be accepted.
    pub version: u32,

    /// Visibility profiles, including the active selection.
    pub profiles: ProfileStore,

    /// Prefix flushed lines with the `[h:mm AM]` ingestion time.
    pub show_timestamps: bool,

    /// Autosave master switch.
    pub autosave_enabled: bool,

    /// Autosave interval in minutes.
    pub autosave_interval_minutes: f32,

    /// Instant of the last completed autosave.
    pub last_autosave: DateTime<Utc>,

    /// Manual-save destination folder hint (empty = documents directory).
    pub save_folder: String,

    /// Manual-save base file name hint (empty = timestamp name).
    pub save_name: String,

    /// Autosave destination folder hint.
    pub autosave_folder: String,

    /// Autosave base file name hint.
    pub autosave_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            profiles: ProfileStore::default(),
            show_timestamps: false,
            autosave_enabled: false,
            autosave_interval_minutes: DEFAULT_AUTOSAVE_INTERVAL_MIN,
            last_autosave: DateTime::<Utc>::UNIX_EPOCH,
            save_folder: String::new(),
            save_name: String::new(),
            autosave_folder: String::new(),
            autosave_name: String::new(),
        }
    }
}

impl Settings {
    /// Clamp out-of-range values and restore profile-store invariants.
    /// Called after every load.
    fn validate(&mut self) {
        if !(MIN_AUTOSAVE_INTERVAL_MIN..=MAX_AUTOSAVE_INTERVAL_MIN)
            .contains(&self.autosave_interval_minutes)
        {
            tracing::warn!(
                value = self.autosave_interval_minutes,
                min = MIN_AUTOSAVE_INTERVAL_MIN,
                max = MAX_AUTOSAVE_INTERVAL_MIN,
                default = DEFAULT_AUTOSAVE_INTERVAL_MIN,
                "Autosave interval out of range; using default"
            );
            self.autosave_interval_minutes = DEFAULT_AUTOSAVE_INTERVAL_MIN;
        }
        self.profiles.normalize();
    }
}

// =============================================================================
// I/O helpers
// =============================================================================

/// Load settings from `path`.
///
/// Returns defaults on any error (file not found, JSON parse failure,
/// version mismatch); only the malformed cases are logged.
pub fn load(path: &Path) -> Settings {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            // "Not found" is the normal first run.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read settings file");
            }
            return Settings::default();
        }
    };

    let mut settings: Settings = match serde_json::from_str(&content) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Settings file is malformed — using defaults"
            );
            return Settings::default();
        }
    };

    if settings.version != SETTINGS_VERSION {
        tracing::warn!(
            found = settings.version,
            expected = SETTINGS_VERSION,
            "Settings file version mismatch — using defaults"
        );
        return Settings::default();
    }

    settings.validate();
    tracing::info!(path = %path.display(), "Settings loaded");
    settings
}

/// Save `settings` to `path` atomically (write temp → rename).
///
/// Creates all parent directories as needed.
pub fn save(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let json =
        serde_json::to_string_pretty(settings).map_err(|e| SettingsError::Serialize {
            path: path.to_path_buf(),
            source: e,
        })?;

    // Atomic write: a crash between write and rename loses the new
    // settings but never corrupts the previous file.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| SettingsError::Io {
        path: tmp.clone(),
        operation: "write",
        source: e,
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        SettingsError::Io {
            path: path.to_path_buf(),
            operation: "rename",
            source: e,
        }
    })?;

    tracing::debug!(path = %path.display(), "Settings saved");
    Ok(())
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::ChatCategory;
    use tempfile::TempDir;

    fn sample_settings() -> Settings {
        let mut settings = Settings::default();
        settings.show_timestamps = true;
        settings.autosave_enabled = true;
        settings.autosave_interval_minutes = 10.0;
        settings.save_folder = "/tmp/chat".to_string();
        settings.save_name = "session".to_string();
        let idx = settings.profiles.add_profile("Raids");
        settings.profiles.set_active(idx);
        settings
            .profiles
            .get_mut(idx)
            .unwrap()
            .enabled
            .insert(ChatCategory::Linkshell1, true);
        settings
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let original = sample_settings();

        save(&original, &path).expect("save should succeed");
        let loaded = load(&path);

        assert_eq!(loaded.version, SETTINGS_VERSION);
        assert!(loaded.show_timestamps);
        assert!(loaded.autosave_enabled);
        assert_eq!(loaded.autosave_interval_minutes, 10.0);
        assert_eq!(loaded.save_folder, "/tmp/chat");
        assert_eq!(loaded.save_name, "session");
        assert_eq!(loaded.profiles.profiles().len(), 2);
        assert_eq!(loaded.profiles.active().name, "Raids");
        assert!(loaded
            .profiles
            .active()
            .is_enabled(ChatCategory::Linkshell1));
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load(&dir.path().join("nonexistent.json"));
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert!(!settings.autosave_enabled);
    }

    #[test]
    fn test_load_malformed_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        let settings = load(&path);
        assert!(!settings.show_timestamps);
        assert_eq!(settings.profiles.profiles().len(), 1);
    }

    #[test]
    fn test_load_wrong_version_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = sample_settings();
        settings.version = 99;
        save(&settings, &path).unwrap();
        let loaded = load(&path);
        assert!(!loaded.autosave_enabled);
    }

    #[test]
    fn test_load_clamps_interval() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = sample_settings();
        settings.autosave_interval_minutes = -3.0;
        save(&settings, &path).unwrap();
        let loaded = load(&path);
        assert_eq!(
            loaded.autosave_interval_minutes,
            DEFAULT_AUTOSAVE_INTERVAL_MIN
        );
    }

    #[test]
    fn test_save_atomic_leftover_tmp_is_harmless() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        save(&sample_settings(), &path).unwrap();

        // Simulate a leftover temp file from a previous crash.
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let mut updated = sample_settings();
        updated.autosave_interval_minutes = 20.0;
        save(&updated, &path).unwrap();

        assert_eq!(load(&path).autosave_interval_minutes, 20.0);
    }
}
