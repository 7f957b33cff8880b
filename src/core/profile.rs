// ChatScribe - core/profile.rs
//
// Named visibility profiles and the store that owns them.
//
// Invariant: the store always contains the permanent default profile at
// slot 0, and exactly one profile is active at any time. All mutating
// operations preserve this; `normalize` restores it after deserialising
// a hand-edited or damaged settings file.

use crate::core::category::ChatCategory;
use crate::util::constants::DEFAULT_PROFILE_NAME;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Channel profile
// =============================================================================

/// A named mapping of which categories are included in a flushed view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelProfile {
    /// Display name. Not required to be unique.
    pub name: String,

    /// Category visibility map. A category absent from the map is treated
    /// as disabled (fail-closed) — see [`ChannelProfile::is_enabled`].
    pub enabled: HashMap<ChatCategory, bool>,

    /// Sender display-name substitutions applied when preparing a view.
    /// Keyed on the incoming sender name, exact match.
    #[serde(default)]
    pub name_replacements: HashMap<String, String>,

    /// Whether this profile is the one consulted on flush. Managed by
    /// [`ProfileStore`]; exactly one profile has this set.
    #[serde(default)]
    pub is_active: bool,
}

impl ChannelProfile {
    /// Create a profile with the default visibility map: conversational
    /// categories enabled, overflow and system channels disabled.
    pub fn new(name: impl Into<String>) -> Self {
        let enabled = ChatCategory::all()
            .iter()
            .map(|c| (*c, c.default_enabled()))
            .collect();
        Self {
            name: name.into(),
            enabled,
            name_replacements: HashMap::new(),
            is_active: false,
        }
    }

    /// Whether `category` is included in views filtered by this profile.
    /// Missing map entries are disabled.
    pub fn is_enabled(&self, category: ChatCategory) -> bool {
        self.enabled.get(&category).copied().unwrap_or(false)
    }

    /// Sender name to render for `sender`, honouring replacements.
    pub fn display_sender<'a>(&'a self, sender: &'a str) -> &'a str {
        self.name_replacements
            .get(sender)
            .map(String::as_str)
            .unwrap_or(sender)
    }
}

// =============================================================================
// Profile store
// =============================================================================

/// Collection of visibility profiles with a single active selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileStore {
    profiles: Vec<ChannelProfile>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        let mut default_profile = ChannelProfile::new(DEFAULT_PROFILE_NAME);
        default_profile.is_active = true;
        Self {
            profiles: vec![default_profile],
        }
    }
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All profiles, default first.
    pub fn profiles(&self) -> &[ChannelProfile] {
        &self.profiles
    }

    /// Mutable access to a profile for toggling categories or editing
    /// name replacements.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut ChannelProfile> {
        self.profiles.get_mut(index)
    }

    /// The currently active profile.
    pub fn active(&self) -> &ChannelProfile {
        self.profiles
            .iter()
            .find(|p| p.is_active)
            .unwrap_or(&self.profiles[0])
    }

    /// Index of the currently active profile.
    pub fn active_index(&self) -> usize {
        self.profiles
            .iter()
            .position(|p| p.is_active)
            .unwrap_or(0)
    }

    /// Make the profile at `index` the active one, clearing the previous
    /// active flag. Out-of-range indices are logged and ignored; the
    /// store never ends up with zero active profiles.
    pub fn set_active(&mut self, index: usize) {
        if index >= self.profiles.len() {
            tracing::warn!(
                index,
                count = self.profiles.len(),
                "set_active: no such profile"
            );
            return;
        }
        for profile in &mut self.profiles {
            profile.is_active = false;
        }
        self.profiles[index].is_active = true;
        tracing::debug!(name = %self.profiles[index].name, "Active profile changed");
    }

    /// Append a new profile with the default visibility map and return
    /// its index. The new profile is NOT made active.
    pub fn add_profile(&mut self, name: impl Into<String>) -> usize {
        self.profiles.push(ChannelProfile::new(name));
        self.profiles.len() - 1
    }

    /// Remove the profile at `index`. If it was active, the permanent
    /// default becomes active first. Removing the default (slot 0) or an
    /// out-of-range index is a no-op.
    pub fn remove_profile(&mut self, index: usize) {
        if index == 0 || index >= self.profiles.len() {
            tracing::warn!(
                index,
                count = self.profiles.len(),
                "remove_profile: refusing (default profile or out of range)"
            );
            return;
        }
        if self.profiles[index].is_active {
            self.set_active(0);
        }
        let removed = self.profiles.remove(index);
        tracing::debug!(name = %removed.name, "Profile removed");
    }

    /// Restore the store invariants after deserialisation: at least the
    /// default profile exists, and exactly one profile is active.
    pub fn normalize(&mut self) {
        if self.profiles.is_empty() {
            tracing::warn!("Profile store empty after load; recreating default profile");
            *self = Self::default();
            return;
        }
        let active_count = self.profiles.iter().filter(|p| p.is_active).count();
        if active_count != 1 {
            tracing::warn!(active_count, "Active-flag invariant violated; resetting");
            let first_active = self
                .profiles
                .iter()
                .position(|p| p.is_active)
                .unwrap_or(0);
            self.set_active(first_active);
        }
    }
}
