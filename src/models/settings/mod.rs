// Settings module
// Grid dimensions and interaction preferences, stored as TOML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::services::history::HISTORY_KEY;
use crate::utils::time::DEFAULT_SLOT_HEIGHT;

/// Modifier that turns a drag on an existing item into a duplicate drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateModifier {
    /// Ctrl, or Cmd on macOS.
    Command,
    Alt,
    Shift,
}

impl DuplicateModifier {
    pub fn is_held(&self, modifiers: &egui::Modifiers) -> bool {
        match self {
            DuplicateModifier::Command => modifiers.command || modifiers.ctrl,
            DuplicateModifier::Alt => modifiers.alt,
            DuplicateModifier::Shift => modifiers.shift,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub slot_height: f32,
    pub header_height: f32,
    pub time_column_width: f32,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    pub duplicate_modifier: DuplicateModifier,
    /// Key the autocomplete history is stored under.
    pub history_key: String,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            slot_height: DEFAULT_SLOT_HEIGHT,
            header_height: 48.0,
            time_column_width: 64.0,
            first_day_of_week: 0, // Sunday
            duplicate_modifier: DuplicateModifier::Command,
            history_key: HISTORY_KEY.to_string(),
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("slot_height", self.slot_height),
            ("header_height", self.header_height),
            ("time_column_width", self.time_column_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number", name));
            }
        }

        if self.slot_height == 0.0 {
            return Err("slot_height must be greater than zero".to_string());
        }

        if self.first_day_of_week > 6 {
            return Err("first_day_of_week must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }

        if self.history_key.trim().is_empty() {
            return Err("history_key cannot be empty".to_string());
        }

        Ok(())
    }

    /// Platform config location, e.g. `~/.config/meeting-scheduler/grid.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "MeetingScheduler", "meeting-scheduler")
            .map(|dirs| dirs.config_dir().join("grid.toml"))
    }

    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No grid settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read grid settings from {}", path.display()))?;
        let settings: Self = toml::from_str(&data)
            .with_context(|| format!("failed to parse grid settings in {}", path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", path.display(), e))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate().map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(self).context("failed to serialize grid settings")?;
        fs::write(path, data)
            .with_context(|| format!("failed to write grid settings to {}", path.display()))?;
        Ok(())
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("Unable to resolve config directory; using default grid settings");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load grid settings: {:#}, using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_settings() {
        let settings = GridSettings::default();
        assert_eq!(settings.slot_height, 7.0);
        assert_eq!(settings.first_day_of_week, 0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = GridSettings::default();
        settings.first_day_of_week = 7;
        assert!(settings.validate().is_err());

        let mut settings = GridSettings::default();
        settings.slot_height = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = GridSettings::default();
        settings.header_height = f32::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: GridSettings =
            toml::from_str("first_day_of_week = 1\nduplicate_modifier = \"alt\"\n").unwrap();
        assert_eq!(settings.first_day_of_week, 1);
        assert_eq!(settings.duplicate_modifier, DuplicateModifier::Alt);
        assert_eq!(settings.slot_height, DEFAULT_SLOT_HEIGHT);
    }

    #[test]
    fn test_duplicate_modifier_is_held() {
        let ctrl = egui::Modifiers {
            ctrl: true,
            command: true,
            ..Default::default()
        };
        let alt = egui::Modifiers {
            alt: true,
            ..Default::default()
        };

        assert!(DuplicateModifier::Command.is_held(&ctrl));
        assert!(!DuplicateModifier::Command.is_held(&alt));
        assert!(DuplicateModifier::Alt.is_held(&alt));
        assert!(!DuplicateModifier::Shift.is_held(&egui::Modifiers::default()));
    }
}
