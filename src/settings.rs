use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::Delimiter;

const APP_DIR: &str = "csv-finder";
const SETTINGS_FILE: &str = "settings.json";

// ---------------------------------------------------------------------------
// Settings value
// ---------------------------------------------------------------------------

/// User preferences that change how data is parsed, filtered and copied.
///
/// Loaded once at startup and passed by value into the engine; the whole
/// object is saved again after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Treat the first row as column names.
    pub has_header: bool,
    /// Filter by the whole query as one phrase instead of by words.
    pub exact_match: bool,
    /// Drop rows whose cells are all blank (`,,`) when loading. Completely
    /// empty lines are skipped by the reader regardless.
    pub skip_empty_rows: bool,
    /// Strip `$` and `,` from copied cells.
    pub simplify_numbers: bool,
    pub delimiter: Delimiter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            has_header: true,
            exact_match: false,
            skip_empty_rows: true,
            simplify_numbers: true,
            delimiter: Delimiter::Auto,
        }
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Best-effort settings persistence. Failures are logged by the store and
/// never reach the caller.
pub trait SettingsStore {
    fn load(&self) -> Settings;
    fn save(&mut self, settings: &Settings);
}

/// Stores settings as pretty JSON in the user's config directory.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Store at the platform config location, e.g.
    /// `~/.config/csv-finder/settings.json`.
    pub fn new() -> Option<Self> {
        let dir = dirs::config_dir()?.join(APP_DIR);
        Some(Self::with_path(dir.join(SETTINGS_FILE)))
    }

    /// Store at an explicit path (primarily for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path).context("reading settings file")?;
        let settings = serde_json::from_str(&text).context("parsing settings file")?;
        Ok(Some(settings))
    }

    fn try_save(&self, settings: &Settings) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).context("creating settings directory")?;
        }
        let text = serde_json::to_string_pretty(settings).context("serializing settings")?;
        std::fs::write(&self.path, text).context("writing settings file")?;
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => {
                log::debug!("Loaded settings from {}", self.path.display());
                settings
            }
            Ok(None) => Settings::default(),
            Err(e) => {
                log::warn!("Ignoring settings at {}: {e:#}", self.path.display());
                Settings::default()
            }
        }
    }

    fn save(&mut self, settings: &Settings) {
        if let Err(e) = self.try_save(settings) {
            log::warn!("Could not save settings to {}: {e:#}", self.path.display());
        }
    }
}

/// Keeps settings for the lifetime of the process only. Used when no config
/// directory is available.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    settings: Settings,
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Settings {
        self.settings
    }

    fn save(&mut self, settings: &Settings) {
        self.settings = *settings;
    }
}
