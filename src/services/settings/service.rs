use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use directories::ProjectDirs;

use crate::error::LayoutResult;
use crate::models::settings::LayoutSettings;
use crate::services::layout::LayoutEngine;

const SETTINGS_FILE: &str = "config.toml";

/// Location of the settings file in the user's configuration directory
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "Fahrplan", "TimetableLayout")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Build a layout engine configured by `settings`.
///
/// Falls back to UTC when the time zone does not parse.
pub fn layout_engine(settings: &LayoutSettings) -> LayoutResult<LayoutEngine> {
    let tz = settings.tz().unwrap_or_else(|err| {
        log::warn!("{}, using UTC", err);
        Tz::UTC
    });
    Ok(LayoutEngine::new(settings.standard_height)?.with_time_zone(tz))
}

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings, or the defaults when no file exists yet
    pub fn get(&self) -> Result<LayoutSettings> {
        if !self.path.exists() {
            log::info!(
                "No settings at {}, using defaults",
                self.path.display()
            );
            return Ok(LayoutSettings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        let settings: LayoutSettings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &LayoutSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}
