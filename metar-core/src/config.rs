use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fs, path::PathBuf};

use crate::error::{ErrorKind, ErrorPolicy};

/// Unit system for decoded values. Wind speed is always given in knots and
/// cloud heights in feet, whatever the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow!("Unknown unit system '{value}'. Supported: metric, imperial.")),
        }
    }
}

/// Decoder settings stored on disk.
///
/// Example TOML:
/// ```toml
/// units = "imperial"
/// true_cardinal_directions = true
///
/// [error_policy]
/// precedence = ["empty_report", "station_missing"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub units: UnitSystem,

    /// Give directions as compass points (`W`) instead of degrees (`270°`).
    pub true_cardinal_directions: bool,

    pub error_policy: ErrorPolicy,
}

impl Settings {
    /// Move `kind` to the top of the error precedence.
    pub fn prioritize_error(&mut self, kind: ErrorKind) {
        self.error_policy.precedence.retain(|k| *k != kind);
        self.error_policy.precedence.insert(0, kind);
    }

    /// Load settings from disk, or return defaults if none were saved yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(contents)?;
        Ok(settings)
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the settings file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "metar-decoder", "metar")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("settings.toml"))
    }
}
