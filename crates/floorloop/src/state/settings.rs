//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chain::{ChainConfig, DEFAULT_TOLERANCE};
use crate::error::SettingsError;
use crate::loop_check::{LoopChecker, DEFAULT_MIN_SEGMENTS};

/// Chaining and loop check settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSettings {
    /// Endpoint coincidence threshold in base units
    pub tolerance: f64,
    /// Minimum number of valid lines for a loop
    pub min_segments: usize,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_segments: DEFAULT_MIN_SEGMENTS,
        }
    }
}

/// Settings passed to the floor builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorSettings {
    /// Floor type name to look up in the host
    pub floor_type: String,
    /// Level name; `None` = level of the active view
    pub level: Option<String>,
}

impl Default for FloorSettings {
    fn default() -> Self {
        Self {
            floor_type: "Floor-Grnd-Susp_65Scr-80Ins-100Blk-75PC".to_string(),
            level: None,
        }
    }
}

/// All application settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub chain: ChainSettings,
    #[serde(default)]
    pub floor: FloorSettings,
}

impl AppSettings {
    /// `settings.json` in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "floorloop", "floorloop")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the default location, or return default if not found
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Lenient load: a missing file gives defaults silently, an unreadable or
    /// invalid one gives defaults with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings in {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path; errors are reported, not swallowed
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: AppSettings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the default location and return the path written.
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::default_path()
            .ok_or_else(|| SettingsError::Invalid("no config directory for this platform".to_string()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write settings as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let tol = self.chain.tolerance;
        if !(tol.is_finite() && tol > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "tolerance must be a positive number, got {tol}"
            )));
        }
        if self.chain.min_segments == 0 {
            return Err(SettingsError::Invalid("min_segments must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn chain_config(&self) -> ChainConfig {
        ChainConfig::with_tolerance(self.chain.tolerance)
    }

    pub fn loop_checker(&self) -> LoopChecker {
        LoopChecker::new(self.chain_config(), self.chain.min_segments)
    }
}
