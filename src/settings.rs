//! Game settings
//!
//! Read once at startup from an optional JSON file. Never written back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::VOLUME;

/// Autopilot tuning for headless runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Chance (0.0 - 1.0) that an autopilot shot is aimed at a live duck
    pub accuracy: f32,
    /// Pause between autopilot shots
    pub shot_interval_ms: u64,
    /// Pause before the autopilot presses a key on menus and end screens
    pub key_delay_ms: u64,
    /// Runs end after this much simulated time even if the game has not
    pub max_duration_ms: u64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            accuracy: 0.7,
            shot_interval_ms: 400,
            key_delay_ms: 600,
            max_duration_ms: 5 * 60 * 1000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Volume (0.0 - 1.0)
    pub volume: f32,
    pub muted: bool,

    // === Assets ===
    /// Directory holding sprites and sounds
    pub asset_root: String,

    // === Simulation ===
    /// RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,

    pub demo: DemoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: VOLUME,
            muted: false,
            asset_root: "assets".to_string(),
            seed: None,
            demo: DemoSettings::default(),
        }
    }
}

impl Settings {
    /// Environment variable naming a settings file
    pub const ENV_VAR: &'static str = "DUCK_HUNT_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.volume = settings.volume.clamp(0.0, 1.0);
        settings.demo.accuracy = settings.demo.accuracy.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Load from a JSON file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from the file named by `DUCK_HUNT_SETTINGS`, or use defaults
    pub fn load() -> Self {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
