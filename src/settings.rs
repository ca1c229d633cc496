//! Host settings
//!
//! Game rules are fixed; these only control how the native host drives a run.
//! Stored as JSON next to the best score file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::autopilot::AutopilotMode;

/// Errors reading or writing a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Native host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the best score is kept
    pub best_score_path: PathBuf,
    /// Delay between frame callbacks (ms)
    pub frame_interval_ms: u64,
    /// Stop after this many frames even if the run is still going
    pub max_frames: u64,
    /// Strategy of the computer player
    pub autopilot: AutopilotMode,
    /// RNG seed; random when absent
    pub seed: Option<u64>,
    /// Print every rendered frame instead of only the last one
    pub print_frames: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            best_score_path: PathBuf::from("wrap-snake-best.json"),
            frame_interval_ms: 16,
            max_frames: 60 * 60 * 5,
            autopilot: AutopilotMode::Greedy,
            seed: None,
            print_frames: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
