//! Presentation settings
//!
//! Loaded from the JSON file named by `LEE_CARVALLO_SETTINGS`. Physics is
//! fixed per build and deliberately absent here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Animation pacing presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnimationSpeed {
    /// No delays at all
    Instant,
    #[default]
    Normal,
    Slow,
}

impl AnimationSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationSpeed::Instant => "Instant",
            AnimationSpeed::Normal => "Normal",
            AnimationSpeed::Slow => "Slow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "instant" | "off" => Some(AnimationSpeed::Instant),
            "normal" => Some(AnimationSpeed::Normal),
            "slow" => Some(AnimationSpeed::Slow),
            _ => None,
        }
    }

    /// Multiplier applied to every pause and frame delay
    pub fn scale(&self) -> f32 {
        match self {
            AnimationSpeed::Instant => 0.0,
            AnimationSpeed::Normal => 1.0,
            AnimationSpeed::Slow => 2.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pacing preset
    pub animation: AnimationSpeed,
    /// Delay after each animation frame (ms, before scaling)
    pub frame_delay_ms: u64,
    /// File the certificate printer writes to
    pub printer_path: PathBuf,
    /// Fixed layout seed; random from the clock when unset
    pub layout_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            animation: AnimationSpeed::Normal,
            frame_delay_ms: 12,
            printer_path: PathBuf::from("zx-printer.txt"),
            layout_seed: None,
        }
    }
}

impl Settings {
    /// Environment variable holding the settings file path
    pub const PATH_VAR: &'static str = "LEE_CARVALLO_SETTINGS";

    /// Scale a pause by the animation preset
    pub fn scaled_millis(&self, millis: u64) -> u64 {
        (millis as f32 * self.animation.scale()).round() as u64
    }

    /// Per-frame delay after scaling
    pub fn frame_millis(&self) -> u64 {
        self.scaled_millis(self.frame_delay_ms)
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a file, falling back to defaults if it is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from the path in `LEE_CARVALLO_SETTINGS`, if set
    pub fn load() -> Self {
        match std::env::var_os(Self::PATH_VAR) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
