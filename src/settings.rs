//! Match rules and preferences
//!
//! The rule flags select between the classic fixed serve and the richer
//! variant with random serves, free paddle movement, spin and a jittery AI.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_VERTICAL_SPEED, TICK_RATE};
use crate::sim::AiPolicy;

/// Why settings could not be loaded or used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read or write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Rule flags and tuning for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Random serve angle in [30°, 150°] and random left/right direction.
    /// When off every serve is `(speed, speed)`.
    pub randomized_serve: bool,
    /// Human paddle may also move along x within the left half
    pub horizontal_paddle_movement: bool,
    /// Left paddle hits add vertical velocity proportional to impact offset
    pub paddle_spin: bool,
    /// How the right paddle tracks the ball
    pub ai_policy: AiPolicy,
    /// AI acts on a frame only when a draw from `0..ai_reaction_delay` is 0
    pub ai_reaction_delay: u32,
    /// Cap on |vel.y| after spin is applied
    pub max_vertical_speed: f32,
    /// Frames per second
    pub tick_rate: u32,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            randomized_serve: true,
            horizontal_paddle_movement: true,
            paddle_spin: true,
            ai_policy: AiPolicy::Noisy,
            ai_reaction_delay: 1,
            max_vertical_speed: MAX_VERTICAL_SPEED,
            tick_rate: TICK_RATE,
            seed: None,
        }
    }
}

impl Settings {
    /// The original rules: fixed diagonal serve, vertical-only paddle,
    /// no spin, perfect tracking AI
    pub fn classic() -> Self {
        Self {
            randomized_serve: false,
            horizontal_paddle_movement: false,
            paddle_spin: false,
            ai_policy: AiPolicy::Deterministic,
            ..Self::default()
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.ai_reaction_delay == 0 {
            return Err(SettingsError::Invalid {
                field: "ai_reaction_delay",
                reason: "must be at least 1",
            });
        }
        if !self.max_vertical_speed.is_finite() || self.max_vertical_speed <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "max_vertical_speed",
                reason: "must be a positive finite number",
            });
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::Invalid {
                field: "tick_rate",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "canvas_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Settings saved"),
                    Err(e) => log::warn!("Failed to save settings: {:?}", e),
                }
            }
        }
    }

    /// Native builds have no LocalStorage: always the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
