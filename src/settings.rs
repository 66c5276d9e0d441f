//! Arena settings
//!
//! Supplied by the host as JSON (browser page or native settings file). Every
//! field has a default, so partial documents are fine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems with a settings document
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("viewport must be positive, got {width}x{height}")]
    Viewport { width: f32, height: f32 },
    #[error("max_frame_dt must be finite and non-negative, got {0}")]
    FrameDelta(f32),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Visible area in world units (drives the spawn ring)
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Bots placed before the first frame
    pub initial_bots: u32,
    /// Longest frame the simulation will integrate in one step (seconds)
    pub max_frame_dt: f32,
    /// Seconds between leaderboard refreshes
    pub leaderboard_interval: f32,
    /// World-to-minimap scale
    pub minimap_scale: f32,
    /// Minimap edge length in pixels
    pub minimap_size: f32,
    /// Fixed run seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            initial_bots: 10,
            max_frame_dt: 0.1,
            leaderboard_interval: 5.0,
            minimap_scale: 0.05,
            minimap_size: 150.0,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize back to JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.viewport_width) || !positive(self.viewport_height) {
            return Err(SettingsError::Viewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if !self.max_frame_dt.is_finite() || self.max_frame_dt < 0.0 {
            return Err(SettingsError::FrameDelta(self.max_frame_dt));
        }
        for (name, value) in [
            ("leaderboard_interval", self.leaderboard_interval),
            ("minimap_scale", self.minimap_scale),
            ("minimap_size", self.minimap_size),
        ] {
            if !positive(value) {
                return Err(SettingsError::NonPositive { name, value });
            }
        }
        Ok(())
    }

    /// Update the viewport after a resize, ignoring degenerate sizes
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport_width = width;
            self.viewport_height = height;
        } else {
            log::warn!("Ignoring viewport resize to {}x{}", width, height);
        }
    }

    /// Load settings from the file named by `TRIANGLE_ARENA_SETTINGS` (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("TRIANGLE_ARENA_SETTINGS") else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Rejected settings in {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}
