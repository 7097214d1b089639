//! Session settings
//!
//! Viewport geometry and spawn timing. Loaded from JSON; every field is
//! optional and falls back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FRAMES_PER_SECOND, MAX_FRAME_DELTA_MS, MAX_SUBSTEPS};

/// Errors produced while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Drawing surface geometry as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Canvas width in pixels
    pub width: f32,
    /// Canvas height in pixels
    pub height: f32,
    /// Device scale factor
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 640.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Resting line of the token stack: halfway down plus a sixth of the height
    #[inline]
    pub fn rest_y(&self) -> f32 {
        self.half_height() + self.height / 6.0
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub viewport: Viewport,

    // === Timing ===
    /// Simulation frame rate
    pub frames_per_second: u32,
    /// Delay between the end of the intro and the first orb wave (ms)
    pub first_spawn_delay_ms: u32,
    /// Period between orb waves (ms)
    pub orb_spawn_ms: u32,
    /// Period between block waves (ms)
    pub block_spawn_ms: u32,

    // === Rules ===
    /// Require real horizontal overlap before a block blocks the stack.
    /// Off reproduces the arcade behaviour where entering the band is enough.
    pub strict_block_collision: bool,

    /// RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),

            frames_per_second: FRAMES_PER_SECOND,
            first_spawn_delay_ms: 1000,
            orb_spawn_ms: 1500,
            block_spawn_ms: 2000,

            strict_block_collision: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the settings describe a playable session
    pub fn validate(&self) -> Result<(), SettingsError> {
        let vp = &self.viewport;
        if !(vp.width.is_finite() && vp.width > 0.0) {
            return Err(SettingsError::Invalid {
                field: "viewport.width",
                reason: "must be a positive number",
            });
        }
        if !(vp.height.is_finite() && vp.height > 0.0) {
            return Err(SettingsError::Invalid {
                field: "viewport.height",
                reason: "must be a positive number",
            });
        }
        if !(vp.scale.is_finite() && vp.scale > 0.0) {
            return Err(SettingsError::Invalid {
                field: "viewport.scale",
                reason: "must be a positive number",
            });
        }
        if self.frames_per_second == 0 {
            return Err(SettingsError::Invalid {
                field: "frames_per_second",
                reason: "must be greater than zero",
            });
        }
        // One update may run at most MAX_SUBSTEPS frames; they must cover the
        // largest delta it accepts or game time falls behind wall time
        if self.frame_ms() * (MAX_SUBSTEPS as f64) < MAX_FRAME_DELTA_MS {
            return Err(SettingsError::Invalid {
                field: "frames_per_second",
                reason: "too high for the per-update frame budget",
            });
        }
        if self.orb_spawn_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "orb_spawn_ms",
                reason: "must be greater than zero",
            });
        }
        if self.block_spawn_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "block_spawn_ms",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    /// Length of one simulation frame in milliseconds
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.frames_per_second as f64
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}, using default settings", path.display(), e);
                Self::default()
            }
        }
    }
}
