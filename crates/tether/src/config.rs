//! # Simulation Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so a config
//! file only needs to list what it changes.
//!
//! ```toml
//! capacity = 8192
//! camera_zoom = 2.0
//!
//! [viewport]
//! width = 1280
//! height = 720
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tether_core::{Bounds, Clamped, World};

use crate::error::{read_file, ConfigError, ConfigResult};

/// Screen size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 720.0,
        }
    }
}

/// An axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub minx: f32,
    /// Bottom edge.
    pub miny: f32,
    /// Right edge.
    pub maxx: f32,
    /// Top edge.
    pub maxy: f32,
}

impl Default for Rect {
    /// A 20 x 15 tile level of 16 pixel tiles.
    fn default() -> Self {
        Self {
            minx: 0.0,
            miny: 0.0,
            maxx: 20.0 * 16.0,
            maxy: 15.0 * 16.0,
        }
    }
}

/// Configuration for a simulation session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Maximum number of simultaneously live entities.
    pub capacity: usize,
    /// Size of one grid cell in world units, for grid placements.
    pub tile_size: f32,
    /// Screen size, used to derive the camera's bounds.
    pub viewport: Viewport,
    /// Screen pixels per world unit.
    pub camera_zoom: f32,
    /// Area the camera is clamped to.
    pub level_bounds: Rect,
    /// Camera homing speed factor.
    pub homing_speed: f32,
    /// Seed for particle randomness.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            capacity: 4096,
            tile_size: 16.0,
            viewport: Viewport::default(),
            camera_zoom: 3.0,
            level_bounds: Rect::default(),
            homing_speed: 5.0,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on invalid TOML and
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values a session cannot start with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 || self.capacity > World::MAX_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "capacity",
                reason: format!(
                    "{} is outside 1..={}",
                    self.capacity,
                    World::MAX_CAPACITY
                ),
            });
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tile_size",
                reason: format!("{} is not a positive size", self.tile_size),
            });
        }
        if !(self.camera_zoom.is_finite() && self.camera_zoom > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera_zoom",
                reason: format!("{} is not a positive zoom", self.camera_zoom),
            });
        }
        Ok(())
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_toml_str(&read_file(path.as_ref())?)
    }

    /// The viewport converted to world units, centred on the camera.
    #[must_use]
    pub fn camera_bounds(&self) -> Bounds {
        let half_w = self.viewport.width / 2.0 / self.camera_zoom;
        let half_h = self.viewport.height / 2.0 / self.camera_zoom;
        Bounds::new(-half_w, -half_h, half_w, half_h)
    }

    /// The level bounds as a clamp component.
    #[must_use]
    pub fn camera_clamp(&self) -> Clamped {
        let r = self.level_bounds;
        Clamped::new(r.minx, r.miny, r.maxx, r.maxy)
    }
}
