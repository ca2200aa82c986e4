//! # Level Manifests
//!
//! The spawn points of a level, as produced by the map loader:
//!
//! ```toml
//! [[spawn]]
//! kind = "player"
//! placement = { x = 32.0, y = 16.0 }
//!
//! [[spawn]]
//! kind = "turnip"
//! placement = { col = 4, row = 1 }
//! properties = { layer = 2 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{read_file, ConfigResult};
use crate::factory::{MapProperties, Placement};

/// One spawn point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    /// Entity type tag, matched against the factory's kinds at spawn time.
    pub kind: String,
    /// Where to spawn.
    pub placement: Placement,
    /// Extra properties from the map.
    #[serde(default)]
    pub properties: MapProperties,
}

impl SpawnRequest {
    /// A request without properties.
    #[must_use]
    pub fn new(kind: impl Into<String>, placement: Placement) -> Self {
        Self {
            kind: kind.into(),
            placement,
            properties: MapProperties::new(),
        }
    }
}

/// All spawn points of a level, in map order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelManifest {
    /// Spawn points.
    #[serde(default, rename = "spawn")]
    pub spawns: Vec<SpawnRequest>,
}

impl LevelManifest {
    /// Parses a manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`](crate::ConfigError::Parse) on invalid TOML.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_toml_str(&read_file(path.as_ref())?)
    }
}
