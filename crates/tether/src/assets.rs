//! # Animation Catalog
//!
//! The factory never loads assets. It only asks the catalog whether an
//! animation id exists and how large its first frame is.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{read_file, ConfigResult};

/// Size of an animation's key frame, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    /// Frame width.
    pub width: f32,
    /// Frame height.
    pub height: f32,
}

impl FrameSize {
    /// Creates a frame size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Lookup of preloaded animations, owned by the rendering side.
pub trait AnimationCatalog {
    /// Key frame size of `anim`, or `None` if the animation is not loaded.
    fn frame_size(&self, anim: &str) -> Option<FrameSize>;

    /// Whether `anim` is loaded.
    fn contains(&self, anim: &str) -> bool {
        self.frame_size(anim).is_some()
    }
}

/// In-memory catalog, typically loaded from a TOML manifest:
///
/// ```toml
/// [animations]
/// player-idle = { width = 25.0, height = 16.0 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticCatalog {
    animations: HashMap<String, FrameSize>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an animation.
    pub fn insert(&mut self, anim: impl Into<String>, size: FrameSize) {
        self.animations.insert(anim.into(), size);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, anim: impl Into<String>, width: f32, height: f32) -> Self {
        self.insert(anim, FrameSize::new(width, height));
        self
    }

    /// Number of animations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Parses a catalog manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`](crate::ConfigError::Parse) on invalid TOML.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a catalog manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_toml_str(&read_file(path.as_ref())?)
    }
}

impl AnimationCatalog for StaticCatalog {
    fn frame_size(&self, anim: &str) -> Option<FrameSize> {
        self.animations.get(anim).copied()
    }
}
