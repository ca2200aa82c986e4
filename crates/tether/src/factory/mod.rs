//! # Entity Factory
//!
//! Turns a spawn request (type tag + placement + map properties) into
//! entities.
//!
//! ```text
//! "player" ──> EntityKind::Player ──> create_player
//!                                       ├─ default entity ── Placed, DefaultBody, Animated
//!                                       ├─ tag "player"
//!                                       └─ camera satellite ── CameraRig(SafeRef(player))
//! ```
//!
//! Dispatch is a closed enum. Unknown type tags produce `Ok(None)` and no
//! entities; the caller decides whether that matters.
//!
//! [`Archetype`] covers the other shape of construction: one reusable
//! template, re-parameterised and stamped out many times.
//!
//! Construction is not atomic. If a satellite fails (say its animation is
//! not loaded) the primary entity, and any tag already registered, stay in
//! the world and the error is returned.

mod archetype;
mod builder;
mod fragments;

use std::collections::BTreeMap;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tether_core::{
    Anim, Attached, Bounds, Clamped, EntityId, Gravity, Inbetween, MapWallSensor, Physics,
    PlayerControlled, Pos, SafeRef, Schedule, Slumberer, TagRegistry, TaggedRef, World,
};

pub use archetype::Archetype;
pub use builder::EntityBuilder;
pub use fragments::{Animated, CameraRig, DefaultBody, Fragment, Placed, Pluck, DEFAULT_BOUNDS};

use crate::assets::AnimationCatalog;
use crate::config::SimulationConfig;
use crate::error::{FactoryError, FactoryResult};

/// Tag the player entity is registered under.
pub const PLAYER_TAG: &str = "player";
/// Tag the slumberer's eye is registered under.
pub const SLUMBERER_EYE_TAG: &str = "slumberer-eye";
/// Tag the slumberer's eyelid is registered under.
pub const SLUMBERER_EYELID_TAG: &str = "slumberer-eyelid";

// =============================================================================
// Spawn request pieces
// =============================================================================

/// Every entity type the factory can build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player, plus a camera that follows it.
    Player,
    /// The sleeping giant, plus its eye and eyelid.
    Slumberer,
    /// A turnip stuck in the ground.
    Turnip,
    /// A chicklet stuck in the ground.
    Chicklet,
}

impl EntityKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [Self::Player, Self::Slumberer, Self::Turnip, Self::Chicklet];

    /// Maps a map-supplied type tag to a kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "player" => Some(Self::Player),
            "slumberer" => Some(Self::Slumberer),
            "turnip" => Some(Self::Turnip),
            "chicklet" => Some(Self::Chicklet),
            _ => None,
        }
    }

    /// The type tag for this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Slumberer => "slumberer",
            Self::Turnip => "turnip",
            Self::Chicklet => "chicklet",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Where to put a spawned entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Placement {
    /// World coordinates.
    World {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
    /// Grid cell, converted with the configured tile size.
    Grid {
        /// Column.
        col: i32,
        /// Row.
        row: i32,
    },
}

impl Placement {
    /// World-coordinate placement.
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self::World { x, y }
    }

    /// Resolves to world coordinates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_world(self, tile_size: f32) -> (f32, f32) {
        match self {
            Self::World { x, y } => (x, y),
            Self::Grid { col, row } => (col as f32 * tile_size, row as f32 * tile_size),
        }
    }
}

/// A primitive map property value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// String.
    Str(String),
}

/// Free-form properties attached to a spawn point by the level.
///
/// Passed to construction routines unopened; a routine reads only the keys
/// it knows about.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapProperties(BTreeMap<String, PropertyValue>);

impl MapProperties {
    /// No properties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property.
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.0.insert(key.into(), value);
    }

    /// Reads a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// Reads an integer property.
    #[must_use]
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Factory
// =============================================================================

/// Builds entities by kind from construction fragments.
pub struct EntityFactory {
    catalog: Box<dyn AnimationCatalog>,
    tile_size: f32,
    camera_bounds: Bounds,
    camera_clamp: Clamped,
    homing_speed: f32,
    rng: ChaCha8Rng,
}

impl EntityFactory {
    /// Creates a factory validating animations against `catalog`.
    #[must_use]
    pub fn new(config: &SimulationConfig, catalog: impl AnimationCatalog + 'static) -> Self {
        Self {
            catalog: Box::new(catalog),
            tile_size: config.tile_size,
            camera_bounds: config.camera_bounds(),
            camera_clamp: config.camera_clamp(),
            homing_speed: config.homing_speed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    /// The catalog animations are validated against.
    #[must_use]
    pub fn catalog(&self) -> &dyn AnimationCatalog {
        self.catalog.as_ref()
    }

    /// A solid, animated archetype whose animation is checked against this
    /// factory's catalog on every instantiation.
    #[must_use]
    pub fn archetype(&self, name: &'static str, anim: Anim) -> Archetype<'_> {
        Archetype::new(name)
            .with_fragment(DefaultBody)
            .with_fragment(Animated {
                catalog: self.catalog.as_ref(),
                anim,
            })
    }

    /// Spawns the entity type named `type_tag`.
    ///
    /// # Returns
    ///
    /// `Ok(Some(primary))` on success, `Ok(None)` if the type tag is unknown
    /// (nothing is created).
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails part way; see the module docs
    /// for what is left behind.
    pub fn spawn(
        &mut self,
        world: &mut World,
        tags: &mut TagRegistry,
        type_tag: &str,
        placement: Placement,
        properties: &MapProperties,
    ) -> FactoryResult<Option<EntityId>> {
        let Some(kind) = EntityKind::from_tag(type_tag) else {
            tracing::debug!(type_tag, "no construction routine for spawn type");
            return Ok(None);
        };
        self.spawn_kind(world, tags, kind, placement, properties)
            .map(Some)
    }

    /// Spawns an entity of a known kind.
    ///
    /// # Errors
    ///
    /// Returns an error if construction fails part way.
    pub fn spawn_kind(
        &mut self,
        world: &mut World,
        tags: &mut TagRegistry,
        kind: EntityKind,
        placement: Placement,
        properties: &MapProperties,
    ) -> FactoryResult<EntityId> {
        let (x, y) = placement.to_world(self.tile_size);
        let result = match kind {
            EntityKind::Player => self.create_player(world, tags, x, y, properties),
            EntityKind::Slumberer => self.create_slumberer(world, tags, x, y, properties),
            EntityKind::Turnip => {
                self.create_pluckable(world, x, y, properties, "turnip-stuck", "turnip-idle")
            }
            EntityKind::Chicklet => {
                self.create_pluckable(world, x, y, properties, "chicklet-stuck", "chicklet-idle")
            }
        };

        match &result {
            Ok(id) => tracing::debug!(%kind, entity = %id, x, y, "spawned"),
            Err(err) => tracing::warn!(%kind, x, y, error = %err, "spawn failed"),
        }
        result
    }

    /// Spawns a short-lived sweat particle centred on (`x`, `y`) that flies
    /// off in a random direction and deletes itself after one second.
    ///
    /// # Errors
    ///
    /// Returns an error if `anim` is not loaded (nothing is created) or the
    /// world is full.
    pub fn spawn_sweat(
        &mut self,
        world: &mut World,
        x: f32,
        y: f32,
        anim: &'static str,
    ) -> FactoryResult<EntityId> {
        let frame = self
            .catalog
            .frame_size(anim)
            .ok_or_else(|| FactoryError::MissingAsset {
                anim: anim.to_owned(),
            })?;

        let mut sprite = Anim::new(anim);
        sprite.alpha = 0.9;

        #[allow(clippy::cast_precision_loss)]
        let physics = Physics {
            vx: self.rng.gen_range(-90..=90) as f32 * 1.5,
            vy: self.rng.gen_range(50..=110) as f32 * 1.5,
            friction: 0.1,
        };

        let mut particle = EntityBuilder::spawn(world)?;
        particle
            .with(Pos::new(
                x - frame.width * sprite.scale / 2.0,
                y - frame.height * sprite.scale / 2.0,
            ))
            .with(sprite)
            .with(Schedule::delete_after(1.0))
            .with(physics)
            .with(Bounds::from_size(frame.width, frame.height))
            .with(Gravity);
        Ok(particle.finish())
    }

    // =========================================================================
    // Construction routines
    // =========================================================================

    /// Placed + default body + animation. The `layer` property overrides the
    /// animation layer.
    fn default_entity<'w>(
        &self,
        world: &'w mut World,
        x: f32,
        y: f32,
        anim: Anim,
        properties: &MapProperties,
    ) -> FactoryResult<EntityBuilder<'w>> {
        let mut anim = anim;
        if let Some(layer) = properties.int("layer").and_then(|l| i32::try_from(l).ok()) {
            anim.layer = layer;
        }

        let mut entity = EntityBuilder::spawn(world)?;
        entity
            .fragment(Placed { x, y })?
            .fragment(DefaultBody)?
            .fragment(Animated {
                catalog: self.catalog.as_ref(),
                anim,
            })?;
        Ok(entity)
    }

    fn create_player(
        &mut self,
        world: &mut World,
        tags: &mut TagRegistry,
        x: f32,
        y: f32,
        properties: &MapProperties,
    ) -> FactoryResult<EntityId> {
        let mut player = self.default_entity(world, x, y, Anim::new("player-idle"), properties)?;
        player.with(PlayerControlled).with(MapWallSensor);
        let player = player.finish();
        tags.register(PLAYER_TAG, player);

        // Camera drone swerving toward the player, for a smooth moving camera.
        let mut camera = EntityBuilder::spawn(world)?;
        camera.with(Pos::new(0.0, 0.0)).fragment(CameraRig {
            target: SafeRef::capture(player),
            bounds: self.camera_bounds,
            clamp: self.camera_clamp,
            speed_factor: self.homing_speed,
        })?;

        Ok(player)
    }

    fn create_slumberer(
        &mut self,
        world: &mut World,
        tags: &mut TagRegistry,
        x: f32,
        y: f32,
        properties: &MapProperties,
    ) -> FactoryResult<EntityId> {
        let mut body = self.default_entity(
            world,
            x,
            y,
            Anim::on_layer("slumberer-idle", -2),
            properties,
        )?;
        body.with(Slumberer);
        let slumberer = body.finish();

        let mut eye_anim = Anim::on_layer("slumberer-eye", -3);
        eye_anim.looping = false;
        let mut gaze = Inbetween::new(
            SafeRef::capture(slumberer),
            TaggedRef::new(PLAYER_TAG),
            0.05,
        );
        gaze.ax = 10.0;
        gaze.ay = 26.0;
        gaze.bx = 10.0;
        gaze.by = 10.0;
        gaze.max_distance = 2.0;

        let mut eye = EntityBuilder::spawn(world)?;
        eye.with(Pos::default())
            .fragment(Animated {
                catalog: self.catalog.as_ref(),
                anim: eye_anim,
            })?
            .with(gaze);
        tags.register(SLUMBERER_EYE_TAG, eye.finish());

        let mut lid_anim = Anim::on_layer("slumberer-eyelid", -1);
        lid_anim.looping = false;

        let mut eyelid = EntityBuilder::spawn(world)?;
        eyelid
            .with(Pos::default())
            .fragment(Animated {
                catalog: self.catalog.as_ref(),
                anim: lid_anim,
            })?
            .with(Attached::new(SafeRef::capture(slumberer), 12.0, 28.0));
        tags.register(SLUMBERER_EYELID_TAG, eyelid.finish());

        Ok(slumberer)
    }

    fn create_pluckable(
        &mut self,
        world: &mut World,
        x: f32,
        y: f32,
        properties: &MapProperties,
        stuck_anim: &'static str,
        plucked_anim: &'static str,
    ) -> FactoryResult<EntityId> {
        let mut entity = self.default_entity(world, x, y, Anim::new(stuck_anim), properties)?;
        entity.fragment(Pluck {
            catalog: self.catalog.as_ref(),
            plucked_anim,
        })?;
        Ok(entity.finish())
    }
}
