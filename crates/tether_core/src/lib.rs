//! # Tether Core
//!
//! Entity store and entity references for a tick-based simulation where
//! entities are created and destroyed continuously and their slots recycled.
//!
//! ## Architecture Rules
//!
//! 1. **Identity is slot + generation** - every deletion bumps the slot's
//!    generation, so a recycled slot never aliases its previous occupant
//! 2. **References never own** - capturing a reference does not keep an
//!    entity alive
//! 3. **Dead references are steady state** - resolution returns `None`, it
//!    never panics
//!
//! ## Example
//!
//! ```rust
//! use tether_core::{Pos, SafeRef, TagRegistry, TaggedRef, World};
//!
//! let mut world = World::new(64);
//! let mut tags = TagRegistry::new();
//!
//! let player = world.spawn();
//! world.insert(player, Pos::new(32.0, 16.0));
//! tags.register("player", player);
//!
//! let follow = SafeRef::capture(player);
//! let by_role = TaggedRef::new("player");
//! assert!(follow.is_alive(&world));
//!
//! world.despawn(player);
//! assert!(follow.resolve(&world).is_none());
//! assert!(by_role.resolve(&tags, &world).is_none());
//! assert_eq!(tags.lookup("player"), Some(player));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod ecs;
pub mod reference;

pub use ecs::{
    Angle, Anim, Attached, Bounds, Camera, Clamped, Component, ComponentStorage, Entity, EntityId,
    Frozen, Gravity, Homing, Inbetween, MapSolid, MapWallSensor, Physics, PlayerControlled,
    Pluckable, Pos, Schedule, Size, Slumberer, Storages, World,
};
pub use reference::{EntityRef, EntityReference, RefContext, SafeRef, TagRegistry, TaggedRef};
