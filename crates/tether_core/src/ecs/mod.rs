//! # Entity Component System
//!
//! The entity store consumed by the reference layer.
//!
//! ## Design Philosophy
//!
//! - All storage is pre-allocated at world creation
//! - Components are stored in dense arrays, one slot per entity
//! - Entity IDs are slot indices with generation counters
//! - Every access through an ID is generation-checked

mod component;
mod entity;
mod storage;
mod world;

pub use component::{
    Angle, Anim, Attached, Bounds, Camera, Clamped, Component, Frozen, Gravity, Homing,
    Inbetween, MapSolid, MapWallSensor, Physics, PlayerControlled, Pluckable, Pos, Schedule,
    Size, Slumberer, Storages,
};
pub use entity::{Entity, EntityId};
pub use storage::ComponentStorage;
pub use world::World;
