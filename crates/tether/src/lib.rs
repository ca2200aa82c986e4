//! # Tether
//!
//! Entity composition on top of [`tether_core`]: a factory that assembles
//! game objects from reusable construction fragments, and the relational
//! behaviors that follow other entities through safe and tagged references.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐ spawn request ┌───────────────┐  SafeRef / tag  ┌───────────────┐
//! │ Level loader │──────────────>│ EntityFactory │────────────────>│ World + Tags  │
//! └──────────────┘               └───────────────┘                 └───────┬───────┘
//!                                                                          │ resolve per tick
//!                                                                  ┌───────▼───────┐
//!                                                                  │   Behaviors   │
//!                                                                  └───────────────┘
//! ```
//!
//! ## Modules
//!
//! - `factory`: type-tag dispatch and construction fragments
//! - `behavior`: homing, inbetween, attached, clamped, schedule
//! - `simulation`: tick orchestration (spawn, behave, delete)
//! - `config`, `level`, `assets`: TOML-loaded inputs

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod assets;
pub mod behavior;
pub mod config;
pub mod error;
pub mod factory;
pub mod level;
pub mod simulation;

pub use assets::{AnimationCatalog, FrameSize, StaticCatalog};
pub use behavior::BehaviorStats;
pub use config::{Rect, SimulationConfig, Viewport};
pub use error::{ConfigError, ConfigResult, FactoryError, FactoryResult};
pub use factory::{
    Archetype, EntityBuilder, EntityFactory, EntityKind, Fragment, MapProperties, Placement,
    PropertyValue, PLAYER_TAG, SLUMBERER_EYELID_TAG, SLUMBERER_EYE_TAG,
};
pub use level::{LevelManifest, SpawnRequest};
pub use simulation::{Simulation, TickReport};
