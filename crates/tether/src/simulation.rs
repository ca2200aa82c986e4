//! # Simulation Tick
//!
//! ```text
//! Tick N:
//! ┌─────────────────────────────────────────────────────────────┐
//! │ 1. SPAWN                                                    │
//! │    └─ Drain queued spawn requests through the factory       │
//! │                                                             │
//! │ 2. BEHAVIORS                                                │
//! │    ├─ schedule   (queues expired entities for deletion)     │
//! │    ├─ homing     (velocity toward target)                   │
//! │    ├─ inbetween  (position between anchors)                 │
//! │    ├─ attached   (position at anchor + offset)              │
//! │    └─ clamped    (position inside rectangle)                │
//! │                                                             │
//! │ 3. DELETE                                                   │
//! │    └─ Apply every deletion queued during the tick           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deletions are always deferred to the end of the tick, so a reference
//! captured while spawning resolves for the rest of that tick.
//!
//! A queued spawn that fails keeps its request and error until the caller
//! drains them with [`Simulation::take_failures`].

use tether_core::{EntityId, TagRegistry, World};

use crate::assets::AnimationCatalog;
use crate::behavior::{self, BehaviorStats};
use crate::config::SimulationConfig;
use crate::error::{ConfigResult, FactoryError, FactoryResult};
use crate::factory::{EntityFactory, MapProperties, Placement};
use crate::level::{LevelManifest, SpawnRequest};

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number.
    pub tick: u64,
    /// Spawn requests that produced an entity.
    pub spawned: u32,
    /// Spawn requests with an unknown type tag.
    pub unknown: u32,
    /// Spawn requests whose construction failed. The errors are kept for
    /// [`Simulation::take_failures`].
    pub failed: u32,
    /// Entities deleted at the end of the tick.
    pub deleted: u32,
    /// Schedule pass.
    pub schedule: BehaviorStats,
    /// Homing pass.
    pub homing: BehaviorStats,
    /// Inbetween pass.
    pub inbetween: BehaviorStats,
    /// Attached pass.
    pub attached: BehaviorStats,
    /// Clamped pass.
    pub clamped: BehaviorStats,
}

/// A simulation session: the world, its tag bindings, and the factory.
pub struct Simulation {
    world: World,
    tags: TagRegistry,
    factory: EntityFactory,
    pending_spawns: Vec<SpawnRequest>,
    pending_deletions: Vec<EntityId>,
    failures: Vec<(SpawnRequest, FactoryError)>,
    tick: u64,
}

impl Simulation {
    /// Creates an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`](crate::ConfigError::Invalid) if the
    /// configuration does not validate.
    pub fn new(
        config: &SimulationConfig,
        catalog: impl AnimationCatalog + 'static,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            world: World::new(config.capacity),
            tags: TagRegistry::new(),
            factory: EntityFactory::new(config, catalog),
            pending_spawns: Vec::new(),
            pending_deletions: Vec::new(),
            failures: Vec::new(),
            tick: 0,
        })
    }

    /// The entity store.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The entity store, mutably, for collaborators outside the tick
    /// (physics, input).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The session's tag bindings.
    #[must_use]
    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Number of ticks run so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Spawns immediately, outside the tick.
    ///
    /// # Errors
    ///
    /// Propagates construction failures.
    pub fn spawn(
        &mut self,
        type_tag: &str,
        placement: Placement,
        properties: &MapProperties,
    ) -> FactoryResult<Option<EntityId>> {
        self.factory
            .spawn(&mut self.world, &mut self.tags, type_tag, placement, properties)
    }

    /// Spawns a sweat particle immediately.
    ///
    /// # Errors
    ///
    /// Propagates construction failures.
    pub fn spawn_sweat(&mut self, x: f32, y: f32, anim: &'static str) -> FactoryResult<EntityId> {
        self.factory.spawn_sweat(&mut self.world, x, y, anim)
    }

    /// Queues a spawn for the start of the next tick.
    pub fn queue_spawn(&mut self, request: SpawnRequest) {
        self.pending_spawns.push(request);
    }

    /// Queues every spawn point of a level. Returns how many were queued.
    pub fn load_level(&mut self, level: &LevelManifest) -> usize {
        self.pending_spawns.extend(level.spawns.iter().cloned());
        tracing::info!(spawns = level.spawns.len(), "level queued");
        level.spawns.len()
    }

    /// Queued spawns that failed since the last call, with their errors, in
    /// the order they ran.
    pub fn take_failures(&mut self) -> Vec<(SpawnRequest, FactoryError)> {
        std::mem::take(&mut self.failures)
    }

    /// Queues a deletion for the end of the current (or next) tick.
    pub fn queue_delete(&mut self, id: EntityId) {
        self.pending_deletions.push(id);
    }

    /// Runs one tick of `delta` seconds.
    pub fn tick(&mut self, delta: f32) -> TickReport {
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        for request in std::mem::take(&mut self.pending_spawns) {
            match self.factory.spawn(
                &mut self.world,
                &mut self.tags,
                &request.kind,
                request.placement,
                &request.properties,
            ) {
                Ok(Some(_)) => report.spawned += 1,
                Ok(None) => report.unknown += 1,
                Err(err) => {
                    report.failed += 1;
                    self.failures.push((request, err));
                }
            }
        }

        report.schedule =
            behavior::schedule::update(&mut self.world, delta, &mut self.pending_deletions);
        report.homing = behavior::homing::update(&mut self.world);
        report.inbetween = behavior::inbetween::update(&mut self.world, &self.tags);
        report.attached = behavior::attached::update(&mut self.world);
        report.clamped = behavior::clamped::update(&mut self.world);

        for id in self.pending_deletions.drain(..) {
            if self.world.despawn(id) {
                report.deleted += 1;
            }
        }

        tracing::trace!(?report, "tick complete");
        self.tick += 1;
        report
    }

    /// Level/session reset: every entity is deleted, every tag binding,
    /// queued request and undrained failure dropped.
    pub fn reset(&mut self) {
        tracing::info!(
            entities = self.world.alive_count(),
            tags = self.tags.len(),
            "session reset"
        );
        self.world.clear();
        self.tags.clear();
        self.pending_spawns.clear();
        self.pending_deletions.clear();
        self.failures.clear();
    }
}
