//! # ECS World
//!
//! The entity store: owns every entity slot and all component data.
//! Pre-allocates all memory at creation time.

use super::component::{Component, Physics, Storages};
use super::entity::{Entity, EntityId};

/// The ECS World - container for all simulation entities.
///
/// # Slot recycling
///
/// Deleting an entity bumps its slot's generation immediately, before the
/// slot goes back on the free list. Any [`EntityId`] captured earlier keeps
/// the old generation and therefore never matches the slot again, even when
/// the slot is reused within the same tick. A slot whose generation would
/// overflow is retired rather than wrapped.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new(4096);
///
/// let entity = world.spawn();
/// world.insert(entity, Pos::new(1.0, 2.0));
/// assert!(world.despawn(entity));
/// assert!(!world.is_alive(entity));
/// ```
pub struct World {
    /// All entity slots (pre-allocated).
    entities: Box<[Entity]>,
    /// Free list of slot indices for reuse. Last freed is reused first.
    free_indices: Vec<u32>,
    /// Number of currently alive entities.
    alive_count: usize,
    /// Number of slots permanently retired after exhausting their generations.
    retired_count: usize,
    /// Dense component storages.
    storages: Storages,
}

impl World {
    /// Largest supported capacity. Slot indices must fit below the `NULL`
    /// sentinel's index.
    pub const MAX_CAPACITY: usize = (u32::MAX - 1) as usize;

    /// Creates a new world with the specified entity capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or above [`World::MAX_CAPACITY`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity <= Self::MAX_CAPACITY,
            "Capacity must be below u32::MAX"
        );

        #[allow(clippy::cast_possible_truncation)]
        let entities = (0..capacity as u32)
            .map(|index| Entity::vacant(EntityId::new(index, 0)))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        #[allow(clippy::cast_possible_truncation)]
        let free_indices: Vec<u32> = (0..capacity as u32).rev().collect();

        Self {
            entities,
            free_indices,
            alive_count: 0,
            retired_count: 0,
            storages: Storages::new(capacity),
        }
    }

    /// Returns the maximum capacity of this world.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of currently alive entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Returns the number of slots retired after exhausting their generations.
    #[inline]
    #[must_use]
    pub const fn retired_count(&self) -> usize {
        self.retired_count
    }

    /// Spawns a new entity with no components, returning its ID.
    ///
    /// # Returns
    ///
    /// The new entity's ID, or `EntityId::NULL` if capacity is reached.
    #[inline]
    pub fn spawn(&mut self) -> EntityId {
        let Some(index) = self.free_indices.pop() else {
            return EntityId::NULL;
        };

        let entity = &mut self.entities[index as usize];
        entity.alive = true;
        entity.component_mask = 0;
        self.alive_count += 1;

        tracing::trace!(entity = %entity.id, "spawned");
        entity.id
    }

    /// Despawns an entity immediately, freeing its slot for reuse.
    ///
    /// # Returns
    ///
    /// `true` if the entity was despawned, `false` if it was already dead
    /// or the ID was invalid/stale.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }

        let idx = id.index() as usize;
        self.storages.reset(idx);
        self.alive_count -= 1;

        let entity = &mut self.entities[idx];
        entity.alive = false;
        entity.component_mask = 0;

        // Generation moves on now, so `id` is stale before the slot is reused.
        if let Some(next) = id.generation().checked_add(1) {
            entity.id = EntityId::new(id.index(), next);
            self.free_indices.push(id.index());
        } else {
            self.retired_count += 1;
            tracing::debug!(slot = id.index(), "slot retired after generation overflow");
        }

        tracing::trace!(entity = %id, "despawned");
        true
    }

    /// Despawns every live entity. Generations are preserved, so identities
    /// from before the reset stay dead afterwards.
    pub fn clear(&mut self) {
        let live: Vec<EntityId> = self.iter_alive().map(|e| e.id).collect();
        for id in live {
            self.despawn(id);
        }
    }

    /// Checks if an entity is alive: its slot is occupied and the occupant
    /// carries the same generation as `id`.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        if id.is_null() {
            return false;
        }

        self.entities
            .get(id.index() as usize)
            .is_some_and(|entity| entity.alive && entity.id == id)
    }

    /// Current generation of a slot: the generation of its occupant, or the
    /// one its next occupant will get.
    #[inline]
    #[must_use]
    pub fn generation_of(&self, slot: u32) -> Option<u32> {
        self.entities
            .get(slot as usize)
            .map(|entity| entity.id.generation())
    }

    /// The live entity occupying `slot`, if any.
    #[inline]
    #[must_use]
    pub fn id_at(&self, slot: usize) -> Option<EntityId> {
        self.entities
            .get(slot)
            .filter(|entity| entity.alive)
            .map(|entity| entity.id)
    }

    /// Gets an entity by ID.
    ///
    /// # Returns
    ///
    /// Reference to the entity, or None if not found/dead/stale.
    #[inline]
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if !self.is_alive(id) {
            return None;
        }
        Some(&self.entities[id.index() as usize])
    }

    /// Bitmask of the component types attached to a live entity.
    #[inline]
    #[must_use]
    pub fn component_mask(&self, id: EntityId) -> Option<u64> {
        self.entity(id).map(|entity| entity.component_mask)
    }

    /// Iterates over all alive entities.
    pub fn iter_alive(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.alive)
    }

    /// Iterates over the IDs of all alive entities carrying component `C`.
    pub fn entities_with<C: Component>(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.iter_alive()
            .filter(|e| e.has_component(C::ID))
            .map(|e| e.id)
    }

    // =========================================================================
    // Typed component access
    // =========================================================================

    /// Attaches (or overwrites) component `C` on a live entity.
    ///
    /// Returns `false` if `id` is dead or stale.
    pub fn insert<C: Component>(&mut self, id: EntityId, component: C) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let idx = id.index() as usize;
        C::storage_mut(&mut self.storages).set(idx, component);
        self.entities[idx].add_component(C::ID);
        true
    }

    /// Detaches component `C`, returning it if it was present.
    pub fn remove<C: Component>(&mut self, id: EntityId) -> Option<C> {
        if !self.has::<C>(id) {
            return None;
        }
        let idx = id.index() as usize;
        let removed = C::storage(&self.storages).get(idx).copied();
        C::storage_mut(&mut self.storages).reset(idx);
        self.entities[idx].remove_component(C::ID);
        removed
    }

    /// Whether a live entity carries component `C`.
    #[inline]
    #[must_use]
    pub fn has<C: Component>(&self, id: EntityId) -> bool {
        self.entity(id)
            .is_some_and(|entity| entity.has_component(C::ID))
    }

    /// Reads component `C` of a live entity.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        if !self.has::<C>(id) {
            return None;
        }
        C::storage(&self.storages).get(id.index() as usize)
    }

    /// Mutates component `C` of a live entity.
    #[inline]
    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        if !self.has::<C>(id) {
            return None;
        }
        C::storage_mut(&mut self.storages).get_mut(id.index() as usize)
    }

    /// The dense `Physics` storage as raw bytes, one record per slot, for the
    /// external physics step. Slots without `Physics` hold the default value.
    #[must_use]
    pub fn physics_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(Physics::storage(&self.storages).as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{Bounds, Frozen, Pos};

    #[test]
    fn test_world_creation() {
        let world = World::new(1000);
        assert_eq!(world.capacity(), 1000);
        assert_eq!(world.alive_count(), 0);
    }

    #[test]
    fn test_spawn_despawn() {
        let mut world = World::new(100);

        let id1 = world.spawn();
        assert!(!id1.is_null());
        assert!(world.is_alive(id1));
        assert_eq!(world.alive_count(), 1);

        let id2 = world.spawn();
        assert_eq!(world.alive_count(), 2);
        assert_ne!(id1, id2);

        assert!(world.despawn(id1));
        assert!(!world.is_alive(id1));
        assert!(!world.despawn(id1));
        assert_eq!(world.alive_count(), 1);

        // Spawn again - should reuse the slot
        let id3 = world.spawn();
        assert_eq!(id3.index(), id1.index());
        assert_ne!(id3.generation(), id1.generation());
        assert!(!world.is_alive(id1));
        assert!(world.is_alive(id3));
    }

    #[test]
    fn test_generation_bumps_on_every_deletion() {
        let mut world = World::new(1);
        let mut last = world.generation_of(0).unwrap();

        for _ in 0..5 {
            let id = world.spawn();
            assert_eq!(id.index(), 0);
            assert!(world.despawn(id));
            let now = world.generation_of(0).unwrap();
            assert!(now > last);
            last = now;
        }
    }

    #[test]
    fn test_full_world_returns_null() {
        let mut world = World::new(2);
        assert!(!world.spawn().is_null());
        assert!(!world.spawn().is_null());
        assert!(world.spawn().is_null());
    }

    #[test]
    fn test_stale_id_cannot_touch_new_occupant() {
        let mut world = World::new(1);
        let old = world.spawn();
        world.despawn(old);
        let new = world.spawn();
        world.insert(new, Pos::new(5.0, 5.0));

        assert!(!world.insert(old, Pos::new(9.0, 9.0)));
        assert!(world.get::<Pos>(old).is_none());
        assert_eq!(world.get::<Pos>(new), Some(&Pos::new(5.0, 5.0)));
    }

    #[test]
    fn test_component_insert_remove() {
        let mut world = World::new(10);
        let id = world.spawn();

        assert!(!world.has::<Frozen>(id));
        assert!(world.insert(id, Frozen));
        assert!(world.has::<Frozen>(id));
        assert_eq!(world.component_mask(id), Some(1 << Frozen::ID));

        assert_eq!(world.remove::<Frozen>(id), Some(Frozen));
        assert!(!world.has::<Frozen>(id));
        assert_eq!(world.remove::<Frozen>(id), None);
    }

    #[test]
    fn test_despawn_resets_component_data() {
        let mut world = World::new(1);
        let id = world.spawn();
        world.insert(id, Bounds::new(0.0, 0.0, 25.0, 16.0));
        world.despawn(id);

        let reused = world.spawn();
        assert_eq!(world.component_mask(reused), Some(0));
        assert!(world.get::<Bounds>(reused).is_none());
    }

    #[test]
    fn test_generation_overflow_retires_slot() {
        let mut world = World::new(1);
        world.entities[0].id = EntityId::new(0, u32::MAX);

        let id = world.spawn();
        assert_eq!(id.generation(), u32::MAX);
        assert!(world.despawn(id));
        assert_eq!(world.retired_count(), 1);
        assert!(world.spawn().is_null());
        assert!(!world.is_alive(id));
    }

    #[test]
    fn test_clear_kills_everything() {
        let mut world = World::new(8);
        let ids: Vec<_> = (0..5).map(|_| world.spawn()).collect();
        world.clear();
        assert_eq!(world.alive_count(), 0);
        assert!(ids.iter().all(|id| !world.is_alive(*id)));
    }

    #[test]
    fn test_entities_with() {
        let mut world = World::new(8);
        let a = world.spawn();
        let _b = world.spawn();
        world.insert(a, Frozen);
        assert_eq!(world.entities_with::<Frozen>().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_physics_bytes_cover_every_slot() {
        let world = World::new(4);
        assert_eq!(world.physics_bytes().len(), 4 * std::mem::size_of::<Physics>());
    }
}
