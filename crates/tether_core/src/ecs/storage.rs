//! # Component Storage
//!
//! Pre-allocated, dense component storage.
//!
//! - All component slots are allocated when the world is created
//! - Access is O(1) via entity slot index
//! - Presence is tracked by the entity's component mask, not here; a slot
//!   without the component simply holds the default value

use super::component::Component;

/// Pre-allocated storage for a single component type.
///
/// The storage knows nothing about generations. It is only reachable through
/// [`World`](super::World), which validates the entity ID before indexing.
pub struct ComponentStorage<C: Component> {
    /// The dense array of components, one per entity slot.
    data: Box<[C]>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates new component storage with the specified capacity.
    ///
    /// All slots are initialized to the component's default value.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        Self {
            data: vec![C::default(); capacity].into_boxed_slice(),
        }
    }

    /// Returns the capacity of this storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Gets the component stored in slot `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.data.get(index)
    }

    /// Gets the component stored in slot `index`, mutably.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.data.get_mut(index)
    }

    /// Overwrites slot `index`.
    ///
    /// Returns `false` if the index is out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, component: C) -> bool {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = component;
            true
        } else {
            false
        }
    }

    /// Returns a slice of all slots, including unoccupied ones.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Resets slot `index` to the default value.
    #[inline]
    pub fn reset(&mut self, index: usize) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = C::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{Anim, Pos};

    #[test]
    fn test_storage_get_set() {
        let mut storage: ComponentStorage<Pos> = ComponentStorage::new(100);
        assert_eq!(storage.capacity(), 100);

        let pos = Pos::new(1.0, 2.0);
        assert!(storage.set(50, pos));
        assert_eq!(storage.get(50), Some(&pos));
    }

    #[test]
    fn test_storage_bounds() {
        let mut storage: ComponentStorage<Pos> = ComponentStorage::new(100);
        assert!(storage.get(100).is_none());
        assert!(storage.get(99).is_some());
        assert!(!storage.set(100, Pos::default()));
    }

    #[test]
    fn test_reset_restores_default() {
        let mut storage: ComponentStorage<Anim> = ComponentStorage::new(4);
        storage.set(2, Anim::on_layer("player-idle", 3));
        storage.reset(2);
        assert_eq!(storage.get(2), Some(&Anim::default()));
    }
}
