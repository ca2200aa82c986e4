//! Entity under construction.

use tether_core::{Component, EntityId, World};

use super::fragments::Fragment;
use crate::error::{FactoryError, FactoryResult};

/// An entity being assembled from components and fragments.
///
/// The entity is live in the world from the moment the builder exists;
/// dropping the builder half-way leaves whatever was attached so far.
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    id: EntityId,
}

impl<'w> EntityBuilder<'w> {
    /// Allocates a fresh, empty entity.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::WorldFull`] if no slot is free.
    pub fn spawn(world: &'w mut World) -> FactoryResult<Self> {
        let id = world.spawn();
        if id.is_null() {
            return Err(FactoryError::WorldFull {
                capacity: world.capacity(),
            });
        }
        Ok(Self { world, id })
    }

    /// The entity being built.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Attaches a component, replacing an earlier one of the same type.
    pub fn with<C: Component>(&mut self, component: C) -> &mut Self {
        self.world.insert(self.id, component);
        self
    }

    /// Applies a construction fragment.
    ///
    /// # Errors
    ///
    /// Propagates the fragment's failure. Components the fragment attached
    /// before failing are kept.
    pub fn fragment(&mut self, fragment: impl Fragment) -> FactoryResult<&mut Self> {
        tracing::trace!(entity = %self.id, fragment = fragment.name(), "applying fragment");
        fragment.apply(self)?;
        Ok(self)
    }

    /// Mutates an attached component in place.
    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.world.get_mut::<C>(self.id)
    }

    /// Ends construction.
    #[must_use]
    pub fn finish(self) -> EntityId {
        self.id
    }
}
