//! # Safe References
//!
//! A [`SafeRef`] is bound to one entity *instance*. It stores the captured
//! slot and generation and nothing else, so it never keeps an entity alive
//! and never follows a slot to its next occupant.

use crate::ecs::{Component, EntityId, World};

/// Non-owning handle to one specific entity instance.
///
/// Once the referenced entity is deleted the reference is dead for good,
/// whether or not its slot is reused later.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SafeRef {
    target: EntityId,
}

impl SafeRef {
    /// Captures a reference to `target`.
    #[inline]
    #[must_use]
    pub const fn capture(target: EntityId) -> Self {
        Self { target }
    }

    /// The captured identity, whether or not it is still alive.
    #[inline]
    #[must_use]
    pub const fn target(self) -> EntityId {
        self.target
    }

    /// Whether the captured instance still exists.
    #[inline]
    #[must_use]
    pub fn is_alive(self, world: &World) -> bool {
        world.is_alive(self.target)
    }

    /// Resolves to a view of the live entity, or `None` if it is gone.
    ///
    /// The returned view borrows the world and cannot outlive the current
    /// tick's read phase.
    #[inline]
    #[must_use]
    pub fn resolve(self, world: &World) -> Option<EntityRef<'_>> {
        EntityRef::new(world, self.target)
    }
}

impl From<EntityId> for SafeRef {
    fn from(target: EntityId) -> Self {
        Self::capture(target)
    }
}

/// A live entity, validated against the world it borrows.
#[derive(Clone, Copy)]
pub struct EntityRef<'w> {
    world: &'w World,
    id: EntityId,
}

impl<'w> EntityRef<'w> {
    /// Returns a view of `id` if it is alive in `world`.
    #[inline]
    #[must_use]
    pub fn new(world: &'w World, id: EntityId) -> Option<Self> {
        world.is_alive(id).then_some(Self { world, id })
    }

    /// The entity's identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Reads one of the entity's components.
    #[inline]
    #[must_use]
    pub fn get<C: Component>(&self) -> Option<&'w C> {
        self.world.get::<C>(self.id)
    }

    /// Whether the entity carries component `C`.
    #[inline]
    #[must_use]
    pub fn has<C: Component>(&self) -> bool {
        self.world.has::<C>(self.id)
    }
}

impl std::fmt::Debug for EntityRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EntityRef").field(&self.id).finish()
    }
}
