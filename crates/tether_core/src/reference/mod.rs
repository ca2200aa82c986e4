//! # Entity References
//!
//! How one entity points at another across ticks.
//!
//! - [`SafeRef`]: bound to one instance, dead forever once it is deleted
//! - [`TaggedRef`]: bound to a role name, follows re-registration
//! - [`EntityReference`]: either of the above, for components that accept both
//!
//! ## Consumption contract
//!
//! Relational behaviors resolve their references once per tick through a
//! [`RefContext`]. A reference that resolves to `None` is a normal state, not
//! an error: the behavior skips its work for that tick and keeps its
//! component. Resolved [`EntityRef`]s borrow the world and must not be kept
//! past the tick.

mod safe;
mod tagged;
mod tags;

pub use safe::{EntityRef, SafeRef};
pub use tagged::TaggedRef;
pub use tags::TagRegistry;

use crate::ecs::World;

/// Read-only view of everything a reference needs to resolve.
#[derive(Clone, Copy)]
pub struct RefContext<'w> {
    /// The entity store.
    pub world: &'w World,
    /// The session's tag bindings.
    pub tags: &'w TagRegistry,
}

impl<'w> RefContext<'w> {
    /// Bundles a world and a tag registry.
    #[must_use]
    pub const fn new(world: &'w World, tags: &'w TagRegistry) -> Self {
        Self { world, tags }
    }
}

/// A reference to another entity, captured or by tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityReference {
    /// A specific instance.
    Safe(SafeRef),
    /// Whoever holds the tag.
    Tagged(TaggedRef),
}

impl EntityReference {
    /// Resolves against the current world state.
    #[inline]
    #[must_use]
    pub fn resolve<'w>(&self, ctx: &RefContext<'w>) -> Option<EntityRef<'w>> {
        match *self {
            Self::Safe(reference) => reference.resolve(ctx.world),
            Self::Tagged(reference) => reference.resolve(ctx.tags, ctx.world),
        }
    }

    /// Shorthand for `resolve(..).is_some()`.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, ctx: &RefContext<'_>) -> bool {
        self.resolve(ctx).is_some()
    }
}

impl Default for EntityReference {
    fn default() -> Self {
        Self::Safe(SafeRef::default())
    }
}

impl From<SafeRef> for EntityReference {
    fn from(reference: SafeRef) -> Self {
        Self::Safe(reference)
    }
}

impl From<TaggedRef> for EntityReference {
    fn from(reference: TaggedRef) -> Self {
        Self::Tagged(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_and_tagged_diverge_after_respawn() {
        let mut world = World::new(4);
        let mut tags = TagRegistry::new();

        let first = world.spawn();
        tags.register("player", first);
        let safe = EntityReference::from(SafeRef::capture(first));
        let tagged = EntityReference::from(TaggedRef::new("player"));

        world.despawn(first);
        let second = world.spawn();
        tags.register("player", second);

        let ctx = RefContext::new(&world, &tags);
        assert!(!safe.is_alive(&ctx));
        assert_eq!(tagged.resolve(&ctx).map(|e| e.id()), Some(second));
    }
}
