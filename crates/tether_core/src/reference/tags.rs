//! # Tag Registry
//!
//! Maps well-known role names ("player", "slumberer-eye") to the entity that
//! currently fills the role.
//!
//! The registry stores raw identities and is never told about deletions.
//! A binding whose entity has died stays in place ("stale but
//! discoverable") until it is overwritten, unregistered, or the registry is
//! cleared on session reset. Liveness is decided at resolve time.

use std::collections::HashMap;

use super::safe::EntityRef;
use crate::ecs::{EntityId, World};

/// Owned tag -> identity mapping, one per simulation session.
#[derive(Debug, Default, Clone)]
pub struct TagRegistry {
    bindings: HashMap<String, EntityId>,
}

impl TagRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `tag` to `id`, silently replacing any previous binding.
    ///
    /// Returns the replaced identity, if there was one.
    pub fn register(&mut self, tag: impl Into<String>, id: EntityId) -> Option<EntityId> {
        let tag = tag.into();
        let previous = self.bindings.insert(tag.clone(), id);
        if let Some(old) = previous.filter(|old| *old != id) {
            tracing::debug!(%tag, from = %old, to = %id, "tag rebound");
        }
        previous
    }

    /// The identity bound to `tag`. It may be dead.
    #[inline]
    #[must_use]
    pub fn lookup(&self, tag: &str) -> Option<EntityId> {
        self.bindings.get(tag).copied()
    }

    /// Removes the binding for `tag`, returning it.
    pub fn unregister(&mut self, tag: &str) -> Option<EntityId> {
        self.bindings.remove(tag)
    }

    /// Looks up `tag` and returns the entity only if it is still alive.
    ///
    /// "Bound but dead" and "not bound" are indistinguishable here.
    #[inline]
    #[must_use]
    pub fn resolve<'w>(&self, tag: &str, world: &'w World) -> Option<EntityRef<'w>> {
        EntityRef::new(world, self.lookup(tag)?)
    }

    /// Drops every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Number of bindings, live or stale.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether there are no bindings.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over all bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EntityId)> {
        self.bindings.iter().map(|(tag, id)| (tag.as_str(), *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_overwrites_silently() {
        let mut world = World::new(4);
        let a = world.spawn();
        let b = world.spawn();
        let mut tags = TagRegistry::new();

        assert_eq!(tags.register("player", a), None);
        assert_eq!(tags.register("player", b), Some(a));
        assert_eq!(tags.lookup("player"), Some(b));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_unknown_tag_is_none() {
        let world = World::new(1);
        let tags = TagRegistry::new();
        assert_eq!(tags.lookup("camera"), None);
        assert!(tags.resolve("camera", &world).is_none());
    }

    #[test]
    fn test_deleted_entity_leaves_stale_binding() {
        let mut world = World::new(4);
        let player = world.spawn();
        let mut tags = TagRegistry::new();
        tags.register("player", player);

        world.despawn(player);

        assert_eq!(tags.lookup("player"), Some(player));
        assert!(tags.resolve("player", &world).is_none());
    }

    #[test]
    fn test_unregister_and_clear() {
        let mut world = World::new(4);
        let mut tags = TagRegistry::new();
        tags.register("a", world.spawn());
        tags.register("b", world.spawn());

        assert!(tags.unregister("a").is_some());
        assert!(tags.unregister("a").is_none());
        assert_eq!(tags.iter().count(), 1);

        tags.clear();
        assert!(tags.is_empty());
    }
}
