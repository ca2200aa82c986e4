//! # Tagged References
//!
//! A [`TaggedRef`] names a role instead of capturing an instance. Every
//! resolution goes back to the [`TagRegistry`], so after a respawn re-binds
//! the tag the reference follows the new entity.

use super::safe::EntityRef;
use super::tags::TagRegistry;
use crate::ecs::World;

/// Reference resolved by tag at each use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TaggedRef {
    tag: &'static str,
}

impl TaggedRef {
    /// References whatever entity is bound to `tag` at resolve time.
    #[inline]
    #[must_use]
    pub const fn new(tag: &'static str) -> Self {
        Self { tag }
    }

    /// The tag this reference resolves through.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> &'static str {
        self.tag
    }

    /// Re-reads the registry and validates the bound identity's generation.
    #[inline]
    #[must_use]
    pub fn resolve<'w>(self, tags: &TagRegistry, world: &'w World) -> Option<EntityRef<'w>> {
        tags.resolve(self.tag, world)
    }
}
