//! # Archetypes
//!
//! A reusable entity template: a fixed list of fragments plus a position
//! and size that are set before each instantiation.
//!
//! ```text
//! let mut grunt = Archetype::new("grunt").with_fragment(DefaultBody);
//! grunt.position(16.0, 0.0).size(8.0, 12.0).create(&mut world)?;
//! grunt.position(48.0, 0.0).create(&mut world)?;   // size carries over
//! ```

use std::fmt;

use tether_core::{EntityId, Pos, Size, World};

use super::builder::EntityBuilder;
use super::fragments::Fragment;
use crate::error::FactoryResult;

/// A parameterised template stamped out through [`EntityBuilder`].
pub struct Archetype<'a> {
    name: &'static str,
    position: Pos,
    size: Size,
    fragments: Vec<Box<dyn Fragment + 'a>>,
}

impl<'a> Archetype<'a> {
    /// An archetype with only `Pos` and `Size`, both zeroed.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            position: Pos::default(),
            size: Size::default(),
            fragments: Vec::new(),
        }
    }

    /// Appends a fragment applied on every instantiation, after `Pos` and
    /// `Size`.
    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Fragment + 'a) -> Self {
        self.fragments.push(Box::new(fragment));
        self
    }

    /// Sets the position for the next instantiations.
    pub fn position(&mut self, x: f32, y: f32) -> &mut Self {
        self.position = Pos::new(x, y);
        self
    }

    /// Sets the size for the next instantiations.
    pub fn size(&mut self, width: f32, height: f32) -> &mut Self {
        self.size = Size::new(width, height);
        self
    }

    /// Archetype name, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Creates one entity from the current parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::WorldFull`](crate::FactoryError::WorldFull)
    /// if no slot is free, or the first fragment failure. As with every
    /// construction, the entity keeps what was attached before the failure.
    pub fn create(&self, world: &mut World) -> FactoryResult<EntityId> {
        let mut entity = EntityBuilder::spawn(world)?;
        entity.with(self.position).with(self.size);
        for fragment in &self.fragments {
            entity.fragment(fragment.as_ref())?;
        }
        let id = entity.finish();
        tracing::debug!(archetype = self.name, entity = %id, "instantiated");
        Ok(id)
    }
}

impl fmt::Debug for Archetype<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archetype")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("size", &self.size)
            .field(
                "fragments",
                &self.fragments.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
